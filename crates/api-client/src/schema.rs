//! Named-column extraction.
//!
//! Each tab is described by the columns configured for it. Columns are
//! resolved against the table once; a column that cannot be found fails the
//! whole tab with `ApiError::MissingColumn` so the caller can skip that
//! section of the report.

use crate::error::ApiError;
use crate::table::Table;
use configuration::{AllocationSheet, ColumnRef, HistorySheet, ReturnsSheet};
use core_types::{AllocationRecord, AssetListing, AssetPerformance, HistoryRecord, RawCell};

/// Finds the index of `column` in `table`.
pub fn resolve(column: &ColumnRef, table: &Table) -> Option<usize> {
    match column {
        ColumnRef::Letter(_) => column.letter_index().filter(|&index| index < table.width()),
        ColumnRef::Header(label) => table.column_by_header(label),
    }
}

/// Projects every row of `table` onto the named fields, in order.
fn project<const N: usize>(
    table: &Table,
    sheet: &str,
    fields: [(&str, &ColumnRef); N],
) -> Result<Vec<[RawCell; N]>, ApiError> {
    let mut indices = [0usize; N];
    for (slot, (field, column)) in indices.iter_mut().zip(fields) {
        *slot = resolve(column, table).ok_or_else(|| ApiError::MissingColumn {
            sheet: sheet.to_string(),
            field: field.to_string(),
            column: column.to_string(),
        })?;
    }

    Ok(table
        .rows()
        .iter()
        .map(|row| indices.map(|index| row[index].clone()))
        .collect())
}

pub fn history_records(table: &Table, layout: &HistorySheet) -> Result<Vec<HistoryRecord>, ApiError> {
    let rows = project(
        table,
        "history",
        [
            ("date", &layout.date),
            ("nav", &layout.nav),
            ("aum", &layout.aum),
            ("benchmark", &layout.benchmark),
        ],
    )?;

    Ok(rows
        .into_iter()
        .map(|[date, nav, aum, benchmark]| HistoryRecord { date, nav, aum, benchmark })
        .collect())
}

pub fn allocation_records(
    table: &Table,
    layout: &AllocationSheet,
) -> Result<Vec<AllocationRecord>, ApiError> {
    let rows = project(
        table,
        "allocation",
        [("category", &layout.category), ("weight", &layout.weight)],
    )?;

    Ok(rows
        .into_iter()
        .map(|[category, weight]| AllocationRecord { category, weight })
        .collect())
}

/// The invested-assets block of the allocation tab. Fully blank rows are skipped.
pub fn asset_listing(table: &Table, layout: &AllocationSheet) -> Result<Vec<AssetListing>, ApiError> {
    let rows = project(
        table,
        "allocation",
        [
            ("asset", &layout.asset),
            ("description", &layout.description),
            ("position", &layout.position),
            ("listing_weight", &layout.listing_weight),
        ],
    )?;

    Ok(rows
        .into_iter()
        .filter(|cells| !cells.iter().all(RawCell::is_blank))
        .map(|[asset, description, position, weight]| AssetListing {
            asset: asset.to_string(),
            description: description.to_string(),
            position: position.to_string(),
            weight: weight.to_string(),
        })
        .collect())
}

/// Per-asset returns, passed through as text. Fully blank rows are skipped.
pub fn asset_performance(
    table: &Table,
    layout: &ReturnsSheet,
) -> Result<Vec<AssetPerformance>, ApiError> {
    let rows = project(
        table,
        "returns",
        [
            ("asset", &layout.asset),
            ("month_to_date", &layout.month_to_date),
            ("year_to_date", &layout.year_to_date),
            ("trailing_12m", &layout.trailing_12m),
        ],
    )?;

    Ok(rows
        .into_iter()
        .filter(|cells| !cells.iter().all(RawCell::is_blank))
        .map(|[asset, month_to_date, year_to_date, trailing_12m]| AssetPerformance {
            asset: asset.to_string(),
            month_to_date: month_to_date.to_string(),
            year_to_date: year_to_date.to_string(),
            trailing_12m: trailing_12m.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn allocation_table() -> Table {
        let csv = "\
Ativo,Descrição,Posição,% PL,,,Classe,% PL
PETR4,Petrobras PN,\"R$ 10.000,00\",\"10,0%\",,,Ações,\"10,0%\"
NTNB35,Tesouro IPCA+ 2035,\"R$ 35.000,00\",\"35,0%\",,,Renda Fixa,\"35,0%\"
,,,,,,Caixa,\"5,0%\"
,,,,,,,
";
        Table::from_csv(csv, 0).unwrap()
    }

    #[test]
    fn resolves_letters_within_the_table_width() {
        let table = allocation_table();
        assert_eq!(resolve(&ColumnRef::letter("H"), &table), Some(7));
        assert_eq!(resolve(&ColumnRef::letter("I"), &table), None);
        assert_eq!(resolve(&ColumnRef::header("Classe"), &table), Some(6));
    }

    #[test]
    fn extracts_allocation_rows_from_the_configured_columns() {
        let records = allocation_records(&allocation_table(), &AllocationSheet::default()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[2], AllocationRecord::new("Caixa", "5,0%"));
        assert_eq!(records[3], AllocationRecord::new(RawCell::Empty, RawCell::Empty));
    }

    #[test]
    fn listing_skips_blank_rows() {
        let listing = asset_listing(&allocation_table(), &AllocationSheet::default()).unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[1].asset, "NTNB35");
        assert_eq!(listing[1].position, "R$ 35.000,00");
    }

    #[test]
    fn narrow_tab_reports_the_missing_column() {
        let table = Table::from_csv("Ativo,Descrição,Posição,% PL\nPETR4,x,1,2\n", 0).unwrap();

        let err = allocation_records(&table, &AllocationSheet::default()).unwrap_err();

        match err {
            ApiError::MissingColumn { sheet, field, column } => {
                assert_eq!(sheet, "allocation");
                assert_eq!(field, "category");
                assert_eq!(column, "column G");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_references_follow_the_label_not_the_position() {
        let table = Table::from_csv("Cota,Data,Bench,PL\n\"1,1\",02/01/2024,\"1,0\",\"R$ 5,00\"\n", 0).unwrap();
        let layout = HistorySheet {
            gid: "0".to_string(),
            date: ColumnRef::header("Data"),
            nav: ColumnRef::header("Cota"),
            aum: ColumnRef::header("PL"),
            benchmark: ColumnRef::header("Bench"),
        };

        let records = history_records(&table, &layout).unwrap();

        assert_eq!(records, vec![HistoryRecord::new("02/01/2024", "1,1", "R$ 5,00", "1,0")]);
    }
}
