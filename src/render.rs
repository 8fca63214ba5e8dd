use crate::dashboard::Dashboard;
use crate::format::{format_brl, format_percent};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use core_types::TimeSeriesPoint;
use std::fmt::Write as _;
use std::io;

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}

/// Renders the report as terminal tables, one section after another.
///
/// Only the last `history_rows` points of the series are listed.
pub fn render_dashboard(dashboard: &Dashboard, history_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Performance & Allocation Report ({})\n",
        chrono::Local::now().format("%d/%m/%Y %H:%M")
    );

    let _ = writeln!(out, "1. Portfolio Performance");
    match &dashboard.performance {
        Some(performance) => {
            let mut kpis = new_table(&["Month", "Year", "12 Months", "Current AUM", "As of"]);
            kpis.add_row(vec![
                format_percent(performance.returns.month_to_date),
                format_percent(performance.returns.year_to_date),
                format_percent(performance.returns.trailing_12m),
                format_brl(performance.latest_aum),
                performance.as_of.format("%d/%m/%Y").to_string(),
            ]);
            let _ = writeln!(out, "{}", kpis);
        }
        None => {
            let _ = writeln!(out, "(unavailable)");
        }
    }

    if !dashboard.series.is_empty() && history_rows > 0 {
        let _ = writeln!(out, "\nPortfolio vs Benchmark (last {} points)", history_rows.min(dashboard.series.len()));
        let mut series = new_table(&["Date", "NAV", "Benchmark", "AUM"]);
        let skip = dashboard.series.len().saturating_sub(history_rows);
        for point in &dashboard.series[skip..] {
            series.add_row(vec![
                point.date.format("%d/%m/%Y").to_string(),
                format!("{:.6}", point.nav),
                format!("{:.6}", point.benchmark),
                format_brl(point.aum),
            ]);
        }
        let _ = writeln!(out, "{}", series);
    }

    let _ = writeln!(out, "\n2. Portfolio Allocation");
    match &dashboard.allocation {
        Some(allocation) => {
            let mut table = new_table(&["Class", "% of AUM"]);
            for (category, weight) in allocation.iter() {
                table.add_row(vec![category.to_string(), format_percent(weight)]);
            }
            table.add_row(vec!["Total".to_string(), format_percent(allocation.total())]);
            if let Some(column) = table.column_mut(1) {
                column.set_cell_alignment(CellAlignment::Right);
            }
            let _ = writeln!(out, "{}", table);
        }
        None => {
            let _ = writeln!(out, "(unavailable)");
        }
    }

    if let Some(assets) = &dashboard.assets {
        let _ = writeln!(out, "\nInvested Assets");
        let mut table = new_table(&["Asset", "Description", "Position", "% of AUM"]);
        for asset in assets {
            table.add_row(vec![&asset.asset, &asset.description, &asset.position, &asset.weight]);
        }
        let _ = writeln!(out, "{}", table);
    }

    let _ = writeln!(out, "\n3. Asset Performance");
    match &dashboard.asset_returns {
        Some(rows) => {
            let mut table = new_table(&["Asset", "Month", "Year", "12 Months"]);
            for row in rows {
                table.add_row(vec![&row.asset, &row.month_to_date, &row.year_to_date, &row.trailing_12m]);
            }
            let _ = writeln!(out, "{}", table);
        }
        None => {
            let _ = writeln!(out, "(unavailable)");
        }
    }

    if !dashboard.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings");
        for warning in &dashboard.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    out
}

/// Writes the series as CSV with a `date,nav,aum,benchmark` header.
pub fn write_series_csv<W: io::Write>(writer: W, series: &[TimeSeriesPoint]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in series {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}
