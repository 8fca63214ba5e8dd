use crate::parser::NumberLocale;
use core_types::{AllocationRecord, AllocationSummary, RawCell};

/// Aggregates allocation rows using the default number locale.
pub fn aggregate(rows: &[AllocationRecord]) -> AllocationSummary {
    aggregate_with(rows, NumberLocale::shared())
}

/// Sums per-asset weights into category exposure.
///
/// Rows without a category label are dropped. Labels are grouped exactly as
/// written: case-sensitive and untrimmed. Weights go through the percent parser.
pub fn aggregate_with(rows: &[AllocationRecord], locale: &NumberLocale) -> AllocationSummary {
    let mut summary = AllocationSummary::new();
    let mut unlabeled = 0usize;
    let mut defaulted = 0usize;

    for row in rows {
        let category = match &row.category {
            cell if cell.is_blank() => {
                unlabeled += 1;
                continue;
            }
            RawCell::Text(text) => text.clone(),
            other => other.to_string(),
        };

        let weight = locale.percent(&row.weight);
        if weight.is_defaulted() {
            defaulted += 1;
        }
        summary.add(&category, weight.value());
    }

    if defaulted > 0 {
        tracing::warn!(defaulted, "Allocation weights could not be read and were set to 0.0.");
    }
    tracing::debug!(
        rows = rows.len(),
        unlabeled,
        categories = summary.len(),
        "Aggregated allocation by category."
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn groups_and_sums_by_category() {
        let rows = vec![
            AllocationRecord::new("Equity", "10%"),
            AllocationRecord::new("Bond", "5%"),
            AllocationRecord::new("Equity", "15%"),
        ];

        let summary = aggregate(&rows);

        assert_eq!(summary.len(), 2);
        assert_relative_eq!(summary.get("Equity").unwrap(), 0.25);
        assert_relative_eq!(summary.get("Bond").unwrap(), 0.05);
    }

    #[test]
    fn drops_rows_without_a_category() {
        let rows = vec![
            AllocationRecord::new(RawCell::Empty, "50%"),
            AllocationRecord::new("", "20%"),
            AllocationRecord::new("Caixa", "3,5%"),
        ];

        let summary = aggregate(&rows);

        assert_eq!(summary.len(), 1);
        assert_relative_eq!(summary.total(), 0.035);
    }

    #[test]
    fn labels_are_not_normalised() {
        let rows = vec![
            AllocationRecord::new("Renda Fixa", "10%"),
            AllocationRecord::new("renda fixa", "10%"),
            AllocationRecord::new("Renda Fixa ", "10%"),
        ];

        assert_eq!(aggregate(&rows).len(), 3);
    }

    #[test]
    fn unreadable_weights_count_as_zero() {
        let rows = vec![
            AllocationRecord::new("Equity", "n/a"),
            AllocationRecord::new("Equity", RawCell::Number(0.2)),
        ];

        assert_relative_eq!(aggregate(&rows).get("Equity").unwrap(), 0.2);
    }

    #[test]
    fn repeated_aggregation_is_bit_identical() {
        let rows = vec![
            AllocationRecord::new("Equity", "0,1%"),
            AllocationRecord::new("Bond", "33,333%"),
            AllocationRecord::new("Equity", "0,2%"),
            AllocationRecord::new("Equity", RawCell::Number(0.7)),
        ];
        let bits = |summary: &AllocationSummary| -> Vec<(String, u64)> {
            summary.iter().map(|(k, v)| (k.to_string(), v.to_bits())).collect()
        };

        assert_eq!(bits(&aggregate(&rows)), bits(&aggregate(&rows)));
    }

    #[test]
    fn empty_input_is_an_empty_summary() {
        assert!(aggregate(&[]).is_empty());
    }
}
