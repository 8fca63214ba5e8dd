use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated exposure per category.
///
/// Categories are unique. Iteration is alphabetical, which keeps display
/// stable, but callers must not attach meaning to the order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationSummary {
    weights: BTreeMap<String, f64>,
}

impl AllocationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the running total of `category`.
    pub fn add(&mut self, category: &str, weight: f64) {
        *self.weights.entry(category.to_string()).or_insert(0.0) += weight;
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.weights.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all category weights, i.e. the invested fraction of the portfolio.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_per_category() {
        let mut summary = AllocationSummary::new();
        summary.add("Equity", 0.10);
        summary.add("Bond", 0.05);
        summary.add("Equity", 0.15);

        assert_eq!(summary.len(), 2);
        assert!((summary.get("Equity").unwrap() - 0.25).abs() < 1e-12);
        assert_eq!(summary.get("Cash"), None);
        assert!((summary.total() - 0.30).abs() < 1e-12);
    }

    #[test]
    fn categories_are_case_sensitive() {
        let mut summary = AllocationSummary::new();
        summary.add("Equity", 0.1);
        summary.add("equity", 0.1);
        assert_eq!(summary.len(), 2);
    }
}
