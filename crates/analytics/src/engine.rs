use crate::allocation::aggregate_with;
use crate::parser::NumberLocale;
use crate::report::PerformanceSummary;
use crate::returns::compute_returns;
use crate::series::{NavSeries, build_series_with};
use core_types::{AllocationRecord, AllocationSummary, HistoryRecord, ReturnSet};

/// A stateless calculator bound to the number locale of the source sheet.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    locale: NumberLocale,
}

impl AnalyticsEngine {
    pub fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &NumberLocale {
        &self.locale
    }

    pub fn build_series(&self, rows: &[HistoryRecord]) -> NavSeries {
        build_series_with(rows, &self.locale)
    }

    pub fn compute_returns(&self, series: &NavSeries) -> ReturnSet {
        compute_returns(series)
    }

    pub fn aggregate(&self, rows: &[AllocationRecord]) -> AllocationSummary {
        aggregate_with(rows, &self.locale)
    }

    /// Builds the series and its headline figures in one pass over the raw rows.
    ///
    /// The summary is `None` when no row had a readable date.
    pub fn summarize(&self, rows: &[HistoryRecord]) -> (NavSeries, Option<PerformanceSummary>) {
        let series = self.build_series(rows);
        let summary = PerformanceSummary::from_series(&series);
        (series, summary)
    }
}
