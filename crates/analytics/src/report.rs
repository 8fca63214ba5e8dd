use crate::returns::compute_returns;
use crate::series::NavSeries;
use chrono::NaiveDate;
use core_types::ReturnSet;
use serde::{Deserialize, Serialize};

/// The headline figures of the performance section.
///
/// This is the output of [`crate::AnalyticsEngine::summarize`] and the data
/// transfer object handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Date of the last point of the series.
    pub as_of: NaiveDate,
    pub latest_nav: f64,
    /// Current assets under management.
    pub latest_aum: f64,
    pub returns: ReturnSet,
    /// Number of points in the series the figures were computed from.
    pub observations: usize,
}

impl PerformanceSummary {
    /// Returns `None` for an empty series.
    pub fn from_series(series: &NavSeries) -> Option<Self> {
        let last = series.last()?;
        Some(Self {
            as_of: last.date,
            latest_nav: last.nav,
            latest_aum: last.aum,
            returns: compute_returns(series),
            observations: series.len(),
        })
    }
}
