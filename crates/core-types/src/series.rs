use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated observation of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    /// Per-unit net asset value (the "quota").
    pub nav: f64,
    /// Assets under management at `date`.
    pub aum: f64,
    pub benchmark: f64,
}

/// Point returns of the portfolio, as fractions (0.0123 is 1.23%).
///
/// Every field is 0.0 when it cannot be determined.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnSet {
    pub month_to_date: f64,
    pub year_to_date: f64,
    pub trailing_12m: f64,
}
