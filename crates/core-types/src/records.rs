use crate::cell::RawCell;
use serde::{Deserialize, Serialize};

/// One row of the NAV history tab: date, quota, AUM and benchmark, in that order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: RawCell,
    pub nav: RawCell,
    pub aum: RawCell,
    pub benchmark: RawCell,
}

impl HistoryRecord {
    pub fn new(
        date: impl Into<RawCell>,
        nav: impl Into<RawCell>,
        aum: impl Into<RawCell>,
        benchmark: impl Into<RawCell>,
    ) -> Self {
        Self {
            date: date.into(),
            nav: nav.into(),
            aum: aum.into(),
            benchmark: benchmark.into(),
        }
    }
}

/// One per-asset allocation row: the category label and its weight of the portfolio.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub category: RawCell,
    pub weight: RawCell,
}

impl AllocationRecord {
    pub fn new(category: impl Into<RawCell>, weight: impl Into<RawCell>) -> Self {
        Self {
            category: category.into(),
            weight: weight.into(),
        }
    }
}

// The two tables below are display data. They are passed through untouched
// and never recomputed.

/// A line of the invested-assets listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetListing {
    pub asset: String,
    pub description: String,
    pub position: String,
    pub weight: String,
}

/// Month, year and twelve-month returns of a single asset, as published in the sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetPerformance {
    pub asset: String,
    pub month_to_date: String,
    pub year_to_date: String,
    pub trailing_12m: String,
}
