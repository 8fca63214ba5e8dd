use crate::series::NavSeries;
use chrono::{Datelike, Days, Months, NaiveDate};
use core_types::ReturnSet;

/// The period boundaries derived from the last date of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDates {
    /// First day of the last date's month.
    pub month_start: NaiveDate,
    /// First day of the last date's year.
    pub year_start: NaiveDate,
    /// One calendar year before the last date. 29 February maps to 28 February.
    pub twelve_months_ago: NaiveDate,
}

impl ReferenceDates {
    pub fn from_last_date(last_date: NaiveDate) -> Self {
        Self {
            month_start: last_date - Days::new(u64::from(last_date.day0())),
            year_start: last_date - Days::new(u64::from(last_date.ordinal0())),
            // `checked_sub_months` clamps the day to the end of the target month.
            twelve_months_ago: last_date
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Return from the closing NAV before `reference` up to `last_nav`.
///
/// The anchor is the last point dated strictly before `reference`, so a
/// month-to-date figure starts from the previous month's close even when the
/// series has earlier points inside the current month. Yields `0.0` when no
/// point precedes `reference` or the anchor NAV is zero.
pub fn period_return(series: &NavSeries, last_nav: f64, reference: NaiveDate) -> f64 {
    match series.anchor_before(reference) {
        Some(anchor) if anchor.nav != 0.0 => last_nav / anchor.nav - 1.0,
        Some(anchor) => {
            tracing::warn!(date = %anchor.date, "Anchor NAV is zero; reporting a 0.0 return.");
            0.0
        }
        None => {
            tracing::debug!(%reference, "No NAV precedes the reference date; reporting a 0.0 return.");
            0.0
        }
    }
}

/// Computes month-to-date, year-to-date and trailing-twelve-month returns
/// relative to the series' last point.
///
/// A series with fewer than two points cannot produce a return and yields an
/// all-zero `ReturnSet`.
pub fn compute_returns(series: &NavSeries) -> ReturnSet {
    if series.len() < 2 {
        return ReturnSet::default();
    }
    let Some(last) = series.last() else {
        return ReturnSet::default();
    };

    let references = ReferenceDates::from_last_date(last.date);

    ReturnSet {
        month_to_date: period_return(series, last.nav, references.month_start),
        year_to_date: period_return(series, last.nav, references.year_start),
        trailing_12m: period_return(series, last.nav, references.twelve_months_ago),
    }
}
