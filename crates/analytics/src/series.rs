use crate::dates::parse_day_first;
use crate::parser::NumberLocale;
use chrono::NaiveDate;
use core_types::{HistoryRecord, TimeSeriesPoint};
use serde::Serialize;

/// A NAV history sorted ascending by date.
///
/// Points sharing a date keep their original relative order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct NavSeries {
    points: Vec<TimeSeriesPoint>,
}

impl NavSeries {
    pub fn from_points(mut points: Vec<TimeSeriesPoint>) -> Self {
        // `sort_by_key` is stable.
        points.sort_by_key(|point| point.date);
        Self { points }
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TimeSeriesPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TimeSeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }

    /// The latest point dated strictly before `reference`, if any.
    pub fn anchor_before(&self, reference: NaiveDate) -> Option<&TimeSeriesPoint> {
        let end = self.points.partition_point(|point| point.date < reference);
        self.points[..end].last()
    }
}

/// Builds the NAV series using the default number locale.
pub fn build_series(rows: &[HistoryRecord]) -> NavSeries {
    build_series_with(rows, NumberLocale::shared())
}

/// Builds the NAV series from raw history rows.
///
/// Rows whose date cannot be read are dropped. Quota, AUM and benchmark cells
/// go through the currency parser, so an unreadable amount becomes `0.0`.
pub fn build_series_with(rows: &[HistoryRecord], locale: &NumberLocale) -> NavSeries {
    let mut points = Vec::with_capacity(rows.len());
    let mut invalid_dates = 0usize;
    let mut defaulted_cells = 0usize;

    for row in rows {
        let Some(date) = parse_day_first(&row.date) else {
            if !row.date.is_blank() {
                invalid_dates += 1;
                tracing::debug!(date = %row.date, "Skipping history row with an unreadable date.");
            }
            continue;
        };

        let [nav, aum, benchmark] = [&row.nav, &row.aum, &row.benchmark].map(|cell| locale.currency(cell));
        defaulted_cells += [nav, aum, benchmark]
            .iter()
            .filter(|outcome| outcome.is_defaulted())
            .count();

        points.push(TimeSeriesPoint {
            date,
            nav: nav.value(),
            aum: aum.value(),
            benchmark: benchmark.value(),
        });
    }

    if invalid_dates > 0 {
        tracing::warn!(invalid_dates, "Dropped history rows with unreadable dates.");
    }
    if defaulted_cells > 0 {
        tracing::warn!(defaulted_cells, "History cells could not be read and were set to 0.0.");
    }
    tracing::debug!(input_rows = rows.len(), points = points.len(), "Built NAV series.");

    NavSeries::from_points(points)
}
