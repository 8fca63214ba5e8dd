//! # Meridian Analytics Engine
//!
//! This crate turns the raw, locale-formatted spreadsheet rows of a fund report
//! into typed figures: a clean NAV series, month/year/twelve-month returns and
//! category-level allocation weights.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It performs no I/O and has no
//!   knowledge of where the rows came from or whether they were cached. It
//!   depends only on `core-types` (Layer 0).
//! - **Never abort the report:** A malformed cell degrades to `0.0`, a row with an
//!   unreadable date is dropped, and a missing anchor yields a `0.0` return.
//!   None of these conditions is surfaced as an error; they are logged with
//!   `tracing` instead.
//! - **Stateless Calculation:** Every entry point is a deterministic function of its
//!   input and is safe to call from several threads at once.
//!
//! ## Public API
//!
//! - `parse_currency` / `parse_percent`: lossy numeric parsing of text cells.
//! - `build_series`: raw history rows into a sorted `NavSeries`.
//! - `compute_returns`: MTD, YTD and trailing-twelve-month returns.
//! - `aggregate`: category weights from per-asset allocation rows.
//! - `AnalyticsEngine`: the same operations bound to a configured `NumberLocale`.

// Declare the modules that constitute this crate.
pub mod allocation;
pub mod dates;
pub mod engine;
pub mod error;
pub mod parser;
pub mod report;
pub mod returns;
pub mod series;

// Re-export the key components to create a clean, public-facing API.
pub use allocation::{aggregate, aggregate_with};
pub use dates::parse_day_first;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use parser::{NumberLocale, ParseOutcome, parse_currency, parse_percent};
pub use report::PerformanceSummary;
pub use returns::{ReferenceDates, compute_returns, period_return};
pub use series::{NavSeries, build_series, build_series_with};
