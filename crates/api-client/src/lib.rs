//! # Meridian Ingestion Layer
//!
//! Downloads the report's spreadsheet tabs and turns them into the raw records
//! the analytics crate consumes.
//!
//! - `DataProvider`: the abstract source of tabs, so the live client can be
//!   swapped for a fake in tests.
//! - `SheetsClient`: reads a tab through the Google Sheets CSV export.
//! - `CachedProvider`: wraps any provider with a time-to-live cache. Freshness is
//!   decided here and nowhere else.
//! - `schema`: resolves the configured columns once per tab and extracts typed
//!   records, reporting a missing column as an error instead of guessing.

use async_trait::async_trait;
use std::sync::Arc;

pub mod cache;
pub mod error;
pub mod schema;
pub mod sheets;
pub mod table;

// --- Public API ---
pub use cache::{CachedProvider, FreshnessPolicy};
pub use error::ApiError;
pub use sheets::SheetsClient;
pub use table::Table;

/// Identifies one tab of a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    /// Human-readable name used in logs and messages.
    pub name: String,
    pub spreadsheet_id: String,
    pub gid: String,
    /// Zero-based index of the header row.
    pub header_row: usize,
}

impl SheetRef {
    pub fn new(name: &str, spreadsheet_id: &str, gid: &str, header_row: usize) -> Self {
        Self {
            name: name.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            gid: gid.to_string(),
            header_row,
        }
    }

    pub(crate) fn cache_key(&self) -> String {
        format!("{}#{}@{}", self.spreadsheet_id, self.gid, self.header_row)
    }
}

/// The generic, abstract interface for a source of spreadsheet tabs.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches a whole tab, header included.
    async fn fetch(&self, sheet: &SheetRef) -> Result<Arc<Table>, ApiError>;
}
