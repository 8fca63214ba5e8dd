pub mod allocation;
pub mod cell;
pub mod records;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use allocation::AllocationSummary;
pub use cell::{RawCell, is_valid_separator};
pub use records::{AllocationRecord, AssetListing, AssetPerformance, HistoryRecord};
pub use series::{ReturnSet, TimeSeriesPoint};
