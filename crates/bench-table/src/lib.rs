//! Benchmark results as a polars data frame: CSV loading, the derived
//! throughput column, and descriptive statistics.

pub mod derive;
mod describe;
mod display;
mod error;
mod loader;
mod table;

pub use derive::{ELAPSED_TIME, EVENT_COUNT, THREAD_COUNT, THROUGHPUT, add_throughput};
pub use describe::{ColumnSummary, Description, Stats};
pub use error::TableError;
pub use loader::LoadOptions;
pub use table::Table;
