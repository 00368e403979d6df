use std::path::PathBuf;

use polars::prelude::PolarsError;

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Read(#[from] std::io::Error),
    #[error("Data frame error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Input has no header line")]
    Empty,
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Column {name} is not numeric (found {dtype})")]
    NotNumeric { name: String, dtype: String },
}
