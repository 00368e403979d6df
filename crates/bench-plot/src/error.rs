use std::path::PathBuf;

use bench_table::TableError;

#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("Output path has no file extension: {}", .0.display())]
    MissingExtension(PathBuf),
    #[error("Unsupported plot format: .{0} (expected png, jpg, jpeg, bmp or svg)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("Bundled plot font could not be loaded")]
    Font,
    #[error("Drawing backend error")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}
