mod error;
mod font;
mod format;
mod scatter;

pub use error::PlotError;
pub use format::PlotFormat;
pub use scatter::ScatterPlot;
