use std::path::Path;

use crate::PlotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl PlotFormat {
    /// Infers the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, PlotError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| PlotError::MissingExtension(path.to_path_buf()))?;

        match extension.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "svg" => Ok(Self::Svg),
            _ => Err(PlotError::UnsupportedFormat(extension)),
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Svg)
    }
}
