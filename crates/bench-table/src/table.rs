use polars::prelude::*;

use crate::TableError;

/// Benchmark results: the loaded data frame plus the `# Key: Value` metadata of its source.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) frame: DataFrame,
    metadata: Vec<(String, String)>,
}

impl Table {
    pub fn new(frame: DataFrame) -> Self {
        Self {
            frame,
            metadata: Vec::new(),
        }
    }

    pub(crate) fn with_metadata(mut self, metadata: Vec<(String, String)>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn n_rows(&self) -> usize {
        self.frame.height()
    }

    pub fn n_columns(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.frame
            .get_columns()
            .iter()
            .map(|column| column.name().as_str())
            .collect()
    }

    /// `# Key: Value` pairs found in the comment lines of the source file.
    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    pub(crate) fn numeric_column(&self, name: &str) -> Result<&Column, TableError> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| TableError::MissingColumn(name.to_string()))?;

        if !is_numeric(column.dtype()) {
            return Err(TableError::NotNumeric {
                name: name.to_string(),
                dtype: column.dtype().to_string(),
            });
        }

        Ok(column)
    }

    /// The column as floats. Nulls become NaN.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, TableError> {
        let values = self.numeric_column(name)?.cast(&DataType::Float64)?;

        Ok(values
            .f64()?
            .into_iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect())
    }

    pub fn head(&self, n: usize) -> Self {
        Self {
            frame: self.frame.head(Some(n)),
            metadata: self.metadata.clone(),
        }
    }
}

/// Integer and float columns, the types CSV inference produces for numbers.
pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}
