use polars::prelude::*;

use crate::{Table, TableError, table::is_numeric};

const VALUE: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Stats {
    pub const LABELS: [&'static str; 8] = [
        "count", "mean", "std", "min", "25%", "50%", "75%", "max",
    ];

    /// Statistics over the non-NaN values. Infinities are kept.
    ///
    /// Quartiles interpolate linearly between closest ranks; `std` uses `n - 1`.
    pub fn from_values(values: &[f64]) -> Result<Self, TableError> {
        let values: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let frame = polars::df!(VALUE => values)?;

        let aggregations = [
            col(VALUE).count(),
            col(VALUE).mean(),
            col(VALUE).std(1),
            col(VALUE).min(),
            col(VALUE).quantile(lit(0.25), QuantileMethod::Linear),
            col(VALUE).quantile(lit(0.5), QuantileMethod::Linear),
            col(VALUE).quantile(lit(0.75), QuantileMethod::Linear),
            col(VALUE).max(),
        ];
        let summary = frame
            .lazy()
            .select(
                aggregations
                    .into_iter()
                    .zip(Self::LABELS)
                    .map(|(expr, label)| expr.alias(label))
                    .collect::<Vec<_>>(),
            )
            .collect()?;

        let mut row = [f64::NAN; 8];
        for (value, label) in row.iter_mut().zip(Self::LABELS) {
            *value = scalar(&summary, label)?;
        }
        let [count, mean, std, min, p25, p50, p75, max] = row;

        Ok(Self {
            count: count as usize,
            mean,
            std,
            min,
            p25,
            p50,
            p75,
            max,
        })
    }

    /// Values in the order of [`Stats::LABELS`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
        ]
    }
}

/// First value of a one-row aggregate. Null (no data) reads as NaN.
fn scalar(frame: &DataFrame, name: &str) -> Result<f64, TableError> {
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.get(0).unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub stats: Stats,
}

/// Per-column statistics for every numeric column of a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    pub columns: Vec<ColumnSummary>,
}

impl Description {
    pub fn get(&self, name: &str) -> Option<&Stats> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.stats)
    }
}

impl Table {
    pub fn describe(&self) -> Result<Description, TableError> {
        let columns = self
            .frame
            .get_columns()
            .iter()
            .filter(|column| is_numeric(column.dtype()))
            .map(|column| {
                let name = column.name().as_str();
                Ok(ColumnSummary {
                    name: name.to_string(),
                    stats: Stats::from_values(&self.numeric(name)?)?,
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Ok(Description { columns })
    }
}
