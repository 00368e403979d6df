use polars::prelude::*;
use tracing::{info, warn};

use crate::{Table, TableError};

pub const THREAD_COUNT: &str = "ThreadCount";
pub const EVENT_COUNT: &str = "EventCount";
pub const ELAPSED_TIME: &str = "ElapsedTime";
pub const THROUGHPUT: &str = "Throughput";

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Events per second for a run that took `elapsed_us` microseconds.
///
/// Zero elapsed time is not guarded: it gives `inf`, or NaN for `0 / 0`.
pub fn throughput(event_count: f64, elapsed_us: f64) -> f64 {
    event_count * MICROS_PER_SECOND / elapsed_us
}

/// Adds (or replaces) the `Throughput` column computed from `EventCount` and `ElapsedTime`.
pub fn add_throughput(table: &mut Table) -> Result<(), TableError> {
    table.numeric_column(EVENT_COUNT)?;
    table.numeric_column(ELAPSED_TIME)?;

    let events = col(EVENT_COUNT).cast(DataType::Float64);
    let elapsed = col(ELAPSED_TIME).cast(DataType::Float64);
    table.frame = table
        .frame
        .clone()
        .lazy()
        .with_column((events * lit(MICROS_PER_SECOND) / elapsed).alias(THROUGHPUT))
        .collect()?;

    let non_finite = table
        .numeric(THROUGHPUT)?
        .iter()
        .filter(|v| !v.is_finite())
        .count();
    if non_finite > 0 {
        warn!(rows = non_finite, "Throughput is not finite for some rows");
    }

    info!(rows = table.n_rows(), "Derived {THROUGHPUT} column");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoadOptions;

    fn load(text: &str) -> Table {
        Table::from_reader(text.as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn computes_events_per_second() {
        let mut table = load(
            "# run 1\nThreadCount,EventCount,ElapsedTime\n1,1000,500000\n2,1800,500000\n",
        );
        add_throughput(&mut table).unwrap();

        assert_eq!(table.numeric(THROUGHPUT).unwrap(), vec![2000.0, 3600.0]);
        assert_eq!(
            table.column_names(),
            vec![THREAD_COUNT, EVENT_COUNT, ELAPSED_TIME, THROUGHPUT]
        );
    }

    #[test]
    fn matches_formula_for_every_row() {
        let mut table = load(
            "ThreadCount,EventCount,ElapsedTime\n1,7,3\n4,123456,987654\n8,5,0.5\n16,99,1000001\n",
        );
        add_throughput(&mut table).unwrap();

        let events = table.numeric(EVENT_COUNT).unwrap();
        let elapsed = table.numeric(ELAPSED_TIME).unwrap();
        let derived = table.numeric(THROUGHPUT).unwrap();
        for ((&e, &t), d) in events.iter().zip(&elapsed).zip(&derived) {
            let expected = throughput(e, t);
            assert!((d - expected).abs() <= expected.abs() * 1e-12);
        }
    }

    #[test]
    fn zero_elapsed_passes_through() {
        let mut table = load("ThreadCount,EventCount,ElapsedTime\n1,10,0\n2,0,0\n");
        add_throughput(&mut table).unwrap();

        let derived = table.numeric(THROUGHPUT).unwrap();
        assert_eq!(derived[0], f64::INFINITY);
        assert!(derived[1].is_nan());
    }

    #[test]
    fn missing_elapsed_is_nan() {
        let mut table = load("ThreadCount,EventCount,ElapsedTime\n1,10,\n2,10,5\n");
        add_throughput(&mut table).unwrap();

        let derived = table.numeric(THROUGHPUT).unwrap();
        assert!(derived[0].is_nan());
        assert_eq!(derived[1], 2_000_000.0);
    }

    #[test]
    fn requires_numeric_inputs() {
        let mut table = load("ThreadCount,EventCount\n1,10\n");
        assert!(matches!(
            add_throughput(&mut table),
            Err(TableError::MissingColumn(name)) if name == ELAPSED_TIME
        ));

        let mut table = load("EventCount,ElapsedTime\nmany,10\n");
        assert!(matches!(
            add_throughput(&mut table),
            Err(TableError::NotNumeric { name, .. }) if name == EVENT_COUNT
        ));
    }

    #[test]
    fn rerun_replaces_column() {
        let mut table = load("EventCount,ElapsedTime\n1,1\n");
        add_throughput(&mut table).unwrap();
        add_throughput(&mut table).unwrap();

        assert_eq!(table.n_columns(), 3);
    }
}
