use std::{ops::Range, path::Path};

use bench_table::Table;
use plotters::{coord::Shift, drawing::DrawingAreaErrorKind, prelude::*};
use tracing::{info, warn};

use crate::{PlotError, PlotFormat, font};

const POINT_RADIUS: i32 = 3;
const MARGIN: u32 = 16;
const X_LABEL_AREA: u32 = 40;
const Y_LABEL_AREA: u32 = 72;
const AXIS_PADDING: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    pub size: (u32, u32),
}

impl ScatterPlot {
    pub const DEFAULT_SIZE: (u32, u32) = (640, 480);

    pub fn new(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        points: Vec<(f64, f64)>,
    ) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            points,
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Pairs up two numeric columns, labelling the axes with the column names.
    pub fn from_table(table: &Table, x: &str, y: &str) -> Result<Self, PlotError> {
        let xs = table.numeric(x)?;
        let ys = table.numeric(y)?;

        Ok(Self::new(x, y, xs.into_iter().zip(ys).collect()))
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Renders to `path`. The format is checked before anything is written.
    pub fn save(&self, path: &Path) -> Result<PlotFormat, PlotError> {
        let format = PlotFormat::from_path(path)?;
        font::ensure_registered()?;

        let points = self.finite_points();
        let dropped = self.points.len() - points.len();
        if dropped > 0 {
            warn!(dropped, "Skipping points with non-finite coordinates");
        }

        if format.is_vector() {
            let root = SVGBackend::new(path, self.size).into_drawing_area();
            self.draw(root, &points).map_err(render_error)?;
        } else {
            let root = BitMapBackend::new(path, self.size).into_drawing_area();
            self.draw(root, &points).map_err(render_error)?;
        }

        info!(
            path = %path.display(),
            ?format,
            points = points.len(),
            "Saved scatter plot"
        );

        Ok(format)
    }

    fn finite_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        points: &[(f64, f64)],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let x_range = axis_range(points.iter().map(|&(x, _)| x));
        let y_range = axis_range(points.iter().map(|&(_, y)| y));

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()?;

        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, POINT_RADIUS, BLACK.filled())),
        )?;

        root.present()
    }
}

fn render_error<E>(err: DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync + 'static,
{
    PlotError::Render(Box::new(err))
}

/// Data extent plus padding on both sides. Degenerate extents widen to a unit interval.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }

    let padding = (max - min) * AXIS_PADDING;
    (min - padding)..(max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_table::{LoadOptions, THREAD_COUNT, THROUGHPUT, add_throughput};
    use tempfile::tempdir;

    fn sample() -> ScatterPlot {
        let mut table = Table::from_reader(
            "# run 1\nThreadCount,EventCount,ElapsedTime\n1,1000,500000\n2,1800,500000\n4,10,0\n"
                .as_bytes(),
            &LoadOptions::default(),
        )
        .unwrap();
        add_throughput(&mut table).unwrap();

        ScatterPlot::from_table(&table, THREAD_COUNT, THROUGHPUT).unwrap()
    }

    #[test]
    fn collects_points_from_table() {
        let plot = sample();
        assert_eq!(plot.x_label, "ThreadCount");
        assert_eq!(plot.y_label, "Throughput");
        assert_eq!(plot.points[..2], [(1.0, 2000.0), (2.0, 3600.0)]);
        assert_eq!(plot.points[2].1, f64::INFINITY);
    }

    #[test]
    fn missing_column_is_an_error() {
        let table = Table::from_reader("a,b\n1,2\n".as_bytes(), &LoadOptions::default()).unwrap();
        assert!(matches!(
            ScatterPlot::from_table(&table, "a", THROUGHPUT),
            Err(PlotError::Table(_))
        ));
    }

    #[test]
    fn axis_range_pads_extent() {
        let range = axis_range([0.0, 10.0].into_iter());
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn axis_range_handles_degenerate_input() {
        assert_eq!(axis_range(std::iter::empty::<f64>()), 0.0..1.0);
        assert_eq!(axis_range([3.0].into_iter()), 2.5..3.5);
    }

    #[test]
    fn saves_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("throughput.png");

        assert_eq!(sample().save(&path).unwrap(), PlotFormat::Png);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn saves_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("throughput.svg");

        sample().with_size(320, 240).save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("ThreadCount"));
        assert!(contents.contains("Throughput"));
    }

    #[test]
    fn raster_output_has_labels() {
        let plot = sample();
        let (width, height) = (320u32, 240u32);
        let mut buffer = vec![0u8; (width * height * 3) as usize];

        font::ensure_registered().unwrap();
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        plot.draw(root, &plot.finite_points()).unwrap();

        // Left of the tick marks, between the top margin and the x label area,
        // only tick labels and the y axis description are drawn.
        let rows = MARGIN..height - MARGIN - X_LABEL_AREA;
        let cols = MARGIN..MARGIN + Y_LABEL_AREA - 12;
        let dark = rows
            .flat_map(|y| cols.clone().map(move |x| ((y * width + x) * 3) as usize))
            .filter(|&i| buffer[i..i + 3].iter().any(|&c| c < 128))
            .count();
        assert!(dark > 0, "no glyphs in the y label area");
    }

    #[test]
    fn saves_empty_plot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");

        ScatterPlot::new("x", "y", Vec::new()).save(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn unsupported_format_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("throughput.exe");

        assert!(matches!(
            sample().save(&path),
            Err(PlotError::UnsupportedFormat(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_is_a_render_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("throughput.png");

        let err = sample().save(&path).unwrap_err();
        assert!(matches!(err, PlotError::Render(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!path.exists());
    }
}
