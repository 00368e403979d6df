use std::fmt;

use comfy_table::{Cell, CellAlignment, Table as TextTable, presets};

use crate::{Description, Stats, Table};

fn text_table() -> TextTable {
    let mut table = TextTable::new();
    table.load_preset(presets::NOTHING);
    table
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{value:.6}")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.n_columns() == 0 {
            return f.write_str("Empty table");
        }

        write!(f, "{}", self.frame)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return f.write_str("No numeric columns");
        }

        let mut out = text_table();
        out.set_header(
            std::iter::once(right(""))
                .chain(self.columns.iter().map(|c| right(&c.name)))
                .collect::<Vec<_>>(),
        );

        let values: Vec<[f64; 8]> = self.columns.iter().map(|c| c.stats.values()).collect();
        for (index, label) in Stats::LABELS.iter().enumerate() {
            out.add_row(
                std::iter::once(right(label))
                    .chain(values.iter().map(|v| right(format_stat(v[index]))))
                    .collect::<Vec<_>>(),
            );
        }

        write!(f, "{out}")
    }
}
