use std::{
    fs::File,
    io::{Cursor, Read},
    path::Path,
};

use polars::prelude::*;
use tracing::debug;

use crate::{Table, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    /// Lines starting with this byte are not data.
    pub comment: Option<u8>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            comment: Some(b'#'),
        }
    }
}

impl Table {
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_reader(file, options)?;
        debug!(
            path = %path.display(),
            rows = table.n_rows(),
            columns = table.n_columns(),
            "Loaded table"
        );

        Ok(table)
    }

    pub fn from_reader<R: Read>(mut source: R, options: &LoadOptions) -> Result<Self, TableError> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;

        let marker = options.comment.map(char::from);
        let data: String = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .flat_map(|line| [line, "\n"])
            .collect();
        if data.lines().all(|line| is_comment(line, marker)) {
            return Err(TableError::Empty);
        }

        let prefix = marker.map(String::from);
        let parse_options = CsvParseOptions::default()
            .with_separator(options.delimiter)
            .with_comment_prefix(prefix.as_deref())
            .with_missing_is_null(true);

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(parse_options)
            .into_reader_with_file_handle(Cursor::new(data.into_bytes()))
            .finish()?;

        let metadata = marker
            .map(|marker| parse_metadata(&text, marker))
            .unwrap_or_default();

        Ok(Self::new(frame).with_metadata(metadata))
    }
}

fn is_comment(line: &str, marker: Option<char>) -> bool {
    marker.is_some_and(|marker| line.starts_with(marker))
}

/// Collects `# Key: Value` comment lines, in file order.
fn parse_metadata(text: &str, marker: char) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| line.strip_prefix(marker))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
