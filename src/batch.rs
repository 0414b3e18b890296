use crate::errors::{InputError, RecordError};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// A single input row, keyed by column name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputRecord {
    /// 1-based position of the row among the data rows of the file.
    row: usize,
    fields: HashMap<String, String>,
}

impl InputRecord {
    pub fn new<K, V>(row: usize, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Looks up the value of `column`, failing if the row does not have it.
    pub fn get(&self, column: &str) -> Result<&str, RecordError> {
        self.fields
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| RecordError::MissingField {
                field: column.to_string(),
                row: self.row,
            })
    }
}

/// The parsed contents of an input file: the columns it actually declares and
/// its records in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputBatch {
    pub columns: Vec<String>,
    pub records: Vec<InputRecord>,
}

impl InputBatch {
    pub fn new(columns: Vec<String>, records: Vec<InputRecord>) -> Self {
        Self { columns, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One line of the output report.
///
/// `result` holds the computed due date for a successful record, or an error
/// message when the record could not be processed.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct OutputRow {
    pub id: String,
    pub invoice_date: String,
    pub result: String,
}

impl OutputRow {
    pub fn new(
        id: impl Into<String>,
        invoice_date: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            invoice_date: invoice_date.into(),
            result: result.into(),
        }
    }
}

/// Reads the delimited file at `path` into an [`InputBatch`].
///
/// The first line is the header. Rows shorter than the header simply lack
/// the trailing columns; values are kept exactly as written.
pub fn read_batch(path: &Path, delimiter: u8) -> Result<InputBatch, InputError> {
    // The csv library sets up its own io::BufReader.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        records.push(InputRecord::new(
            index + 1,
            columns.iter().cloned().zip(record.iter().map(str::to_string)),
        ));
    }

    debug!(
        columns = ?columns,
        records = records.len(),
        "read input file"
    );
    Ok(InputBatch::new(columns, records))
}
