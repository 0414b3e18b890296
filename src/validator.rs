use crate::batch::InputRecord;
use crate::calendar;
use crate::config::Configuration;
use crate::errors::RecordError;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Checks an input file's columns and its records' invoice dates against the
/// run configuration.
pub struct RecordValidator<'a> {
    config: &'a Configuration,
}

impl<'a> RecordValidator<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// True if the file declares exactly the configured input columns, in any
    /// order.
    pub fn validate_schema(&self, actual_columns: &[String]) -> bool {
        same_columns(actual_columns, self.config.input_columns())
    }

    /// Parses the record's invoice date, returning `None` when it is not a
    /// valid `YYYY-MM-DD` date.
    ///
    /// A record with no value at all for the date column is a malformed row,
    /// not an invalid date, and is reported as an error.
    pub fn validate_record_date(
        &self,
        record: &InputRecord,
    ) -> Result<Option<NaiveDate>, RecordError> {
        let value = record.get(self.config.date_field())?;
        Ok(calendar::parse_date(value))
    }
}

/// Compares two column lists as sets.
pub fn same_columns(actual: &[String], expected: &[String]) -> bool {
    let actual: BTreeSet<&str> = actual.iter().map(String::as_str).collect();
    let expected: BTreeSet<&str> = expected.iter().map(String::as_str).collect();

    actual == expected
}
