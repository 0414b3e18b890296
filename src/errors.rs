use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The pipeline stages that can fail with an internal fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    PerRecordDateCheck,
    Dispatch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PerRecordDateCheck => write!(f, "per-record date check"),
            Stage::Dispatch => write!(f, "dispatch"),
        }
    }
}

/// A fault raised while handling a single record that the pipeline cannot
/// recover from by emitting an error row.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("row {row} has no value for column {field:?}")]
    MissingField { field: String, row: usize },

    #[error("due date for {date} is outside the supported calendar range")]
    DateOutOfRange { date: String },
}

/// Conditions that abort the whole run before any output is produced.
#[derive(Debug, Error, PartialEq)]
pub enum FatalError {
    #[error("Empty file")]
    EmptyInput,

    #[error("Invalid CSV Columns: {columns:?}")]
    SchemaMismatch { columns: Vec<String> },

    #[error("unexpected fault during {stage}: {cause}")]
    Stage { stage: Stage, cause: RecordError },
}

impl FatalError {
    pub fn at(stage: Stage) -> impl FnOnce(RecordError) -> FatalError {
        move |cause| FatalError::Stage { stage, cause }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to decode config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csvDelimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),

    #[error("{option} names column {field:?}, which is not one of the input columns")]
    UnknownField { option: &'static str, field: String },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input file: {0}")]
    Read(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report row: {0}")]
    SerializeError(#[from] csv::Error),

    #[error("failed to encode csv report: {0}")]
    EncodingError(#[from] FromUtf8Error),

    #[error("failed to write report to {}: {source}", .path.display())]
    WriteError { path: PathBuf, source: io::Error },
}

/// Everything that can stop a complete run of the tool.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Fatal(#[from] FatalError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_fatal_errors() {
        assert_eq!(FatalError::EmptyInput.to_string(), "Empty file");

        let err = FatalError::SchemaMismatch {
            columns: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(err.to_string(), r#"Invalid CSV Columns: ["A", "B"]"#);
    }

    #[test]
    fn should_name_the_originating_stage() {
        let cause = RecordError::MissingField {
            field: "DataFattura".to_string(),
            row: 4,
        };
        let err = FatalError::at(Stage::PerRecordDateCheck)(cause);

        assert_eq!(
            err.to_string(),
            r#"unexpected fault during per-record date check: row 4 has no value for column "DataFattura""#
        );
    }
}
