use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_INPUT_COLUMNS: [&str; 3] = ["NrFattura", "DataFattura", "ModalitaDiPagamento"];
pub const DEFAULT_OUTPUT_COLUMNS: [&str; 3] = ["NrFattura", "DataFattura", "DataScadenzaPagamento"];
pub const DEFAULT_TERMS_CODES: [&str; 3] = ["DF", "DFFM", "DF60"];
pub const DEFAULT_ID_FIELD: &str = "NrFattura";
pub const DEFAULT_DATE_FIELD: &str = "DataFattura";
pub const DEFAULT_TERMS_FIELD: &str = "ModalitaDiPagamento";
pub const DEFAULT_DELIMITER: u8 = b';';

/// The options a config file may set. Any option that is absent keeps its
/// default value; unknown keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub input_cols: Option<Vec<String>>,
    pub output_cols: Option<Vec<String>>,
    pub valid_modes: Option<Vec<String>>,
    pub id_field: Option<String>,
    pub date_field: Option<String>,
    pub mode_field: Option<String>,
    pub csv_delimiter: Option<String>,
}

/// Resolved settings for a single run. Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    input_columns: Vec<String>,
    output_columns: Vec<String>,
    valid_terms_codes: BTreeSet<String>,
    id_field: String,
    date_field: String,
    terms_field: String,
    delimiter: u8,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            input_columns: to_strings(&DEFAULT_INPUT_COLUMNS),
            output_columns: to_strings(&DEFAULT_OUTPUT_COLUMNS),
            valid_terms_codes: DEFAULT_TERMS_CODES.iter().map(|c| c.to_string()).collect(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            date_field: DEFAULT_DATE_FIELD.to_string(),
            terms_field: DEFAULT_TERMS_FIELD.to_string(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Configuration {
    /// Merges `overrides` over the defaults and checks the result.
    ///
    /// The delimiter must be exactly one ASCII character, and the id, date and
    /// terms fields must all be among the input columns.
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(cols) = overrides.input_cols {
            config.input_columns = cols;
        }
        if let Some(cols) = overrides.output_cols {
            config.output_columns = cols;
        }
        if let Some(modes) = overrides.valid_modes {
            config.valid_terms_codes = modes.into_iter().collect();
        }
        if let Some(field) = overrides.id_field {
            config.id_field = field;
        }
        if let Some(field) = overrides.date_field {
            config.date_field = field;
        }
        if let Some(field) = overrides.mode_field {
            config.terms_field = field;
        }
        if let Some(delimiter) = overrides.csv_delimiter {
            config.delimiter = parse_delimiter(&delimiter)?;
        }

        config.check_fields()?;
        Ok(config)
    }

    /// Reads a JSON config file. A file holding `null` or `{}` yields the
    /// defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let overrides: Option<ConfigOverrides> = serde_json::from_str(&contents)?;
        match overrides {
            Some(overrides) if overrides != ConfigOverrides::default() => {
                debug!(?overrides, "applying config overrides");
                Self::from_overrides(overrides)
            }
            _ => {
                info!("config file empty, sticking with default values");
                Ok(Self::default())
            }
        }
    }

    pub fn input_columns(&self) -> &[String] {
        &self.input_columns
    }

    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }

    pub fn valid_terms_codes(&self) -> &BTreeSet<String> {
        &self.valid_terms_codes
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn date_field(&self) -> &str {
        &self.date_field
    }

    pub fn terms_field(&self) -> &str {
        &self.terms_field
    }

    /// The delimiter as the single byte the csv reader and writer expect.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter
    }

    fn check_fields(&self) -> Result<(), ConfigError> {
        let fields = [
            ("idField", &self.id_field),
            ("dateField", &self.date_field),
            ("modeField", &self.terms_field),
        ];

        for (option, field) in fields {
            if !self.input_columns.contains(field) {
                return Err(ConfigError::UnknownField {
                    option,
                    field: field.clone(),
                });
            }
        }

        Ok(())
    }
}

fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ConfigError::InvalidDelimiter(value.to_string())),
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
