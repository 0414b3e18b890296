use crate::batch::OutputRow;
use crate::config::Configuration;
use crate::errors::ReportError;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

const OUTPUT_PREFIX: &str = "DSP_";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Renders the output header followed by every row, using the configured
/// delimiter.
pub fn render_report(config: &Configuration, rows: &[OutputRow]) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    {
        // The header comes from the configuration rather than from the
        // OutputRow field names, so the writer must not emit its own. The
        // configured header may have more or fewer than three columns.
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(config.delimiter_byte())
            .flexible(true)
            .has_headers(false)
            .from_writer(&mut buf);

        wtr.write_record(config.output_columns())?;
        for row in rows {
            wtr.serialize(row)?;
        }

        wtr.flush().map_err(csv::Error::from)?;
    }

    // Return the string contents of our buffer, bubbling up any UTF-8
    // encoding errors we encounter.
    Ok(String::from_utf8(buf)?)
}

/// Writes the rendered report to `path`, replacing any existing file.
pub fn write_report(
    path: &Path,
    config: &Configuration,
    rows: &[OutputRow],
) -> Result<(), ReportError> {
    let report = render_report(config, rows)?;

    fs::write(path, report).map_err(|source| ReportError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the default output path for `input`: a `DSP_` prefixed,
/// timestamped CSV file next to the input file.
///
/// `invoices.csv` processed at 2019-05-14 10:30:00 becomes
/// `DSP_invoices_2019-05-14_10-30-00.csv`.
pub fn output_file_name(input: &Path, now: NaiveDateTime) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!(
        "{}{}_{}.csv",
        OUTPUT_PREFIX,
        stem,
        now.format(TIMESTAMP_FORMAT)
    );

    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
