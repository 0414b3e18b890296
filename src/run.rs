use crate::batch;
use crate::config::Configuration;
use crate::engine::Pipeline;
use crate::errors::RunError;
use crate::report;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything needed for one run of the tool.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub input_file: PathBuf,
    pub config_file: Option<PathBuf>,
    /// Defaults to [`report::output_file_name`] when unset.
    pub output_file: Option<PathBuf>,
}

/// Loads the configuration, reads the input file, runs the pipeline and
/// writes the report, returning the path of the written file.
///
/// Nothing is written unless every step before it succeeded.
pub fn execute(options: &RunOptions) -> Result<PathBuf, RunError> {
    let config = load_config(options.config_file.as_deref())?;

    info!(input = %options.input_file.display(), "importing input file");
    let batch = batch::read_batch(&options.input_file, config.delimiter_byte())?;

    info!("parsing input and preparing output");
    let rows = Pipeline::new(&config).run(batch)?;

    let output = match &options.output_file {
        Some(path) => path.clone(),
        None => report::output_file_name(&options.input_file, Local::now().naive_local()),
    };
    info!(output = %output.display(), rows = rows.len(), "saving output");
    report::write_report(&output, &config, &rows)?;

    Ok(output)
}

fn load_config(path: Option<&Path>) -> Result<Configuration, RunError> {
    match path {
        Some(path) => {
            info!(config = %path.display(), "importing config file");
            Ok(Configuration::from_path(path)?)
        }
        None => {
            info!("no config file given, using default values");
            Ok(Configuration::default())
        }
    }
}
