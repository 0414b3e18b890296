use invoice_due_dates::args::Args;
use invoice_due_dates::logging::{init_logging, LogConfig};
use invoice_due_dates::run::{execute, RunOptions};
use std::process;
use tracing::{error, info};

const SYS_ERROR: i32 = 1;
const FILE_NOT_SPECIFIED_ERROR: i32 = 3;

fn main() {
    let args = Args::parse();

    let log_config = LogConfig::from_verbosity(args.verbosity).with_log_file(args.log_file);
    if let Err(err) = init_logging(&log_config) {
        eprintln!("failed to initialize logging: {}", err);
        process::exit(SYS_ERROR);
    }
    info!("process start");

    let input_file = match args.input_file {
        Some(path) => path,
        None => {
            error!("parameter --inputfile not specified, try `due-dates --help`");
            process::exit(FILE_NOT_SPECIFIED_ERROR);
        }
    };

    info!(
        input = %input_file.display(),
        config = ?args.config_file,
        "starting due date computation"
    );
    let options = RunOptions {
        input_file,
        config_file: args.config_file,
        output_file: args.output_file,
    };

    match execute(&options) {
        Ok(output) => {
            info!(output = %output.display(), "output file written");
            info!("process end");
        }
        Err(err) => {
            error!("error while processing file: {}", err);
            process::exit(SYS_ERROR);
        }
    }
}
