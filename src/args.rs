use clap::{App, Arg, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct Args {
    pub input_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub verbosity: u64,
}

impl Args {
    pub fn parse() -> Self {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        // --inputfile is validated by the caller rather than marked required,
        // so that a missing input file gets its own exit code.
        let matches = App::new("due-dates")
            .version("0.1.0")
            .about("Computes payment due dates for a file of invoices")
            .arg(Arg::with_name("inputfile")
                .long("inputfile").takes_value(true).value_name("PATH")
                .help("input file name"))
            .arg(Arg::with_name("conf")
                .long("conf").takes_value(true).value_name("PATH")
                .help("config file name"))
            .arg(Arg::with_name("output")
                .long("output").takes_value(true).value_name("PATH")
                .help("output file name (default: DSP_<input>_<timestamp>.csv next to the input)"))
            .arg(Arg::with_name("log-file")
                .long("log-file").takes_value(true).value_name("PATH")
                .help("append logs to this file instead of stderr"))
            .arg(Arg::with_name("verbose")
                .short("v").multiple(true)
                .help("more detailed logging (-v debug, -vv trace)"))
            .get_matches_from(args);

        Self {
            input_file: path_of(&matches, "inputfile"),
            config_file: path_of(&matches, "conf"),
            output_file: path_of(&matches, "output"),
            log_file: path_of(&matches, "log-file"),
            verbosity: matches.occurrences_of("verbose"),
        }
    }
}

/// Empty values are treated as absent.
fn path_of(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches
        .value_of_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
