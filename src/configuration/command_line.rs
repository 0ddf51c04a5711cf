use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// Settings file. Supported: YAML, JSON, TOML, HJSON
    #[structopt(long, short = "c", parse(from_os_str), env = "SUITE_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Builds a live JUnit report from lifecycle events, one JSON object per line
    Record {
        /// Event file, standard input when omitted
        #[structopt(long, short = "i", parse(from_os_str))]
        input: Option<PathBuf>,

        /// Report file, overrides the settings
        #[structopt(long, parse(from_os_str))]
        output: Option<PathBuf>,

        /// Name of the run in the report, overrides the settings
        #[structopt(long)]
        run_name: Option<String>,

        /// Count unrecognized outcomes as aborted instead of passed
        #[structopt(long)]
        strict: bool,
    },
    /// Prints the totals of a persisted report
    Summary {
        /// JUnit report to read
        #[structopt(parse(from_os_str))]
        report: PathBuf,

        /// Writes one CSV row per case to this file
        #[structopt(long, parse(from_os_str))]
        rows: Option<PathBuf>,
    },
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
