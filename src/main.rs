#[macro_use]
extern crate log;

use log::LevelFilter;
use signal_hook::{iterator::Signals, SIGINT};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::{process::exit, thread};
use structopt::StructOpt;

use suite_report::app::{self, App};
use suite_report::configuration::command_line::{Command, LogLevel, Opt};
use suite_report::configuration::constants::common::INTERRUPTED_EXIT_CODE;
use suite_report::configuration::settings::Settings;
use suite_report::{OutcomePolicy, ReportTree};

fn main() {
    let options = Opt::from_args();

    if let Err(e) = init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
        exit(2);
    }
    watch_signals();

    let settings = match Settings::load(options.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings {}", e);
            exit(2);
        }
    };
    debug!("Initiated configuration {:#?}", settings);

    let code = match options.command {
        Command::Record {
            input,
            output,
            run_name,
            strict,
        } => {
            let mut report = settings.report;
            if let Some(output) = output {
                report.path = output;
            }
            if let Some(run_name) = run_name {
                report.run_name = run_name;
            }
            if strict {
                report.outcome_policy = OutcomePolicy::Strict;
            }
            info!("Writing report to {}", report.path.display());
            record(ReportTree::from_settings(&report), input)
        }
        Command::Summary { report, rows } => summary(&report, rows),
    };
    exit(code);
}

fn record(tree: ReportTree, input: Option<PathBuf>) -> i32 {
    let mut app = App::new(tree);
    let summary = match input {
        Some(path) => match File::open(&path) {
            Ok(file) => app.run(BufReader::new(file)),
            Err(e) => {
                error!("Cannot open event file {}: {}", path.display(), e);
                return 1;
            }
        },
        None => {
            let stdin = io::stdin();
            let locked = stdin.lock();
            app.run(locked)
        }
    };
    println!("{}", summary);
    0
}

fn summary(report: &Path, rows: Option<PathBuf>) -> i32 {
    match app::summarize(report, rows.as_deref()) {
        Ok(parsed) => {
            for case in &parsed.cases {
                println!(
                    "{:<8} {:>10.2}s  {}::{}",
                    case.outcome.label(),
                    case.elapsed_seconds,
                    case.suite,
                    case.name
                );
            }
            println!("{}", parsed.summary());
            0
        }
        Err(e) => {
            error!("Failed to read report {}", e);
            1
        }
    }
}

// Every event is flushed as it arrives, so the snapshot on disk is valid when interrupted.
fn watch_signals() {
    let signals = match Signals::new(&[SIGINT]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Cannot watch for interrupts: {}", e);
            return;
        }
    };
    thread::spawn(move || {
        for sig in signals.forever() {
            info!("Received signal {:?}, stopping", sig);
            exit(INTERRUPTED_EXIT_CODE);
        }
    });
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
