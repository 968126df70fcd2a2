use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use bold_quiz::{
    DEFAULT_DURATION_MINUTES, DEFAULT_QUESTION_COUNT, ExamConfig, Quiz, QuizError, load_bank,
    sample_bank, save_bank_json,
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Question bank: a Word "Web Page" export (.htm/.html) or a .json bank
    #[arg(short, long, env = "QUIZ_BANK")]
    bank: Option<PathBuf>,

    /// Number of questions drawn for each exam
    #[arg(short = 'n', long, env = "QUIZ_QUESTION_COUNT", default_value_t = DEFAULT_QUESTION_COUNT)]
    count: usize,

    /// Time limit in minutes
    #[arg(short, long, env = "QUIZ_DURATION_MINUTES", default_value_t = DEFAULT_DURATION_MINUTES)]
    duration: u64,

    /// Write the parsed bank as JSON to this file and exit
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write logs to this file; the full-screen UI logs nothing otherwise
    #[arg(long, env = "QUIZ_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    init_tracing(log_sink(&args));

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Where tracing output goes.
#[derive(Debug, PartialEq, Eq)]
enum LogSink {
    File(PathBuf),
    Stderr,
    /// The full-screen UI owns the terminal and has no log file.
    Off,
}

fn log_sink(args: &Args) -> LogSink {
    match (&args.log_file, &args.export) {
        (Some(path), _) => LogSink::File(path.clone()),
        (None, Some(_)) => LogSink::Stderr,
        (None, None) => LogSink::Off,
    }
}

fn run(args: Args) -> Result<(), QuizError> {
    let bank = match &args.bank {
        Some(path) => load_bank(path)?,
        None => sample_bank(),
    };

    if let Some(path) = &args.export {
        save_bank_json(&bank, path)?;
        println!("Exported {} questions to {}", bank.len(), path.display());
        return Ok(());
    }

    let config = ExamConfig::new(args.count, args.duration);
    Quiz::new(bank, config).run()
}

fn init_tracing(sink: LogSink) {
    let default_filter = format!("{}=info", env!("CARGO_CRATE_NAME"));
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.clone().into());

    match sink {
        LogSink::File(path) => match File::create(&path) {
            Ok(file) => tracing_subscriber::registry()
                .with(filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init(),
            Err(e) => {
                eprintln!("Cannot open log file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        LogSink::Stderr => tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        // Raw-mode output would land on top of the UI; leave events unrecorded.
        LogSink::Off => {}
    }
}
