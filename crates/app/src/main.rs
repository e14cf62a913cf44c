use std::fmt;
use std::time::Duration;

use exam_core::Clock;
use exam_core::model::TestType;
use services::{ExamLoopService, FeedbackService, SessionSnapshot};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTestType { raw: String },
    InvalidRate { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTestType { raw } => write!(f, "invalid --test value: {raw}"),
            ArgsError::InvalidRate { raw } => write!(f, "invalid --rate value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- sections [--test <ielts|tef-canada|opic>]");
    eprintln!("  cargo run -p app -- simulate [--test <ielts|tef-canada|opic>] [--rate <ticks/sec>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --test ielts");
    eprintln!("  --rate 0   (unpaced: run the whole attempt immediately)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAMPREP_TEST, EXAMPREP_FEEDBACK_API_KEY, EXAMPREP_FEEDBACK_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Sections,
    Simulate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "sections" => Some(Self::Sections),
            "simulate" => Some(Self::Simulate),
            _ => None,
        }
    }
}

struct Args {
    test_type: TestType,
    ticks_per_sec: u32,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut test_type = std::env::var("EXAMPREP_TEST")
            .ok()
            .and_then(|value| value.parse::<TestType>().ok())
            .unwrap_or(TestType::Ielts);
        let mut ticks_per_sec = 0;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--test" => {
                    let value = require_value(args, "--test")?;
                    test_type = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTestType { raw: value.clone() })?;
                }
                "--rate" => {
                    let value = require_value(args, "--rate")?;
                    ticks_per_sec = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidRate { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            test_type,
            ticks_per_sec,
        })
    }
}

fn print_sections(test_type: TestType) {
    let catalog = test_type.catalog();
    println!("{test_type}: {} sections", catalog.len());
    for section in catalog.iter() {
        println!(
            "  {:<22} {:>5}s  {:>3} questions  ({})",
            section.id(),
            section.duration_secs(),
            section.question_count(),
            section.title()
        );
    }
    println!("total: {}s", catalog.total_duration_secs());
}

fn print_transition(snapshot: &SessionSnapshot) {
    println!(
        "→ section {} ({}), {}s on the clock, {} questions",
        snapshot.section_index + 1,
        snapshot.section_title,
        snapshot.section_remaining_secs,
        snapshot.question_count
    );
}

async fn simulate(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let svc = ExamLoopService::new(Clock::default_clock(), FeedbackService::from_env());
    let mut session = svc.start_attempt(args.test_type)?;

    println!(
        "attempt {} ({}) started: {}s total",
        session.attempt_id(),
        args.test_type,
        session.total_remaining_secs()
    );
    print_transition(&SessionSnapshot::from_session(&session));

    let mut pacing = (args.ticks_per_sec > 0)
        .then(|| tokio::time::interval(Duration::from_secs(1) / args.ticks_per_sec));

    let mut section_index = session.current_section_index();
    while !session.is_complete() {
        if let Some(interval) = pacing.as_mut() {
            interval.tick().await;
        }
        let snapshot = svc.tick(&mut session)?;
        if snapshot.section_index != section_index {
            section_index = snapshot.section_index;
            print_transition(&snapshot);
        }
    }

    println!(
        "attempt finished: {} after {}s, {} answers recorded",
        session.status(),
        session.elapsed_secs(),
        session.answers().len()
    );
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Simulate,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Simulate,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match cmd {
        Command::Sections => {
            print_sections(args.test_type);
            Ok(())
        }
        Command::Simulate => simulate(&args).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
