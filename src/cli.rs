use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use eqeval::selftest::run_self_test;
use eqeval::{ParseError, build_tree, evaluate_all, evaluate_tree};
use log::{debug, info};

const PROMPT: &str = "Enter equation: ";
const INVALID_EQUATION: &str = "Error: Invalid Equation!";
/// Entered at the prompt to run the self-test catalog
const SELF_TEST_COMMAND: &str = "test";

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Eqeval - evaluate arithmetic equations
#[derive(Parser, Debug)]
#[command(name = "eqeval")]
#[command(about = "Evaluate arithmetic equations with + - * / ^, groups and unary minus")]
#[command(version)]
pub struct CliArgs {
    /// Equation to evaluate; read from stdin when omitted
    #[arg(allow_hyphen_values = true)]
    pub equation: Option<String>,

    /// Evaluate every non-blank line of a file
    #[arg(short, long, conflicts_with_all = ["equation", "self_test"])]
    pub file: Option<PathBuf>,

    /// Run the built-in self-test catalog
    #[arg(long, conflicts_with = "equation")]
    pub self_test: bool,

    /// Print the parsed tree before the result
    #[arg(long, conflicts_with_all = ["file", "self_test"])]
    pub show_tree: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// What the driver should do
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Single(Option<String>),
    Batch(PathBuf),
    SelfTest,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub mode: Mode,
    pub show_tree: bool,
    pub log_level: LogLevel,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let mode = if args.self_test {
            Mode::SelfTest
        } else if let Some(path) = args.file {
            Mode::Batch(path)
        } else {
            Mode::Single(args.equation)
        };

        CliConfig {
            mode,
            show_tree: args.show_tree,
            log_level: args.log_level,
        }
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> CliConfig {
    CliArgs::parse().into()
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
}

/// Line printed for one evaluation; the error kind is never shown
pub fn format_outcome(outcome: &Result<f64, ParseError>) -> String {
    match outcome {
        Ok(value) => format!("Result: {}", value),
        Err(e) => {
            debug!("Reporting invalid equation: {:?}", e);
            INVALID_EQUATION.to_string()
        }
    }
}

fn read_equation() -> Result<String> {
    print!("{}", PROMPT);
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read equation from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Whether text typed at the prompt asks for the self-test instead of an equation
pub fn is_self_test_request(input: &str) -> bool {
    input.trim() == SELF_TEST_COMMAND
}

fn run_single(equation: Option<String>, show_tree: bool) -> Result<()> {
    let equation = match equation {
        Some(equation) => equation,
        None => {
            let input = read_equation()?;
            if is_self_test_request(&input) {
                return run_self_test_mode();
            }
            input
        }
    };

    let outcome = build_tree(&equation).map(|tree| {
        if show_tree {
            match &tree {
                Some(root) => println!("Tree: {}", root),
                None => println!("Tree: <empty>"),
            }
        }
        evaluate_tree(tree.as_ref())
    });
    println!("{}", format_outcome(&outcome));
    Ok(())
}

fn run_batch(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read equations from {}", path.display()))?;
    let equations: Vec<&str> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    info!("Loaded {} equations from {}", equations.len(), path.display());

    for (equation, outcome) in equations.iter().zip(evaluate_all(&equations)) {
        println!("{} => {}", equation.trim(), format_outcome(&outcome));
    }
    Ok(())
}

fn run_self_test_mode() -> Result<()> {
    let report = run_self_test();
    for outcome in &report.outcomes {
        if outcome.passed {
            println!("[PASS] {}", outcome.title);
        } else {
            println!("[FAIL] {} - {}", outcome.title, outcome.detail);
        }
    }
    println!("{} passed, {} failed", report.passed(), report.failed());

    if report.all_passed() {
        Ok(())
    } else {
        anyhow::bail!("{} self-test cases failed", report.failed())
    }
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args();

    // Initialize logging
    init_logging(&config.log_level);

    match config.mode {
        Mode::Single(equation) => run_single(equation, config.show_tree),
        Mode::Batch(path) => run_batch(&path),
        Mode::SelfTest => run_self_test_mode(),
    }
}
