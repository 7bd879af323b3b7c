use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use solq::ast::parse_locations;
use solq::config::{self, SolqConfig};
use solq::frontend::{parse_file, InputFormat, ParseOptions};
use solq::{compare_asts, functions_at_locations, list_functions, Node};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solq")]
#[command(about = "Structural queries over Solidity syntax trees", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $SOLQ_CONFIG, then ./solq.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Input format, overriding the config file
    #[arg(short, long, global = true, value_enum)]
    format: Option<InputFormat>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the functions defined in a contract as a JSON array
    Functions {
        /// Source file
        source: PathBuf,

        /// Contract whose functions are listed
        contract: String,
    },

    /// Print the `Contract.function` names covered by source locations
    Covered {
        /// Source file
        source: PathBuf,

        /// JSON array of `{line, column?}` points or `{start, end}` ranges
        locations: String,
    },

    /// Print whether two sources are identical once comments and formatting are ignored
    Compare {
        /// First source file
        first: PathBuf,

        /// Second source file
        second: PathBuf,

        /// Only compare this contract
        contract: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the result.
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<String> {
    let config = config::discover(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.parse.format);

    match cli.command {
        Commands::Functions { source, contract } => cmd_functions(&source, &contract, format),
        Commands::Covered { source, locations } => cmd_covered(&source, &locations, format),
        Commands::Compare {
            first,
            second,
            contract,
        } => cmd_compare(&config, &first, &second, contract.as_deref(), format),
    }
}

fn load(path: &Path, format: InputFormat, options: ParseOptions) -> Result<Node> {
    parse_file(path, format, options)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn cmd_functions(source: &Path, contract: &str, format: InputFormat) -> Result<String> {
    let tree = load(source, format, ParseOptions::default())?;
    let names = list_functions(&tree, contract);
    Ok(serde_json::to_string(&names)?)
}

fn cmd_covered(source: &Path, locations: &str, format: InputFormat) -> Result<String> {
    let locations = parse_locations(locations).context("Invalid locations argument")?;
    let tree = load(source, format, ParseOptions::with_locations())?;
    let names = functions_at_locations(&tree, &locations)
        .with_context(|| format!("Malformed syntax tree for {}", source.display()))?;
    Ok(serde_json::to_string(&names)?)
}

fn cmd_compare(
    config: &SolqConfig,
    first: &Path,
    second: &Path,
    contract: Option<&str>,
    format: InputFormat,
) -> Result<String> {
    if format.resolve(Some(first)) != format.resolve(Some(second)) {
        warn!(
            first = %first.display(),
            second = %second.display(),
            "inputs use different front ends; their trees will not compare equal"
        );
    }

    let a = load(first, format, ParseOptions::default())?;
    let b = load(second, format, ParseOptions::default())?;
    let equal = compare_asts(&a, &b, contract, &config.prune_kinds())?;
    Ok(equal.to_string())
}
