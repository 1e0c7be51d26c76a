//! CLI for coderand: batch randomness analysis of short base-32 codes.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::report::OutputFormat;

#[derive(Parser)]
#[command(name = "coderand")]
#[command(about = "coderand: NIST-style randomness tests for short base-32 codes")]
#[command(version = coderand_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the nine-test battery on every code in a CSV file
    Analyze {
        /// CSV file of codes (any number per row, no header)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        format: OutputFormat,

        /// Worker threads (default: half the CPUs)
        #[arg(short, long)]
        processes: Option<usize>,

        /// Analyze only the first N codes
        #[arg(short, long)]
        limit: Option<usize>,

        /// Significance level; overrides the config file
        #[arg(long)]
        alpha: Option<f64>,

        /// JSON file with test parameters (missing fields use defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Apply the NIST 100-bit floor to the Runs test
        #[arg(long)]
        strict: bool,

        /// No progress bar or status lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the bit sequence of one or more codes
    Convert {
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Print the code for a 0/1 bit string (length a multiple of 5)
    Decode { bits: String },

    /// Generate random unique codes as CSV test data
    Generate {
        /// Number of codes
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Symbols per code
        #[arg(short, long, default_value = "10")]
        length: usize,

        /// Codes per CSV row
        #[arg(long, default_value = "5")]
        per_line: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| (n.get() / 2).max(1))
        .unwrap_or(1)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            format,
            processes,
            limit,
            alpha,
            config,
            strict,
            quiet,
        } => commands::load_config(config.as_deref(), alpha, strict).and_then(|config| {
            commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
                input: &input,
                output: output.as_deref(),
                format,
                processes: processes.unwrap_or_else(default_workers),
                limit,
                quiet,
                config,
            })
        }),
        Commands::Convert { codes } => commands::convert::run(&codes),
        Commands::Decode { bits } => commands::convert::decode(&bits),
        Commands::Generate {
            count,
            length,
            per_line,
            seed,
            output,
        } => commands::generate::run(count, length, per_line, seed, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
