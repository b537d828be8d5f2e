use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod suite;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "govprop",
    about = "Property-based testing engine for board-governance invariants",
    version,
    author,
    long_about = None
)]
pub struct GovpropCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Path to YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run property tests (all by default)
    Run {
        /// Run a single test by id
        #[arg(short, long, conflicts_with = "category")]
        test: Option<String>,

        /// Run every test in a category (governance, business, security, data, performance, compliance)
        #[arg(short = 'k', long)]
        category: Option<String>,

        /// Base seed for deterministic runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Override the iteration bound of every test
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Run independent tests on separate worker tasks
        #[arg(short, long, default_value = "false")]
        parallel: bool,
    },

    /// List registered tests and generators
    List {
        /// What to list (tests, generators, all)
        #[arg(default_value = "all")]
        what: String,
    },

    /// Re-check a counterexample from its reproduction string
    Replay {
        /// Reproduction string exactly as reported by `run`
        reproduction: String,
    },
}
