use anyhow::Result;
use clap::Parser;
use log::{ info, warn };

use govprop::{ EngineConfig, PropertyCategory, PropertyEngine };

mod cli;
use cli::{ commands, ui, Commands, GovpropCli };
use cli::commands::run::Selection;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading any GOVPROP_* variables
    dotenv::dotenv().ok();

    // Parse the command line arguments
    let cli = GovpropCli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    config.apply_env()?;

    // Setup logging: command line, then config file, then info
    let log_level = cli.log_level.clone().or_else(|| config.log_level.clone()).unwrap_or_else(|| "info".to_string());
    setup_logging(&log_level);

    let json = match cli.output_format.to_lowercase().as_str() {
        "json" => true,
        "text" => false,
        other => {
            warn!("Unknown output format '{}', falling back to text", other);
            false
        }
    };

    let mut options = config.engine.clone();
    if let Commands::Run { seed, iterations, parallel, .. } = &cli.command {
        if seed.is_some() {
            options.seed = *seed;
        }
        if iterations.is_some() {
            options.iterations = *iterations;
        }
        options.parallel |= *parallel;
    }

    let mut engine = PropertyEngine::with_options(options);
    cli::suite::register(&mut engine, &config)?;
    info!("Registered {} property test(s)", engine.test_count());

    let success = match &cli.command {
        Commands::Run { test, category, .. } => {
            let selection = match (test, category) {
                (Some(test), _) => Selection::Test(test.clone()),
                (None, Some(category)) => Selection::Category(PropertyCategory::parse(category)),
                (None, None) => Selection::All,
            };
            commands::run::execute(&engine, selection, json).await?
        }
        Commands::List { what } => {
            commands::list::execute(&engine, what, json)?;
            true
        }
        Commands::Replay { reproduction } => {
            commands::replay::execute(&engine, reproduction, json).await?
        }
    };

    if !success {
        if !json {
            ui::print_info("Exiting with status 1");
        }
        std::process::exit(1);
    }
    Ok(())
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
