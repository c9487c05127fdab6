//! Sentinel Invest CLI
//!
//! Command-line dashboard for cybersecurity investment analytics: asset
//! inventory, threat landscape, framework maturity, budget allocation, and
//! long-running dashboard operations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use siv_core::{OperationTracker, RecordStore};
use std::path::{Path, PathBuf};

mod commands;
mod config;

use commands::{
    cmd_assets_list, cmd_assets_summary, cmd_framework_list, cmd_framework_summary,
    cmd_investments_list, cmd_investments_summary, cmd_run, cmd_threats_list,
    cmd_threats_summary, print_json, OutputFormat,
};
use config::AppConfig;

#[derive(Parser)]
#[command(name = "siv")]
#[command(author = "Sentinel Invest Team")]
#[command(version)]
#[command(about = "Cybersecurity investment analytics dashboard", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the asset inventory
    Assets {
        #[command(subcommand)]
        action: AssetCommands,
    },

    /// Query the threat landscape
    Threats {
        #[command(subcommand)]
        action: ThreatCommands,
    },

    /// Query framework maturity scores
    Framework {
        #[command(subcommand)]
        action: FrameworkCommands,
    },

    /// Query the security budget allocation
    Investments {
        #[command(subcommand)]
        action: InvestmentCommands,
    },

    /// Run a dashboard operation (refresh, analysis, optimization, report)
    Run {
        /// Operation name
        operation: String,
    },

    /// Show current configuration
    Config,

    /// Validate configuration and the configured snapshot
    Validate,
}

#[derive(Subcommand)]
enum AssetCommands {
    /// List assets matching a search term and selectors
    List {
        /// Case-insensitive text matched against name, id, and owner
        #[arg(short, long)]
        search: Option<String>,

        /// Asset type (server, database, network, endpoint, or all)
        #[arg(short = 't', long = "type")]
        asset_type: Option<String>,

        /// Criticality (low, medium, high, critical, or all)
        #[arg(short, long)]
        criticality: Option<String>,
    },

    /// Show statistics over the whole inventory
    Summary,
}

#[derive(Subcommand)]
enum ThreatCommands {
    /// List threats matching a search term and selector
    List {
        /// Case-insensitive text matched against the threat name
        #[arg(short, long)]
        search: Option<String>,

        /// Lower-cased threat name, or all
        #[arg(short, long)]
        threat: Option<String>,
    },

    /// Show statistics over the whole threat landscape
    Summary,
}

#[derive(Subcommand)]
enum FrameworkCommands {
    /// List framework functions with their control categories
    List {
        /// Case-insensitive text matched against function and category names
        #[arg(short, long)]
        search: Option<String>,

        /// Function id (identify, protect, detect, respond, recover, or all)
        #[arg(short, long)]
        function: Option<String>,

        /// Maturity tier (initial, developing, mature, or all)
        #[arg(short, long)]
        maturity: Option<String>,
    },

    /// Show maturity statistics over every function
    Summary,
}

#[derive(Subcommand)]
enum InvestmentCommands {
    /// List investment categories
    List {
        /// Case-insensitive text matched against the category name
        #[arg(short, long)]
        search: Option<String>,

        /// Residual risk (low, medium, high, or all)
        #[arg(short, long)]
        risk: Option<String>,

        /// Total budget, overriding the configured one
        #[arg(short, long)]
        budget: Option<u64>,
    },

    /// Show budget allocation over every category
    Summary {
        /// Total budget, overriding the configured one
        #[arg(short, long)]
        budget: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let loaded = AppConfig::load(&config_path);

    // Initialize logging
    let logging = match &loaded {
        Ok(Some(config)) => config.logging.clone(),
        _ => Default::default(),
    };
    siv_observability::init_logging_with_config(logging.subscriber_config(cli.verbose));

    // `validate` reloads the file itself and reports any error.
    let config = match loaded {
        Ok(Some(config)) => {
            tracing::debug!(path = %config_path.display(), "configuration loaded");
            config
        }
        Ok(None) => {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            if cli.verbose {
                eprintln!("Using default configuration (no config file found)");
            }
            AppConfig::default()
        }
        Err(_) if matches!(cli.command, Commands::Validate) => AppConfig::default(),
        Err(e) => return Err(e),
    };

    // Execute command
    match cli.command {
        Commands::Assets { action } => {
            let stores = config.load_stores()?;
            match action {
                AssetCommands::List {
                    search,
                    asset_type,
                    criticality,
                } => cmd_assets_list(&stores.assets, search, asset_type, criticality, cli.format),
                AssetCommands::Summary => cmd_assets_summary(&stores.assets, cli.format),
            }
        }
        Commands::Threats { action } => {
            let stores = config.load_stores()?;
            match action {
                ThreatCommands::List { search, threat } => {
                    cmd_threats_list(&stores.threats, search, threat, cli.format)
                }
                ThreatCommands::Summary => cmd_threats_summary(&stores.threats, cli.format),
            }
        }
        Commands::Framework { action } => {
            let stores = config.load_stores()?;
            match action {
                FrameworkCommands::List {
                    search,
                    function,
                    maturity,
                } => cmd_framework_list(&stores.framework, search, function, maturity, cli.format),
                FrameworkCommands::Summary => cmd_framework_summary(&stores.framework, cli.format),
            }
        }
        Commands::Investments { action } => {
            let stores = config.load_stores()?;
            let configured = config.investments.budget;
            match action {
                InvestmentCommands::List {
                    search,
                    risk,
                    budget,
                } => cmd_investments_list(
                    &stores.investments,
                    search,
                    risk,
                    budget.unwrap_or(configured),
                    cli.format,
                ),
                InvestmentCommands::Summary { budget } => cmd_investments_summary(
                    &stores.investments,
                    budget.unwrap_or(configured),
                    cli.format,
                ),
            }
        }
        Commands::Run { operation } => {
            let tracker = OperationTracker::new();
            cmd_run(
                &tracker,
                &operation,
                config.operations.simulate_delays,
                cli.format,
            )
            .await
        }
        Commands::Config => cmd_config(&config, &config_path, cli.format),
        Commands::Validate => cmd_validate(&config_path, cli.format),
    }
}

fn default_config_path() -> PathBuf {
    if let Some(dirs) = directories::ProjectDirs::from("com", "sentinel-invest", "siv") {
        dirs.config_dir().join("config.yaml")
    } else {
        PathBuf::from("config/default.yaml")
    }
}

fn cmd_config(config: &AppConfig, config_path: &Path, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(config);
    }

    println!("{}", "Current Configuration".bold());
    println!("─────────────────────────");
    println!("Config File: {}", config_path.display());
    match &config.data.snapshot_path {
        Some(path) => println!("Snapshot: {}", path.display()),
        None => println!("Snapshot: {}", "built-in sample data".yellow()),
    }
    println!("Simulate Delays: {}", config.operations.simulate_delays);
    println!("Budget: ${}", config.investments.budget);
    println!("Log Level: {}", config.logging.level);
    println!("JSON Logs: {}", config.logging.json_format);
    Ok(())
}

fn cmd_validate(config_path: &Path, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Text {
        println!(
            "Validating configuration: {}",
            config_path.display().to_string().cyan()
        );
    }

    let (config, stores) = match AppConfig::validate_file(config_path) {
        Ok(validated) => validated,
        Err(e) => {
            tracing::warn!(error = %e, "configuration is invalid");
            if format == OutputFormat::Json {
                let error = format!("{:#}", e);
                print_json(&serde_json::json!({ "valid": false, "error": error }))?;
            } else {
                println!("{}: {:#}", "Configuration error".red().bold(), e);
            }
            std::process::exit(1);
        }
    };

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "valid": true,
            "assets": stores.assets.len(),
            "threats": stores.threats.len(),
            "framework": stores.framework.len(),
            "investments": stores.investments.len(),
        }));
    }

    println!();
    println!("{}", "Configuration Summary".bold());
    println!("─────────────────────");
    match &config.data.snapshot_path {
        Some(path) => println!("  Snapshot: {}", path.display()),
        None => println!("  Snapshot: built-in sample data"),
    }
    println!("  Assets: {}", stores.assets.len());
    println!("  Threats: {}", stores.threats.len());
    println!("  Framework Functions: {}", stores.framework.len());
    println!("  Investment Categories: {}", stores.investments.len());
    println!();
    println!("{}", "Configuration is valid.".green().bold());
    Ok(())
}
