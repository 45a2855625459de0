use anyhow::Result;
use clap::{Parser, Subcommand};

use stockdash::{cli, config, logging};

#[derive(Debug, Parser)]
#[command(name = "stockdash")]
#[command(about = "Terminal dashboard for warehouse and stock statistics")]
struct App {
    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for data commands: table (default), json, csv
    #[arg(long, default_value = "table", global = true)]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Warehouse, product and store counts with brand and country shares
    Overview,
    /// Inventory by size: top categories as a chart
    Sizes {
        /// Show every size as a table instead of the chart
        #[arg(long)]
        all: bool,
    },
    /// Products with the highest total quantity
    Products,
    /// Warehouses and how many shipments each sends
    Warehouses,
    /// Shipment summary for one warehouse
    Warehouse {
        /// Warehouse identifier
        id: String,
    },
    /// Pick warehouses interactively
    Browse,
    /// Every widget at once; failing widgets are shown inline
    Dashboard,
    /// Ask the assistant a question about the inventory
    Ask {
        /// The question text
        #[arg(trailing_var_arg = true, required = true)]
        question: Vec<String>,
    },
    /// Show the assistant's precomputed insights
    Insights,
    /// Show recently asked questions
    History {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Check API reachability, config and history files
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default config file to ~/.stockdash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set one value, e.g. `api.base_url http://localhost:5000`
    Set { key: String, value: String },
    /// Reset the global config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let config = config::load();

    logging::init_logging(app.verbose, &config.logging.level);
    cli::apply_color_mode(config.display.color);

    let fmt = cli::OutputFormat::from_str_opt(Some(&app.format));

    match app.command {
        Commands::Overview => cli::run_overview(&config, fmt),
        Commands::Sizes { all } => cli::run_sizes(&config, fmt, all),
        Commands::Products => cli::run_products(&config, fmt),
        Commands::Warehouses => cli::run_warehouses(&config, fmt),
        Commands::Warehouse { id } => cli::run_warehouse(&config, fmt, &id),
        Commands::Browse => cli::browse::run(&config),
        Commands::Dashboard => cli::run_dashboard(&config),
        Commands::Ask { question } => {
            let question = question.join(" ");
            cli::run_ask(&config, fmt, &question)
        }
        Commands::Insights => cli::run_insights(&config),
        Commands::History { limit } => cli::run_history(&config, fmt, limit),
        Commands::Health => cli::run_health(&config),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
