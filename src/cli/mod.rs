//! CLI command implementations for stockdash.
//!
//! Provides subcommand handlers for:
//! - `stockdash overview`: basic counts, brand and country distributions
//! - `stockdash sizes [--all]`: inventory-by-size chart or full table
//! - `stockdash products`: top products by quantity
//! - `stockdash warehouses` / `warehouse <ID>`: shipment lists and detail
//! - `stockdash browse`: interactive warehouse browser
//! - `stockdash dashboard`: every widget at once
//! - `stockdash ask` / `insights` / `history`: assistant
//! - `stockdash health`: API reachability, config and history files
//! - `stockdash config show|init|set|reset`: configuration management

pub mod browse;

use std::io::IsTerminal;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::models::{ProductQuantity, WarehouseList};
use crate::api::{ApiClient, StatsSource};
use crate::assistant::{self, AskError, history};
use crate::config::schema::ColorMode;
use crate::config::{self, StockdashConfig};
use crate::dashboard::{self, Overview, WidgetError};
use crate::metrics::distribution::{ChartSlice, SizeRow};
use crate::view::render;
use crate::view::{DetailState, Viewport, WarehouseView};

/// Output format for data commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Apply the configured color mode to every `colored` string.
pub fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {
            if !std::io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn client(config: &StockdashConfig) -> ApiClient {
    ApiClient::from_config(&config.api)
}

fn layout(config: &StockdashConfig) -> crate::view::Layout {
    Viewport::current().layout(config.display.compact_width)
}

/// Print the "no data" notice for an empty widget, or pass the error on.
fn empty_or_fail<T>(result: Result<T, WidgetError>, what: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(WidgetError::Empty) => {
            println!("{}", format!("No {what} data available.").yellow());
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("could not load {what}")),
    }
}

// ---------------------------------------------------------------------------
// stockdash overview
// ---------------------------------------------------------------------------

pub fn run_overview(config: &StockdashConfig, format: OutputFormat) -> Result<()> {
    let overview = dashboard::load_overview(&client(config)).context("could not load overview")?;

    match format {
        OutputFormat::Json => print_overview_json(&overview)?,
        OutputFormat::Csv => print_overview_csv(&overview),
        OutputFormat::Table => print!(
            "{}",
            render::overview(&overview.basic, &overview.brands, &overview.countries)
        ),
    }

    Ok(())
}

fn print_overview_json(overview: &Overview) -> Result<()> {
    let value = serde_json::json!({
        "basic": overview.basic,
        "brands": overview.brands,
        "countries": overview.countries,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_overview_csv(overview: &Overview) {
    println!("section,name,count,percent");
    println!("basic,warehouses,{},", overview.basic.warehouse_count);
    println!("basic,products,{},", overview.basic.product_count);
    println!("basic,stores,{},", overview.basic.store_count);
    for line in &overview.brands {
        println!("brand,{},{},{}", csv_field(&line.name), line.count, line.percent);
    }
    for line in &overview.countries {
        println!("country,{},{},{}", csv_field(&line.name), line.count, line.percent);
    }
}

// ---------------------------------------------------------------------------
// stockdash sizes
// ---------------------------------------------------------------------------

pub fn run_sizes(config: &StockdashConfig, format: OutputFormat, all: bool) -> Result<()> {
    let client = client(config);

    if all {
        let result = dashboard::load_size_table(&client);
        let Some(rows) = empty_or_fail(result, "inventory")? else {
            return Ok(());
        };
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Csv => print_size_rows_csv(&rows),
            OutputFormat::Table => print!("{}", render::size_table(&rows)),
        }
        return Ok(());
    }

    let result = dashboard::load_size_chart(&client, config.display.chart_slices);
    let Some(slices) = empty_or_fail(result, "inventory")? else {
        return Ok(());
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&slices)?),
        OutputFormat::Csv => print_slices_csv(&slices),
        OutputFormat::Table => print!(
            "{}",
            render::size_chart(&slices, layout(config), config.display.bar_width)
        ),
    }

    Ok(())
}

fn print_slices_csv(slices: &[ChartSlice]) {
    println!("size,quantity,share");
    for slice in slices {
        println!("{},{},{}", csv_field(&slice.label), slice.quantity, slice.share);
    }
}

fn print_size_rows_csv(rows: &[SizeRow]) {
    println!("size,quantity,percent");
    for row in rows {
        println!("{},{},{}", csv_field(&row.size), row.quantity, row.percent);
    }
}

// ---------------------------------------------------------------------------
// stockdash products
// ---------------------------------------------------------------------------

pub fn run_products(config: &StockdashConfig, format: OutputFormat) -> Result<()> {
    let result = dashboard::load_top_products(&client(config));
    let Some(products) = empty_or_fail(result, "product")? else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&products)?),
        OutputFormat::Csv => print_products_csv(&products),
        OutputFormat::Table => print!("{}", render::top_products(&products)),
    }

    Ok(())
}

fn print_products_csv(products: &[ProductQuantity]) {
    println!("rank,product_id,quantity");
    for (i, product) in products.iter().enumerate() {
        println!("{},{},{}", i + 1, csv_field(&product.id), product.quantity);
    }
}

// ---------------------------------------------------------------------------
// stockdash warehouses | warehouse <ID>
// ---------------------------------------------------------------------------

pub fn run_warehouses(config: &StockdashConfig, format: OutputFormat) -> Result<()> {
    let result = dashboard::load_warehouses(&client(config));
    let Some(list) = empty_or_fail(result, "warehouse")? else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => print_warehouses_json(&list)?,
        OutputFormat::Csv => {
            println!("warehouse_id,shipments");
            for warehouse in &list.warehouses {
                println!(
                    "{},{}",
                    csv_field(&warehouse.warehouse_id),
                    warehouse.shipments.len()
                );
            }
        }
        OutputFormat::Table => print!("{}", render::warehouse_list(&list)),
    }

    Ok(())
}

fn print_warehouses_json(list: &WarehouseList) -> Result<()> {
    let value: Vec<_> = list
        .warehouses
        .iter()
        .map(|w| {
            serde_json::json!({
                "warehouse_id": w.warehouse_id,
                "shipments": w.shipments.len(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Load one warehouse through the detail state machine and print the result.
pub fn run_warehouse(config: &StockdashConfig, format: OutputFormat, id: &str) -> Result<()> {
    let client = client(config);
    let mut view = WarehouseView::with_limits(config.display.top_products, config.display.top_sizes);

    let token = view.select(id);
    view.resolve(token, client.warehouse_detail(id));

    match view.state() {
        DetailState::Error {
            warehouse_id,
            error,
        } => Err(error.clone()).with_context(|| format!("could not load warehouse {warehouse_id}")),
        DetailState::Loaded {
            warehouse_id,
            summary,
            stores,
            ..
        } => {
            match format {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "warehouse_id": warehouse_id,
                        "summary": summary,
                        "stores": stores,
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Csv => {
                    println!("store_id,product_lines,size_units");
                    for store in stores {
                        println!(
                            "{},{},{}",
                            csv_field(&store.store_id),
                            store.product_lines,
                            store.size_units
                        );
                    }
                }
                OutputFormat::Table => {
                    print!("{}", render::warehouse_detail(warehouse_id, summary, stores));
                }
            }
            Ok(())
        }
        state => {
            match format {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "warehouse_id": id,
                        "state": state.name(),
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Csv => println!("store_id,product_lines,size_units"),
                OutputFormat::Table => print!("{}", render::detail_state(state)),
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// stockdash dashboard
// ---------------------------------------------------------------------------

/// Every widget, loaded concurrently. Failed widgets show inline errors.
pub fn run_dashboard(config: &StockdashConfig) -> Result<()> {
    let board = dashboard::load_all(&client(config), &config.display);
    print!("{}", board.render(layout(config), config.display.bar_width));

    let failed = board.failed_count();
    if failed > 0 {
        println!();
        println!(
            "  {} {} widget(s) could not be loaded; run with -v for details",
            "Note:".dimmed(),
            failed
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// stockdash ask | insights | history
// ---------------------------------------------------------------------------

pub fn run_ask(config: &StockdashConfig, format: OutputFormat, question: &str) -> Result<()> {
    let history_path = history_path(config);

    let answer = match assistant::ask(&client(config), question, history_path.as_deref()) {
        Ok(answer) => answer,
        Err(AskError::EmptyQuestion) => {
            anyhow::bail!("please type a question first");
        }
        Err(e) => return Err(e).context("the assistant could not answer"),
    };

    match format {
        OutputFormat::Json | OutputFormat::Csv => {
            let value = serde_json::json!({
                "question": question.trim(),
                "answer_html": answer,
                "answer_text": crate::view::html::to_text(&answer),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => print!("{}", render::assistant_text("Answer", &answer)),
    }

    Ok(())
}

pub fn run_insights(config: &StockdashConfig) -> Result<()> {
    let result = dashboard::load_insights(&client(config));
    let Some(html) = empty_or_fail(result, "insights")? else {
        return Ok(());
    };
    print!("{}", render::assistant_text("Insights", &html));
    Ok(())
}

fn history_path(config: &StockdashConfig) -> Option<std::path::PathBuf> {
    if !config.logging.history {
        return None;
    }
    config::expand_home(&config.logging.history_path)
}

pub fn run_history(config: &StockdashConfig, format: OutputFormat, limit: usize) -> Result<()> {
    let path = config::expand_home(&config.logging.history_path)
        .context("could not determine home directory")?;
    let entries = history::recent(&path, limit);

    if entries.is_empty() {
        println!(
            "{}",
            "No questions yet. Ask one with `stockdash ask`.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Csv => {
            println!("timestamp,question,outcome,latency_ms");
            for entry in &entries {
                println!(
                    "{},{},{},{}",
                    entry.timestamp.to_rfc3339(),
                    csv_field(&entry.question),
                    entry.outcome,
                    entry.latency_ms
                );
            }
        }
        OutputFormat::Table => {
            println!("{}", "Recent questions".bold().cyan());
            println!("{}", "=".repeat(60));
            for entry in &entries {
                let outcome = if entry.outcome == "answered" {
                    entry.outcome.green()
                } else {
                    entry.outcome.red()
                };
                println!(
                    "  {} {} {}ms",
                    entry
                        .timestamp
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                        .dimmed(),
                    outcome,
                    entry.latency_ms
                );
                println!("    {}", render::truncate(&entry.question, 70).bold());
                if let Some(excerpt) = &entry.answer_excerpt {
                    println!("    {}", render::truncate(excerpt, 70).dimmed());
                }
                if let Some(kind) = &entry.error_kind {
                    println!("    {}", format!("{kind} error").red());
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// stockdash health
// ---------------------------------------------------------------------------

/// Check API reachability, config files and the question history.
pub fn run_health(config: &StockdashConfig) -> Result<()> {
    println!("{}", "stockdash Health Check".bold().cyan());
    println!("{}", "=".repeat(50));

    // 1. API
    let client = client(config);
    let started = Instant::now();
    match client.basic_stats() {
        Ok(_) => print_health_item(
            "API",
            true,
            &format!(
                "reachable at {} ({}ms)",
                client.base_url(),
                started.elapsed().as_millis()
            ),
        ),
        Err(e) => print_health_item("API", false, &format!("{} — {e}", client.base_url())),
    }

    // 2. Config files
    for (name, path) in [
        ("Global config", config::global_config_file()),
        ("Project config", config::project_config_file()),
    ] {
        let exists = path.as_ref().is_some_and(|p| p.exists());
        let detail = match &path {
            Some(p) if exists => p.display().to_string(),
            Some(p) => format!("{} (not found, defaults apply)", p.display()),
            None => "no home directory".to_string(),
        };
        // Missing config files are fine; only report them.
        print_health_item(name, true, &detail);
    }

    // 3. History
    if config.logging.history {
        let path = config::expand_home(&config.logging.history_path);
        let entries = path
            .as_deref()
            .filter(|p| p.exists())
            .map(|p| history::read_all(p).len());
        let detail = match entries {
            Some(n) => format!("{n} entries"),
            None => "no history file yet".to_string(),
        };
        print_health_item("Question history", true, &detail);
    } else {
        print_health_item("Question history", true, "disabled");
    }

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// stockdash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective stockdash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file().is_some_and(|p| p.exists());
    let project_exists = config::project_config_file().is_some_and(|p| p.exists());
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.stockdash/config.toml", global_exists);
    print_source(".stockdash.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "STOCKDASH_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(label: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), label.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{label} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.stockdash/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to point stockdash at your API.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
