/// Configuration system for stockdash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::StockdashConfig::default()`]
/// 2. **User global config**: `~/.stockdash/config.toml`
/// 3. **Project local config**: `.stockdash.toml` in the current working directory
/// 4. **Environment variables**: `STOCKDASH_*` overrides (highest precedence)
///
/// Later layers override earlier ones key by key. A key no layer sets falls
/// back to the built-in default.
///
/// # Usage
///
/// ```rust,ignore
/// use stockdash::config;
///
/// let cfg = config::load();
/// let client = ApiClient::from_config(&cfg.api);
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::StockdashConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> StockdashConfig {
    let mut config = load_layers(&[global_config_path(), project_config_path()]);
    apply_env_overrides(&mut config);
    config
}

/// Overlay each existing TOML file onto the previous ones, key by key, and
/// deserialize the result once. Keys a layer leaves out keep the value from
/// the layer below, or the built-in default when no layer sets them.
fn load_layers(paths: &[Option<PathBuf>]) -> StockdashConfig {
    let mut merged = toml::Value::Table(toml::Table::new());
    for path in paths.iter().flatten() {
        if let Some(layer) = load_toml_file(path) {
            merge_toml(&mut merged, layer);
        }
    }

    match merged.try_into() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "merged config is invalid, using defaults");
            StockdashConfig::default()
        }
    }
}

/// Read one TOML layer (if the file exists).
///
/// Malformed files, and files whose values would not load on their own, are
/// skipped with a warning rather than aborting the command.
fn load_toml_file(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    let layer = match toml::from_str::<toml::Value>(&content) {
        Ok(layer) => layer,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            return None;
        }
    };
    if let Err(e) = layer.clone().try_into::<StockdashConfig>() {
        tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
        return None;
    }
    Some(layer)
}

/// Recursively overlay `overlay` onto `base`. Tables merge per key; any other
/// value replaces what was there.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.stockdash`
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stockdash"))
}

fn global_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".stockdash.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None if path == "~" => dirs::home_dir(),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `STOCKDASH_API_URL`: API base URL
/// - `STOCKDASH_TIMEOUT_MS`: statistics request timeout
/// - `STOCKDASH_COLOR`: `auto`, `always`, `never`
/// - `NO_COLOR`: any non-empty value forces `never`
/// - `STOCKDASH_LOG`: default tracing level
/// - `STOCKDASH_HISTORY`: question history on/off
fn apply_env_overrides(config: &mut StockdashConfig) {
    if let Ok(val) = std::env::var("STOCKDASH_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("STOCKDASH_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }

    if let Ok(val) = std::env::var("STOCKDASH_COLOR")
        && let Some(mode) = parse_color(&val)
    {
        config.display.color = mode;
    }
    if let Ok(val) = std::env::var("NO_COLOR")
        && !val.is_empty()
    {
        config.display.color = schema::ColorMode::Never;
    }

    if let Ok(val) = std::env::var("STOCKDASH_LOG")
        && !val.is_empty()
    {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("STOCKDASH_HISTORY") {
        config.logging.history = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_color(val: &str) -> Option<schema::ColorMode> {
    match val.to_ascii_lowercase().as_str() {
        "auto" => Some(schema::ColorMode::Auto),
        "always" | "on" => Some(schema::ColorMode::Always),
        "never" | "off" => Some(schema::ColorMode::Never),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.stockdash/config.toml`.
///
/// Returns an error if the file already exists and `force` is false.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.stockdash/ directory")?;
    }

    fs::write(&path, StockdashConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted key (`api.base_url`) in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let current = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&StockdashConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&current).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    // Reject values that would no longer load, e.g. `display.color = "blue"`.
    let updated = toml::to_string_pretty(&root).context("failed to serialize config")?;
    toml::from_str::<StockdashConfig>(&updated)
        .with_context(|| format!("invalid value for '{key}': {value}"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, updated).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted (section.key): '{key}'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("unsupported value type for '{key}'"),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
