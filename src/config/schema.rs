/// Configuration schema and defaults for stockdash.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[api]`, `[display]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level stockdash configuration.
///
/// Maps directly to `~/.stockdash/config.toml` and `.stockdash.toml`. All
/// sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockdashConfig {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Where the statistics API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; endpoint paths (`/api/...`) are appended to it.
    pub base_url: String,
    /// Timeout for statistics requests.
    pub timeout_ms: u64,
    /// Timeout for assistant questions, which are much slower.
    pub ask_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 10_000,
            ask_timeout_ms: 60_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [display]
// ---------------------------------------------------------------------------

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Color when stdout is a terminal (default).
    #[default]
    Auto,
    Always,
    Never,
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Rendering limits and layout breakpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: ColorMode,
    /// Categories drawn in the size chart.
    pub chart_slices: usize,
    /// Products kept in a warehouse's top-products ranking.
    pub top_products: usize,
    /// Sizes kept in a warehouse's top-sizes ranking.
    pub top_sizes: usize,
    /// Terminals narrower than this use the compact layout.
    pub compact_width: u16,
    /// Maximum bar length in the size chart, in columns.
    pub bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            chart_slices: 8,
            top_products: 5,
            top_sizes: 10,
            compact_width: 80,
            bar_width: 40,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Diagnostics and question history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when no `-v` flag is given:
    /// `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    pub level: String,
    /// Whether assistant questions are recorded.
    pub history: bool,
    /// Path to the question history file. `~` is expanded to the home directory.
    pub history_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            history: true,
            history_path: "~/.stockdash/ask-history.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl StockdashConfig {
    /// Annotated default config file, written by `stockdash config init`.
    pub fn default_toml() -> String {
        r#"# stockdash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (STOCKDASH_*)
#   2. Project config (.stockdash.toml in current directory)
#   3. User global config (~/.stockdash/config.toml)
#   4. Built-in defaults

[api]
base_url = "http://127.0.0.1:5000"
timeout_ms = 10000
ask_timeout_ms = 60000               # Assistant answers can take a while

[display]
color = "auto"                       # auto | always | never
chart_slices = 8                     # Sizes drawn in the inventory chart
top_products = 5                     # Per-warehouse product ranking length
top_sizes = 10                       # Per-warehouse size ranking length
compact_width = 80                   # Narrower terminals get the compact layout
bar_width = 40

[logging]
level = "warn"                       # error | warn | info | debug | trace
history = true
history_path = "~/.stockdash/ask-history.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
