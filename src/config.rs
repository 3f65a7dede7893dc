//! Configuration management for the dashboard
//!
//! Values are fixed deploy-time settings. Each one can be overridden through a
//! key lookup (in the browser: `data-*` attributes on `<body>`), otherwise the
//! built-in default applies.

use crate::error::{DashboardError, Result};

const DEFAULT_WIDGET_SCRIPT: &str = "https://telegram.org/js/telegram-widget.js?22";
const DEFAULT_BOT_NAME: &str = "trackyourtokensbot";
const DEFAULT_EXPLORER_TX_URL: &str = "https://polygonscan.com/tx/";
const MAX_ABBREV_LEN: usize = 32;

/// Telegram login widget parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub script_src: String,
    pub bot_name: String,
    pub size: String,
    pub radius: u32,
    pub request_access: String,
    /// Name of the global function the widget calls with the user payload
    pub callback_name: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            script_src: DEFAULT_WIDGET_SCRIPT.to_string(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            size: "large".to_string(),
            radius: 20,
            request_access: "write".to_string(),
            callback_name: "onTelegramAuth".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Value for the widget's `data-onauth` attribute
    pub fn onauth_attribute(&self) -> String {
        format!("{}(user)", self.callback_name)
    }

    /// Attributes of the widget `<script>` tag, in insertion order
    pub fn script_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("async", String::new()),
            ("src", self.script_src.clone()),
            ("data-telegram-login", self.bot_name.clone()),
            ("data-size", self.size.clone()),
            ("data-radius", self.radius.to_string()),
            ("data-onauth", self.onauth_attribute()),
            ("data-request-access", self.request_access.clone()),
        ]
    }
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin the backend API is served from (no trailing slash)
    pub api_base: String,

    /// Log level
    pub log_level: String,

    pub widget: WidgetConfig,

    /// Prefix for transaction links; the hash is appended
    pub explorer_tx_url: String,

    /// Characters kept at each end of abbreviated hashes/addresses
    pub abbrev_head: usize,
    pub abbrev_tail: usize,
}

impl Config {
    /// Defaults for a page served from `origin`
    pub fn new(origin: &str) -> Self {
        Self {
            api_base: origin.trim_end_matches('/').to_string(),
            log_level: "info".to_string(),
            widget: WidgetConfig::default(),
            explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
            abbrev_head: 6,
            abbrev_tail: 4,
        }
    }

    /// Load configuration, taking overrides from `lookup` where present
    pub fn from_lookup<F>(origin: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new(origin);
        let text = |key: &str, fallback: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };
        let number = |key: &str, fallback: usize| {
            lookup(key)
                .map(|v| v.trim().parse().unwrap_or(fallback))
                .unwrap_or(fallback)
        };

        let widget = WidgetConfig {
            script_src: text("WIDGET_SCRIPT_SRC", defaults.widget.script_src),
            bot_name: text("WIDGET_BOT_NAME", defaults.widget.bot_name),
            size: text("WIDGET_SIZE", defaults.widget.size),
            radius: lookup("WIDGET_RADIUS")
                .map(|v| v.trim().parse().unwrap_or(defaults.widget.radius))
                .unwrap_or(defaults.widget.radius),
            request_access: text("WIDGET_REQUEST_ACCESS", defaults.widget.request_access),
            callback_name: text("WIDGET_CALLBACK", defaults.widget.callback_name),
        };

        Self {
            api_base: text("API_BASE", defaults.api_base)
                .trim_end_matches('/')
                .to_string(),
            log_level: text("LOG_LEVEL", defaults.log_level),
            widget,
            explorer_tx_url: text("EXPLORER_TX_URL", defaults.explorer_tx_url),
            abbrev_head: number("ABBREV_HEAD", defaults.abbrev_head),
            abbrev_tail: number("ABBREV_TAIL", defaults.abbrev_tail),
        }
    }

    /// Parsed log level, `Info` if unrecognised
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_base)
            .map_err(|e| DashboardError::Config(format!("api_base '{}' is not a URL: {e}", self.api_base)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DashboardError::Config("api_base must be http or https".into()));
        }
        if !is_js_identifier(&self.widget.callback_name) {
            return Err(DashboardError::Config(format!(
                "widget callback '{}' is not a valid identifier",
                self.widget.callback_name
            )));
        }
        if self.abbrev_head == 0 || self.abbrev_tail == 0 {
            return Err(DashboardError::Config("abbreviation lengths must be positive".into()));
        }
        if self.abbrev_head > MAX_ABBREV_LEN || self.abbrev_tail > MAX_ABBREV_LEN {
            return Err(DashboardError::Config(format!(
                "abbreviation lengths must be at most {MAX_ABBREV_LEN}"
            )));
        }
        Ok(())
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
