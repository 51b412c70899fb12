use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding an OAuth access token for the Sheets API.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DEFAULT_EXPORT_BASE_URL: &str = "https://docs.google.com/spreadsheets";

// ---------------------------------------------------------------------------
// QuoteTemplate
// ---------------------------------------------------------------------------

/// Fixed text of the quote document. The section layout itself is not
/// configurable, only the wording that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteTemplate {
    pub organization_name: String,
    pub title: String,
    pub default_advisory_note: String,
    pub contact_heading: String,
    pub agent_line: String,
    pub mobile_line: String,
}

impl Default for QuoteTemplate {
    fn default() -> Self {
        Self {
            organization_name: "Incremint Edge Pvt Ltd".into(),
            title: "Final Incremint Dual-Pay Term Quote".into(),
            default_advisory_note: "Recommendation: 10 Pay offers quicker benefit accumulation \u{2014} \
                consider max allowed cover and fixed premiums for life. Contact your advisor for \
                exact tailored recommendation. \u{26a0}\u{fe0f} This is a system-generated quote."
                .into(),
            contact_heading: "Contact Now \u{1f4de}".into(),
            agent_line: "Agent Name: __________________".into(),
            mobile_line: "Mobile: __________________".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// QuoteConfig
// ---------------------------------------------------------------------------

/// Application configuration stored at `~/.incremint/config.json`.
///
/// The Sheets access token is never written to disk; it is read from
/// [`ACCESS_TOKEN_ENV`] when the config is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    #[serde(skip)]
    pub google_access_token: Option<String>,

    // Document
    pub template: QuoteTemplate,

    // Output
    pub output_dir: Option<PathBuf>,
    pub output_suffix: String,

    // Integrations
    pub sheets_base_url: String,
    pub export_base_url: String,

    // General
    pub log_level: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            google_access_token: None,
            template: QuoteTemplate::default(),
            output_dir: None,
            output_suffix: "_term_quote_final".into(),
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.into(),
            export_base_url: DEFAULT_EXPORT_BASE_URL.into(),
            log_level: "info".into(),
        }
    }
}

impl QuoteConfig {
    /// Returns the base config directory: `~/.incremint/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".incremint"))
    }

    /// Returns the config file path: `~/.incremint/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.incremint/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Ensures all required directories exist.
    pub fn ensure_dirs() -> Result<()> {
        let dirs = [Self::base_dir()?, Self::logs_dir()?];
        for dir in &dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    /// Loads config from the default location, or creates it if missing.
    pub fn load() -> Result<Self> {
        Self::ensure_dirs()?;
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load config from a specific file path, writing defaults when the file
    /// does not exist yet. Environment overrides are applied afterwards.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            config
        };
        config.apply_env();
        Ok(config)
    }

    /// Save config to a specific file path (the access token is excluded).
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Pick up the Sheets access token from the environment.
    pub fn apply_env(&mut self) {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => {
                self.google_access_token = Some(token.trim().to_string());
            }
            Ok(_) => warn!("{ACCESS_TOKEN_ENV} is set but empty; ignoring"),
            Err(_) => {}
        }
    }

    /// Directory generated documents are written to. Defaults to the system
    /// temp directory.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}
