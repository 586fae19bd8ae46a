//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.medchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::GatewayKind;
use crate::gateway::ReplyFormat;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MedchatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub simulated: SimulatedConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub gateway: Option<GatewayKind>,
    pub username: Option<String>,
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SimulatedConfig {
    pub reply_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub reply_format: Option<ReplyFormat>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_USERNAME: &str = "Guest";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub gateway: GatewayKind,
    pub username: String,
    pub dark_mode: bool,
    pub reply_delay: Duration,
    pub base_url: String,
    pub reply_format: ReplyFormat,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.medchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".medchat").join("config.toml"))
}

/// Load config from `~/.medchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MedchatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MedchatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MedchatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MedchatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MedchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# medchat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# gateway = "simulated"              # "simulated" or "http" (or MEDCHAT_GATEWAY)
# username = "Guest"
# dark_mode = false                  # initial theme, also --dark

# [simulated]
# reply_delay_ms = 1500

# [server]
# base_url = "http://localhost:8000" # Or set MEDCHAT_BASE_URL env var
# reply_format = "json"              # "json" ({"response": ...}) or "body" (raw markup)
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_gateway` and `cli_base_url` are from CLI flags (None = not specified).
pub fn resolve(
    config: &MedchatConfig,
    cli_gateway: Option<GatewayKind>,
    cli_base_url: Option<&str>,
) -> ResolvedConfig {
    // Gateway: CLI → env → config → default
    let gateway = cli_gateway
        .or_else(|| {
            std::env::var("MEDCHAT_GATEWAY").ok().and_then(|s| {
                GatewayKind::from_str(&s, true)
                    .inspect_err(|e| warn!("Ignoring MEDCHAT_GATEWAY={}: {}", s, e))
                    .ok()
            })
        })
        .or(config.general.gateway)
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("MEDCHAT_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        gateway,
        username: config
            .general
            .username
            .clone()
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
        dark_mode: config.general.dark_mode.unwrap_or(false),
        reply_delay: Duration::from_millis(
            config
                .simulated
                .reply_delay_ms
                .unwrap_or(DEFAULT_REPLY_DELAY_MS),
        ),
        base_url,
        reply_format: config.server.reply_format.unwrap_or_default(),
    }
}
