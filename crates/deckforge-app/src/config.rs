use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use deckforge_core::models::style::normalize_color;
use deckforge_export::pptx::DEFAULT_FILE_NAME;
use deckforge_export::styles::{DEFAULT_BACKGROUND, DeckTheme};
use deckforge_gemini::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT, GeminiSettings};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckforgeConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Where `export` writes when no path is given.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    /// Slide background as `RRGGBB`. Added in v1.
    #[serde(default = "default_background")]
    pub background_color: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_NAME)
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl Default for DeckforgeConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            output_file: default_output_file(),
            background_color: default_background(),
        }
    }
}

impl DeckforgeConfig {
    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key.clone(),
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            timeout: self.timeout(),
        }
    }

    /// Network timeout shared by generation and image fetches.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The export theme. A background that is not a valid colour falls
    /// back to the default.
    pub fn theme(&self) -> DeckTheme {
        let background_color = normalize_color(&self.background_color).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring configured background color");
            DEFAULT_BACKGROUND.to_string()
        });
        DeckTheme {
            background_color,
            ..DeckTheme::default()
        }
    }

    /// Replace the stored key with `key` when it is set and non-blank.
    pub fn override_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key;
        }
    }
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub path: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub output_file: String,
    pub background_color: String,
    pub api_key_hint: Option<String>,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("deckforge"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the user's config, falling back to defaults when none exists, and
/// apply the `GEMINI_API_KEY` override.
pub fn load_config() -> eyre::Result<DeckforgeConfig> {
    let mut config = load_config_from(&config_path()?)?;
    config.override_api_key(std::env::var(API_KEY_ENV).ok());
    Ok(config)
}

/// Load a config file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> eyre::Result<DeckforgeConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(DeckforgeConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: DeckforgeConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update deckforge."
        ));
    }

    // v0 → v1: add background_color
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("background_color")
            .or_insert(serde_json::Value::String(DEFAULT_BACKGROUND.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added background_color)");
    }

    Ok(json)
}

pub fn save_config(config: &DeckforgeConfig) -> eyre::Result<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &DeckforgeConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // The file holds an API key.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_info(config: &DeckforgeConfig, path: &Path) -> ConfigInfo {
    ConfigInfo {
        path: path.display().to_string(),
        model: config.model.clone(),
        endpoint: config.endpoint.clone(),
        timeout_secs: config.timeout_secs,
        output_file: config.output_file.display().to_string(),
        background_color: config.background_color.clone(),
        api_key_hint: (!config.api_key.is_empty()).then(|| redact_api_key(&config.api_key)),
    }
}

pub fn redact_api_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
