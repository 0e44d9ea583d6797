use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::models::GenerationConfig;
use crate::modes::Profile;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Profile used when the command line doesn't name one
    #[serde(default)]
    pub default_profile: Profile,

    /// Model endpoint and generation parameters
    #[serde(default)]
    pub model: ModelSettings,

    /// Export defaults
    #[serde(default)]
    pub report: ReportSettings,
}

/// Model endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model name as known to the endpoint
    pub name: String,
    /// Base URL of the generative language API
    pub endpoint: String,
    /// Environment variable holding the API key (never the key itself)
    pub api_key_env: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Threshold applied to every harm category
    pub safety_threshold: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL_NAME.to_string(),
            endpoint: DEFAULT_MODEL_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            safety_threshold: DEFAULT_SAFETY_THRESHOLD.to_string(),
        }
    }
}

impl ModelSettings {
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            safety_threshold: self.safety_threshold.clone(),
        }
    }
}

/// Report export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Directory exports are written to when no path is given
    pub output_dir: PathBuf,
    /// Printed in report headers when set
    pub author: Option<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            author: None,
        }
    }
}

fn base_figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

fn with_env(figment: Figment) -> Figment {
    // REPERTO_MODEL__NAME -> model.name
    figment.merge(Env::prefixed(CONFIG_ENV_PREFIX).split("__"))
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);

    let mut figment = base_figment();

    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    with_env(figment)
        .extract()
        .context("Failed to load configuration")
}

/// Load configuration from one explicit file, still honoring env overrides
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    with_env(base_figment().merge(Toml::file(path)))
        .extract()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "reperto") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("reperto");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(path)
}

/// Create a default configuration file if it doesn't exist.
/// Returns the path when a file was written.
pub fn init_config() -> Result<Option<PathBuf>> {
    let config_file = get_config_dir()?.join("config.toml");

    if config_file.exists() {
        return Ok(None);
    }
    save_config(&Config::default(), Some(config_file)).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model.name, DEFAULT_MODEL_NAME);
        assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.default_profile, Profile::Forensic);
        assert_eq!(config.report.author, None);

        let generation = config.model.generation_config();
        assert_eq!(generation.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(generation.safety_threshold, "BLOCK_NONE");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "default_profile = \"rock-art\"\n\n[model]\ntemperature = 0.5\n\n[report]\nauthor = \"Studio Rilievi\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.default_profile, Profile::RockArt);
        assert_eq!(config.model.temperature, 0.5);
        assert_eq!(config.model.name, DEFAULT_MODEL_NAME);
        assert_eq!(config.report.author.as_deref(), Some("Studio Rilievi"));
        assert_eq!(config.report.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.model.max_output_tokens = 1024;
        config.default_profile = Profile::RockArt;

        let path = save_config(&config, Some(dir.path().join("config.toml"))).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_config_from(&dir.path().join("absent.toml")).is_err());
    }
}
