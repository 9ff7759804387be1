//! Reading configuration files from disk.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::model::SiteConfig;
use crate::raw::RawConfig;
use crate::validate::validate;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

impl SiteConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_str_with_format(&source, format)?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Parse and validate configuration source text.
    pub fn from_str_with_format(source: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let (raw, ignored) = parse_raw(source, format)?;

        for key in &ignored {
            tracing::warn!("Ignoring unknown config key `{}`", key);
        }

        let config = validate(raw)?;
        tracing::debug!(
            "Validated config for '{}' ({} navbar items, {} head tags)",
            config.title(),
            config.navbar().items.len(),
            config.head_tags().len()
        );

        Ok(config)
    }
}

impl FromStr for SiteConfig {
    type Err = ConfigError;

    /// Parse TOML source.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_format(s, ConfigFormat::Toml)
    }
}

/// Deserialize the permissive file shape, collecting keys nothing consumed.
fn parse_raw(source: &str, format: ConfigFormat) -> Result<(RawConfig, Vec<String>), ConfigError> {
    let mut ignored = Vec::new();
    let record = |path: serde_ignored::Path| ignored.push(path.to_string());
    let parse_error = |message: String| ConfigError::Parse { format, message };

    let raw = match format {
        ConfigFormat::Toml => {
            let deserializer = toml::Deserializer::new(source);
            serde_ignored::deserialize(deserializer, record)
                .map_err(|e| parse_error(e.to_string()))?
        }
        ConfigFormat::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(source);
            let raw = serde_ignored::deserialize(&mut deserializer, record)
                .map_err(|e| parse_error(e.to_string()))?;
            deserializer
                .end()
                .map_err(|e| parse_error(e.to_string()))?;
            raw
        }
        ConfigFormat::Yaml => {
            let deserializer = serde_yaml::Deserializer::from_str(source);
            serde_ignored::deserialize(deserializer, record)
                .map_err(|e| parse_error(e.to_string()))?
        }
    };

    Ok((raw, ignored))
}
