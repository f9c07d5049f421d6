// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::ports::LogLevel;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "transcode.toml";

/// Encoder binaries used by the profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderPaths {
    /// Encoder for the MPEG-TS and MP4 profiles
    pub primary: String,
    /// Encoder for the WebM profile
    pub secondary: String,
    /// Stream metadata probe
    pub probe: String,
}

impl Default for EncoderPaths {
    fn default() -> Self {
        Self {
            primary: "ffmpeg".to_string(),
            secondary: "avconv".to_string(),
            probe: "ffprobe".to_string(),
        }
    }
}

/// Transcoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Encoder thread count; defaults to the host CPU count
    pub threads: usize,
    pub log_level: String,
    pub encoders: EncoderPaths,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            log_level: "info".to_string(),
            encoders: EncoderPaths::default(),
        }
    }
}

impl TranscodeConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.threads == 0 {
            return Err(DomainError::Config(
                "threads must be at least 1".to_string(),
            ));
        }
        LogLevel::parse(&self.log_level).map_err(|e| DomainError::Config(e.to_string()))?;
        for (name, value) in [
            ("encoders.primary", &self.encoders.primary),
            ("encoders.secondary", &self.encoders.secondary),
            ("encoders.probe", &self.encoders.probe),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Config(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }

    /// Parsed log level
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text, filling gaps with defaults
    pub fn parse(toml_content: &str) -> Result<TranscodeConfig, DomainError> {
        toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<TranscodeConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Load the explicit file if given, else the default file if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<(TranscodeConfig, Option<PathBuf>), DomainError> {
        match path {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Ok((Self::load(&default_path)?, Some(default_path)))
                } else {
                    Ok((TranscodeConfig::default(), None))
                }
            }
        }
    }

    /// Serialize config to TOML string
    pub fn serialize(config: &TranscodeConfig) -> Result<String, DomainError> {
        toml::to_string_pretty(config)
            .map_err(|e| DomainError::Config(format!("Failed to serialize config: {}", e)))
    }
}
