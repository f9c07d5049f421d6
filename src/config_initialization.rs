//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use crate::adapters::toml_config::{TomlConfigAdapter, TranscodeConfig};
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;

/// Environment variables and the config keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("TRANSCODE_PRIMARY_ENCODER", "encoders.primary"),
    ("TRANSCODE_SECONDARY_ENCODER", "encoders.secondary"),
    ("TRANSCODE_PROBE", "encoders.probe"),
    ("TRANSCODE_THREADS", "threads"),
    ("TRANSCODE_LOG_LEVEL", "log_level"),
];

/// Resolved configuration and where it came from
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: TranscodeConfig,
    pub source: Option<PathBuf>,
    pub env_overrides: usize,
    pub cli_overrides: usize,
}

/// Initialize configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<LoadedConfig, DomainError> {
    let (mut config, source) = TomlConfigAdapter::load_or_default(cli.config.as_deref())?;
    let env_overrides = apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    let cli_overrides = apply_cli_overrides(&mut config, cli);
    config.validate()?;

    Ok(LoadedConfig {
        config,
        source,
        env_overrides,
        cli_overrides,
    })
}

/// Apply environment overrides, returning how many were found
pub fn apply_env_overrides<F>(config: &mut TranscodeConfig, lookup: F) -> Result<usize, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;
    for (env_var, key) in ENV_MAPPINGS {
        let Some(value) = lookup(*env_var) else {
            continue;
        };
        match *key {
            "encoders.primary" => config.encoders.primary = value,
            "encoders.secondary" => config.encoders.secondary = value,
            "encoders.probe" => config.encoders.probe = value,
            "threads" => {
                config.threads = value.trim().parse().map_err(|e| {
                    DomainError::Config(format!("Invalid {}: {}", env_var, e))
                })?;
            }
            "log_level" => config.log_level = value,
            _ => continue,
        }
        applied += 1;
    }
    Ok(applied)
}

/// Apply CLI argument overrides, returning how many were found
pub fn apply_cli_overrides(config: &mut TranscodeConfig, cli: &Cli) -> usize {
    let mut applied = 0;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
        applied += 1;
    }

    if let Commands::Stream(args) = &cli.command {
        if let Some(threads) = args.threads {
            config.threads = threads;
            applied += 1;
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = TranscodeConfig::default();
        let applied = apply_env_overrides(
            &mut config,
            lookup(&[
                ("TRANSCODE_PRIMARY_ENCODER", "/usr/local/bin/ffmpeg"),
                ("TRANSCODE_THREADS", "3"),
            ]),
        )
        .unwrap();
        assert_eq!(applied, 2);
        assert_eq!(config.encoders.primary, "/usr/local/bin/ffmpeg");
        assert_eq!(config.threads, 3);
        assert_eq!(config.encoders.secondary, "avconv");
    }

    #[test]
    fn test_env_bad_threads() {
        let mut config = TranscodeConfig::default();
        let result = apply_env_overrides(&mut config, lookup(&[("TRANSCODE_THREADS", "lots")]));
        assert!(matches!(result, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_cli_overrides_win() {
        let cli = Cli::parse_from([
            "transcode",
            "--log-level",
            "debug",
            "stream",
            "--profile",
            "mpegts",
            "--input",
            "a.mkv",
            "--threads",
            "2",
        ]);
        let mut config = TranscodeConfig::default();
        apply_env_overrides(&mut config, lookup(&[("TRANSCODE_THREADS", "6")])).unwrap();
        assert_eq!(apply_cli_overrides(&mut config, &cli), 2);
        assert_eq!(config.threads, 2);
        assert_eq!(config.log_level, "debug");
    }
}
