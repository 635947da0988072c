//! Host settings read from the environment.

use std::env;
use std::path::Path;
use std::time::Duration;

use skyguard_sim::EngineConfig;

use crate::game_loop::TICK_DURATION;
use crate::state::HostError;

/// Everything the host binary reads at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Overrides the authoritative engine's seed.
    pub seed: Option<u64>,
    /// Wall-clock time between ticks.
    pub tick_interval: Duration,
    /// How long to run before shutting down; `None` runs until killed.
    pub run_duration: Option<Duration>,
    pub log_json: bool,
    /// JSON file holding the authoritative engine config.
    pub engine_config_path: Option<String>,
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self {
            seed: parse_var("SKYGUARD_SEED"),
            tick_interval: parse_var("SKYGUARD_TICK_MS")
                .map(Duration::from_millis)
                .unwrap_or(TICK_DURATION),
            run_duration: parse_var("SKYGUARD_RUN_SECS").map(Duration::from_secs),
            log_json: env::var("SKYGUARD_LOG_JSON")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            engine_config_path: env::var("SKYGUARD_ENGINE_CONFIG").ok(),
        }
    }

    /// Authoritative engine config: from the configured file if any,
    /// otherwise the built-in preset, with the seed override applied.
    pub fn authoritative_engine(&self) -> Result<EngineConfig, HostError> {
        let mut config = match &self.engine_config_path {
            Some(path) => load_engine_config(path)?,
            None => EngineConfig::authoritative(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

/// Read and validate an `EngineConfig` from a JSON file.
pub fn load_engine_config(path: impl AsRef<Path>) -> Result<EngineConfig, HostError> {
    let text = std::fs::read_to_string(path).map_err(HostError::ConfigIo)?;
    let config: EngineConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguard_core::error::ConfigError;

    fn defaults() -> HostConfig {
        HostConfig {
            seed: None,
            tick_interval: TICK_DURATION,
            run_duration: None,
            log_json: false,
            engine_config_path: None,
        }
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_seed_override() {
        let config = HostConfig {
            seed: Some(99),
            ..defaults()
        };
        let engine = config.authoritative_engine().unwrap();
        assert_eq!(engine.seed, 99);
        assert_eq!(engine.name, EngineConfig::authoritative().name);
    }

    #[test]
    fn test_engine_config_from_file() {
        let mut expected = EngineConfig::client_local();
        expected.name = "from-file".to_string();
        let path = env::temp_dir().join(format!("skyguard-config-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&expected).unwrap()).unwrap();

        let config = HostConfig {
            engine_config_path: Some(path.to_string_lossy().into_owned()),
            ..defaults()
        };
        let loaded = config.authoritative_engine().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_engine_config("/nonexistent/skyguard.json");
        assert!(matches!(result, Err(HostError::ConfigIo(_))));
    }

    #[test]
    fn test_inverted_bounds_file_rejected() {
        let mut inverted = EngineConfig::client_local();
        std::mem::swap(
            &mut inverted.spawn_bounds.min_lat,
            &mut inverted.spawn_bounds.max_lat,
        );
        let path = env::temp_dir().join(format!(
            "skyguard-inverted-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string(&inverted).unwrap()).unwrap();

        let result = load_engine_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(HostError::InvalidConfig(ConfigError::InvalidBounds))
        ));
    }
}
