//! Application-level configuration loading: game rules and the trivia upstream.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::{dao::trivia_source::OpenTdbConfig, game::GameRules};

/// Default location on disk where the binaries look for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TRIVIA_RPG_CONFIG_PATH";
const TRIVIA_API_URL_ENV: &str = "TRIVIA_API_URL";
const TRIVIA_CATEGORY_ENV: &str = "TRIVIA_CATEGORY";

#[derive(Debug, Clone, Default, PartialEq)]
/// Immutable runtime configuration shared by the server and the terminal client.
pub struct AppConfig {
    pub rules: GameRules,
    pub trivia: OpenTdbConfig,
}

impl AppConfig {
    /// Load the configuration from disk and the environment, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        rules = ?config.rules,
                        base_url = %config.trivia.base_url,
                        "loaded configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.with_overrides(|key| env::var(key).ok())
    }

    /// Parse the JSON configuration document. Invalid rules fall back to the default preset.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        Ok(raw.into())
    }

    /// Apply `TRIVIA_API_URL` / `TRIVIA_CATEGORY` as returned by `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(TRIVIA_API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.trivia.base_url = url.trim().to_owned();
        }

        if let Some(raw) = lookup(TRIVIA_CATEGORY_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(category) => self.trivia.category = category,
                Err(err) => warn!(value = %raw, error = %err, "ignoring invalid {TRIVIA_CATEGORY_ENV}"),
            }
        }

        self
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    rules: RawRules,
    #[serde(default)]
    trivia: RawTrivia,
}

#[derive(Debug, Default, Deserialize)]
/// Named preset plus individual overrides.
struct RawRules {
    preset: Option<String>,
    max_health: Option<i32>,
    damage_per_wrong: Option<i32>,
    score_per_correct: Option<u32>,
    batch_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTrivia {
    base_url: Option<String>,
    category: Option<u32>,
    timeout_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            rules: value.rules.into(),
            trivia: value.trivia.into(),
        }
    }
}

impl From<RawRules> for GameRules {
    fn from(value: RawRules) -> Self {
        let base = match value.preset.as_deref() {
            Some(name) => GameRules::preset(name).unwrap_or_else(|| {
                warn!(preset = name, "unknown rules preset; using classic");
                GameRules::default()
            }),
            None => GameRules::default(),
        };

        let rules = GameRules {
            max_health: value.max_health.unwrap_or(base.max_health),
            damage_per_wrong: value.damage_per_wrong.unwrap_or(base.damage_per_wrong),
            score_per_correct: value.score_per_correct.unwrap_or(base.score_per_correct),
            batch_size: value.batch_size.unwrap_or(base.batch_size),
        };

        match rules.validate() {
            Ok(()) => rules,
            Err(err) => {
                warn!(error = %err, "invalid rules in config; using preset values");
                base
            }
        }
    }
}

impl From<RawTrivia> for OpenTdbConfig {
    fn from(value: RawTrivia) -> Self {
        let mut config = OpenTdbConfig::default();
        if let Some(base_url) = value.base_url {
            config.base_url = base_url;
        }
        if let Some(category) = value.category {
            config = config.with_category(category);
        }
        if let Some(secs) = value.timeout_secs.filter(|secs| *secs > 0) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::trivia_source::opentdb::{DEFAULT_BASE_URL, DEFAULT_CATEGORY};

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn preset_with_overrides() {
        let config = AppConfig::from_json(
            r#"{
                "rules": { "preset": "hearts", "batch_size": 8 },
                "trivia": { "base_url": "http://trivia.local", "category": 9, "timeout_secs": 4 }
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.rules,
            GameRules {
                batch_size: 8,
                ..GameRules::hearts()
            }
        );
        assert_eq!(config.trivia.base_url, "http://trivia.local");
        assert_eq!(config.trivia.category, 9);
        assert_eq!(config.trivia.timeout, Some(Duration::from_secs(4)));
    }

    #[test]
    fn invalid_rules_fall_back_to_preset() {
        let config =
            AppConfig::from_json(r#"{ "rules": { "preset": "sudden-death", "batch_size": 80 } }"#)
                .unwrap();
        assert_eq!(config.rules, GameRules::sudden_death());
    }

    #[test]
    fn shipped_config_leaves_timeout_off() {
        let config = AppConfig::from_json(include_str!("../config/app.json")).unwrap();

        assert_eq!(config.trivia.timeout, None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(AppConfig::from_json("{ rules").is_err());
    }

    #[test]
    fn environment_overrides_trivia_settings() {
        let config = AppConfig::default().with_overrides(|key| match key {
            "TRIVIA_API_URL" => Some(" http://localhost:9000 ".into()),
            "TRIVIA_CATEGORY" => Some("not-a-number".into()),
            _ => None,
        });

        assert_eq!(config.trivia.base_url, "http://localhost:9000");
        assert_eq!(config.trivia.category, DEFAULT_CATEGORY);

        let untouched = AppConfig::default().with_overrides(|_| None);
        assert_eq!(untouched.trivia.base_url, DEFAULT_BASE_URL);
    }
}
