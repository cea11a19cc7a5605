use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{ChatError, ChatResult, Millis, Participant, Presence};

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";

/// Delays used by the conversation engine, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub delivery_delay_ms: Millis,
    /// Synthetic reply delay is drawn uniformly from `[min, max)`.
    pub reply_delay_min_ms: Millis,
    pub reply_delay_max_ms: Millis,
    pub typing_duration_ms: Millis,
    pub notification_ttl_ms: Millis,
    pub welcome_delay_ms: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            delivery_delay_ms: 500,
            reply_delay_min_ms: 2_000,
            reply_delay_max_ms: 4_000,
            typing_duration_ms: 1_500,
            notification_ttl_ms: 4_000,
            welcome_delay_ms: 1_000,
        }
    }
}

/// How the simulated permission prompt answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionConfig {
    pub grant: bool,
    pub delay_ms: u64,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            grant: true,
            delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub current_user: Participant,
    pub timings: Timings,
    pub seed_demo_messages: bool,
    pub welcome_notification: bool,
    pub permission: PermissionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_user: Participant::new("alice", "Alice Johnson", Presence::Online),
            timings: Timings::default(),
            seed_demo_messages: true,
            welcome_notification: true,
            permission: PermissionConfig::default(),
        }
    }
}

/// Load the config, falling back to defaults when the file is missing or broken.
pub fn load_config(path: &str) -> AppConfig {
    match try_load_config(path) {
        Ok(config) => config,
        Err(ChatError::ConfigIo { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            log::info!("Config file {path} not found ({source}); using defaults");
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("{err}; using defaults");
            AppConfig::default()
        }
    }
}

pub fn try_load_config(path: &str) -> ChatResult<AppConfig> {
    let content = fs::read_to_string(path).map_err(|source| ChatError::ConfigIo {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str::<AppConfig>(&content).map_err(|source| ChatError::ConfigParse {
        path: path.to_string(),
        source,
    })
}

pub fn save_config(path: &str, config: &AppConfig) -> ChatResult<()> {
    let io_err = |source| ChatError::ConfigIo {
        path: path.to_string(),
        source,
    };
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let json = serde_json::to_string_pretty(config).map_err(|source| ChatError::ConfigParse {
        path: path.to_string(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config(path.to_str().unwrap());
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timings.delivery_delay_ms, 500);
        assert_eq!(config.current_user.id, "alice");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        fs::write(
            &path,
            r#"{ "seed_demo_messages": false, "timings": { "typing_duration_ms": 10 } }"#,
        )
        .unwrap();

        let config = load_config(path.to_str().unwrap());
        assert!(!config.seed_demo_messages);
        assert_eq!(config.timings.typing_duration_ms, 10);
        assert_eq!(config.timings.notification_ttl_ms, 4_000);
        assert!(config.welcome_notification);
    }

    #[test]
    fn malformed_file_is_an_error_but_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.json");
        fs::write(&path, "{ not json").unwrap();
        let path = path.to_str().unwrap();

        assert!(matches!(
            try_load_config(path),
            Err(ChatError::ConfigParse { .. })
        ));
        assert_eq!(load_config(path), AppConfig::default());
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat.json");
        let path = path.to_str().unwrap();

        let mut config = AppConfig::default();
        config.permission.grant = false;
        save_config(path, &config).unwrap();
        assert_eq!(try_load_config(path).unwrap(), config);
    }
}
