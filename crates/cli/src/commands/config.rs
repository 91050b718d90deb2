use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rosco_core::config::{resolve_config_path, AppConfig};
use serde::Serialize;
use toml::Value;

use super::{load_config, to_data, CommandResult};

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: String,
    pub source: String,
}

pub fn run() -> CommandResult {
    let config = match load_config("config") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let config_file_path = resolve_config_path(None);
    let entries = effective_entries(&config, config_file_path);
    let message = std::iter::once(
        "effective config (source precedence: env > file > default):".to_string(),
    )
    .chain(entries.iter().map(render_line))
    .collect::<Vec<_>>()
    .join("\n");

    CommandResult::success_with_data("config", message, to_data(&entries))
}

fn effective_entries(config: &AppConfig, config_file_path: Option<PathBuf>) -> Vec<ConfigEntry> {
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    vec![
        ConfigEntry {
            key: "server.bind_address",
            value: config.server.bind_address.clone(),
            source: source("server.bind_address", &["ROSCO_SERVER_BIND_ADDRESS"]),
        },
        ConfigEntry {
            key: "server.port",
            value: config.server.port.to_string(),
            source: source("server.port", &["ROSCO_SERVER_PORT"]),
        },
        ConfigEntry {
            key: "server.graceful_shutdown_secs",
            value: config.server.graceful_shutdown_secs.to_string(),
            source: source(
                "server.graceful_shutdown_secs",
                &["ROSCO_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            ),
        },
        ConfigEntry {
            key: "tracking.simulated_latency_ms",
            value: config.tracking.simulated_latency_ms.to_string(),
            source: source(
                "tracking.simulated_latency_ms",
                &["ROSCO_TRACKING_SIMULATED_LATENCY_MS"],
            ),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source("logging.level", &["ROSCO_LOGGING_LEVEL", "ROSCO_LOG_LEVEL"]),
        },
        ConfigEntry {
            key: "logging.format",
            value: format!("{:?}", config.logging.format).to_ascii_lowercase(),
            source: source("logging.format", &["ROSCO_LOGGING_FORMAT", "ROSCO_LOG_FORMAT"]),
        },
    ]
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}
