use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use cardwise_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let mut push = |key: &str, value: &str, env_key: Option<&str>| {
        lines.push(render_line(
            key,
            value,
            field_source(key, env_key, config_file_doc.as_ref(), config_file_path.as_deref()),
        ));
    };

    push(
        "server.bind_address",
        &config.server.bind_address,
        Some("CARDWISE_SERVER_BIND_ADDRESS"),
    );
    push("server.port", &config.server.port.to_string(), Some("CARDWISE_SERVER_PORT"));
    push(
        "server.health_check_port",
        &config.server.health_check_port.to_string(),
        Some("CARDWISE_SERVER_HEALTH_CHECK_PORT"),
    );
    push("server.static_dir", &config.server.static_dir, Some("CARDWISE_SERVER_STATIC_DIR"));

    push(
        "oracle.enabled",
        &config.oracle.enabled.to_string(),
        Some("CARDWISE_ORACLE_ENABLED"),
    );
    push("oracle.base_url", &config.oracle.base_url, Some("CARDWISE_ORACLE_BASE_URL"));
    let oracle_api_key = if config.oracle.api_key.is_some() { "<redacted>" } else { "<unset>" };
    push("oracle.api_key", oracle_api_key, Some("CARDWISE_ORACLE_API_KEY"));
    push("oracle.model", &config.oracle.model, Some("CARDWISE_ORACLE_MODEL"));
    push(
        "oracle.timeout_secs",
        &config.oracle.timeout_secs.to_string(),
        Some("CARDWISE_ORACLE_TIMEOUT_SECS"),
    );

    push(
        "catalog.path",
        &config.catalog.path.display().to_string(),
        Some("CARDWISE_CATALOG_PATH"),
    );

    push("logging.level", &config.logging.level, Some("CARDWISE_LOGGING_LEVEL"));
    push("logging.format", &format!("{:?}", config.logging.format), Some("CARDWISE_LOGGING_FORMAT"));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("cardwise.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/cardwise.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
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

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
