use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub oracle: OracleConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub health_check_port: u16,
    pub static_dir: String,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct OracleConfig {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub server_port: Option<u16>,
    pub oracle_enabled: Option<bool>,
    pub oracle_api_key: Option<String>,
    pub oracle_model: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8000,
                health_check_port: 8080,
                static_dir: "static".to_string(),
                graceful_shutdown_secs: 15,
            },
            oracle: OracleConfig {
                enabled: false,
                base_url: "https://openrouter.ai/api/v1".to_string(),
                api_key: None,
                model: "mistralai/mixtral-8x7b".to_string(),
                temperature: 0.3,
                timeout_secs: 30,
            },
            catalog: CatalogConfig { path: PathBuf::from("data/cards.json") },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("cardwise.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(health_check_port) = server.health_check_port {
                self.server.health_check_port = health_check_port;
            }
            if let Some(static_dir) = server.static_dir {
                self.server.static_dir = static_dir;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(oracle) = patch.oracle {
            if let Some(enabled) = oracle.enabled {
                self.oracle.enabled = enabled;
            }
            if let Some(base_url) = oracle.base_url {
                self.oracle.base_url = base_url;
            }
            if let Some(oracle_api_key_value) = oracle.api_key {
                self.oracle.api_key = Some(secret_value(oracle_api_key_value));
            }
            if let Some(model) = oracle.model {
                self.oracle.model = model;
            }
            if let Some(temperature) = oracle.temperature {
                self.oracle.temperature = temperature;
            }
            if let Some(timeout_secs) = oracle.timeout_secs {
                self.oracle.timeout_secs = timeout_secs;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = PathBuf::from(path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("CARDWISE_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("CARDWISE_SERVER_PORT") {
            self.server.port = parse_u16("CARDWISE_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("CARDWISE_SERVER_HEALTH_CHECK_PORT") {
            self.server.health_check_port = parse_u16("CARDWISE_SERVER_HEALTH_CHECK_PORT", &value)?;
        }
        if let Some(value) = read_env("CARDWISE_SERVER_STATIC_DIR") {
            self.server.static_dir = value;
        }
        if let Some(value) = read_env("CARDWISE_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("CARDWISE_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        if let Some(value) = read_env("CARDWISE_ORACLE_ENABLED") {
            self.oracle.enabled = parse_bool("CARDWISE_ORACLE_ENABLED", &value)?;
        }
        if let Some(value) = read_env("CARDWISE_ORACLE_BASE_URL") {
            self.oracle.base_url = value;
        }
        if let Some(value) = read_env("CARDWISE_ORACLE_API_KEY") {
            self.oracle.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("CARDWISE_ORACLE_MODEL") {
            self.oracle.model = value;
        }
        if let Some(value) = read_env("CARDWISE_ORACLE_TEMPERATURE") {
            self.oracle.temperature = parse_f32("CARDWISE_ORACLE_TEMPERATURE", &value)?;
        }
        if let Some(value) = read_env("CARDWISE_ORACLE_TIMEOUT_SECS") {
            self.oracle.timeout_secs = parse_u64("CARDWISE_ORACLE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("CARDWISE_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(value);
        }

        let log_level =
            read_env("CARDWISE_LOGGING_LEVEL").or_else(|| read_env("CARDWISE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("CARDWISE_LOGGING_FORMAT").or_else(|| read_env("CARDWISE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = catalog_path;
        }
        if let Some(server_port) = overrides.server_port {
            self.server.port = server_port;
        }
        if let Some(oracle_enabled) = overrides.oracle_enabled {
            self.oracle.enabled = oracle_enabled;
        }
        if let Some(oracle_api_key) = overrides.oracle_api_key {
            self.oracle.api_key = Some(secret_value(oracle_api_key));
        }
        if let Some(oracle_model) = overrides.oracle_model {
            self.oracle.model = oracle_model;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_oracle(&self.oracle)?;
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("cardwise.toml"), PathBuf::from("config/cardwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.health_check_port == 0 {
        return Err(ConfigError::Validation(
            "server.health_check_port must be greater than zero".to_string(),
        ));
    }

    if server.static_dir.trim().is_empty() {
        return Err(ConfigError::Validation("server.static_dir must not be empty".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_oracle(oracle: &OracleConfig) -> Result<(), ConfigError> {
    if oracle.timeout_secs == 0 || oracle.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "oracle.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&oracle.temperature) {
        return Err(ConfigError::Validation(
            "oracle.temperature must be in range 0.0..=2.0".to_string(),
        ));
    }

    if !oracle.base_url.starts_with("http://") && !oracle.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "oracle.base_url must start with http:// or https://".to_string(),
        ));
    }

    if oracle.enabled {
        let missing = oracle
            .api_key
            .as_ref()
            .map(|value| value.expose_secret().trim().is_empty())
            .unwrap_or(true);
        if missing {
            return Err(ConfigError::Validation(
                "oracle.api_key is required when oracle.enabled is true. \
                 Set it in cardwise.toml or via CARDWISE_ORACLE_API_KEY"
                    .to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("catalog.path must not be empty".to_string()));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse::<f32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    oracle: Option<OraclePatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    health_check_port: Option<u16>,
    static_dir: Option<String>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct OraclePatch {
    enabled: Option<bool>,
    base_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_load_without_file_or_env() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.server.port == 8000, "default server port should be 8000")?;
        ensure(!config.oracle.enabled, "oracle should be disabled by default")?;
        ensure(
            config.catalog.path.to_string_lossy() == "data/cards.json",
            "default catalog path should point at data/cards.json",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_ORACLE_API_KEY", "sk-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("cardwise.toml");
            fs::write(
                &path,
                r#"
[oracle]
enabled = true
api_key = "${TEST_ORACLE_API_KEY}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            let api_key = config.oracle.api_key.as_ref().map(|key| key.expose_secret().to_string());
            ensure(
                api_key.as_deref() == Some("sk-from-env"),
                "api key should be loaded from environment",
            )
        })();

        clear_vars(&["TEST_ORACLE_API_KEY"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARDWISE_CATALOG_PATH", "from-env/cards.json");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("cardwise.toml");
            fs::write(
                &path,
                r#"
[catalog]
path = "from-file/cards.json"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.path.to_string_lossy() == "from-env/cards.json",
                "env catalog path should win over file and defaults",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")
        })();

        clear_vars(&["CARDWISE_CATALOG_PATH"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARDWISE_LOG_LEVEL", "warn");
        env::set_var("CARDWISE_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warn log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["CARDWISE_LOG_LEVEL", "CARDWISE_LOG_FORMAT"]);
        result
    }

    #[test]
    fn enabled_oracle_without_key_fails_validation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARDWISE_ORACLE_ENABLED", "true");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("oracle.api_key")
            );
            ensure(has_message, "validation failure should mention oracle.api_key")
        })();

        clear_vars(&["CARDWISE_ORACLE_ENABLED"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARDWISE_ORACLE_API_KEY", "sk-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("sk-secret-value"), "debug output should not contain api key")?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )
        })();

        clear_vars(&["CARDWISE_ORACLE_API_KEY"]);
        result
    }
}
