//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use brain_core::DEFAULT_REQUEST_MAX_TOKENS;
use orchestrator::ControllerConfig;

/// Name of the WARN-level log file inside the log directory.
pub const WARNING_LOG_FILE: &str = "warning.log";

const DEFAULT_ADDR: &str = "127.0.0.1:8790";
const DEFAULT_DATABASE_URL: &str = "sqlite:tutor.db?mode=rwc";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

/// Gateway configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Bearer token the chat front-end must present.
    pub bot_token: String,
    /// Identity allowed to dump the warning log.
    pub operator_id: Option<i64>,
    /// Directory holding `warning.log`.
    pub log_dir: PathBuf,
    /// Token ceiling for a single user message.
    pub request_max_tokens: usize,
    /// Bound on one completion call.
    pub completion_timeout: Duration,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TUTOR_BOT_TOKEN` | Front-end bearer token | (required) |
    /// | `TUTOR_DEBUG_ID` | Operator identity for `/debug` | unset |
    /// | `TUTOR_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:tutor.db?mode=rwc` |
    /// | `TUTOR_LOG_DIR` | Directory for `warning.log` | `logs` |
    /// | `TUTOR_REQUEST_MAX_TOKENS` | Per-message token ceiling | `500` |
    /// | `TUTOR_COMPLETION_TIMEOUT_SECS` | Completion call bound | `60` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = env::var("TUTOR_BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingBotToken)?;

        let addr = env::var("TUTOR_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let operator_id = parse_optional::<i64>("TUTOR_DEBUG_ID")?;
        let request_max_tokens = parse_optional::<usize>("TUTOR_REQUEST_MAX_TOKENS")?
            .unwrap_or(DEFAULT_REQUEST_MAX_TOKENS);
        let completion_timeout = parse_optional::<u64>("TUTOR_COMPLETION_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS));

        Ok(Self {
            addr,
            database_url,
            bot_token,
            operator_id,
            log_dir: log_dir_from_env(),
            request_max_tokens,
            completion_timeout,
        })
    }

    /// Full path of the warning log.
    pub fn warning_log_path(&self) -> PathBuf {
        self.log_dir.join(WARNING_LOG_FILE)
    }

    /// Settings for the conversation controller.
    pub fn controller_config(&self) -> ControllerConfig {
        let mut builder = ControllerConfig::builder()
            .warning_log(self.warning_log_path())
            .request_max_tokens(self.request_max_tokens)
            .completion_timeout(self.completion_timeout);
        if let Some(id) = self.operator_id {
            builder = builder.operator_id(id);
        }
        builder.build()
    }
}

/// Log directory, readable before the rest of the config so logging can
/// start first.
pub fn log_dir_from_env() -> PathBuf {
    env::var("TUTOR_LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(DEFAULT_LOG_DIR).to_path_buf())
}

fn parse_optional<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TUTOR_BOT_TOKEN environment variable is required")]
    MissingBotToken,

    #[error("Invalid TUTOR_ADDR format")]
    InvalidAddr,

    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "TUTOR_BOT_TOKEN",
        "TUTOR_DEBUG_ID",
        "TUTOR_ADDR",
        "SQLITE_PATH",
        "TUTOR_LOG_DIR",
        "TUTOR_REQUEST_MAX_TOKENS",
        "TUTOR_COMPLETION_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_from_env_scenarios() {
        let _lock = ENV_LOCK.lock().unwrap();

        // Missing token is fatal
        clear_env();
        assert!(matches!(
            GatewayConfig::from_env(),
            Err(ConfigError::MissingBotToken)
        ));

        env::set_var("TUTOR_BOT_TOKEN", "   ");
        assert!(matches!(
            GatewayConfig::from_env(),
            Err(ConfigError::MissingBotToken)
        ));

        // Defaults
        env::set_var("TUTOR_BOT_TOKEN", "secret");
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "secret");
        assert_eq!(config.addr, "127.0.0.1:8790".parse().unwrap());
        assert_eq!(config.database_url, "sqlite:tutor.db?mode=rwc");
        assert_eq!(config.operator_id, None);
        assert_eq!(config.warning_log_path(), PathBuf::from("logs/warning.log"));
        assert_eq!(config.request_max_tokens, 500);
        assert_eq!(config.completion_timeout, Duration::from_secs(60));

        // Overrides flow into the controller config
        env::set_var("TUTOR_DEBUG_ID", "12345");
        env::set_var("TUTOR_LOG_DIR", "/var/log/tutor");
        env::set_var("TUTOR_REQUEST_MAX_TOKENS", "64");
        env::set_var("TUTOR_COMPLETION_TIMEOUT_SECS", "5");
        let controller = GatewayConfig::from_env().unwrap().controller_config();
        assert_eq!(controller.operator_id, Some(12345));
        assert_eq!(
            controller.warning_log,
            Some(PathBuf::from("/var/log/tutor/warning.log"))
        );
        assert_eq!(controller.request_max_tokens, 64);
        assert_eq!(controller.completion_timeout, Duration::from_secs(5));

        // Bad values
        env::set_var("TUTOR_DEBUG_ID", "operator");
        assert!(matches!(
            GatewayConfig::from_env(),
            Err(ConfigError::InvalidNumber { var: "TUTOR_DEBUG_ID", .. })
        ));
        env::remove_var("TUTOR_DEBUG_ID");

        env::set_var("TUTOR_ADDR", "not an address");
        assert!(matches!(
            GatewayConfig::from_env(),
            Err(ConfigError::InvalidAddr)
        ));

        clear_env();
    }
}
