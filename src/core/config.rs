use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the remote signalement service, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where the current-session record is persisted.
    pub path: PathBuf,
}

impl Config {
    /// Compose the configuration from the process environment. The caller
    /// is responsible for loading any .env file first (`main` does, before
    /// the logger is initialized, so RUST_LOG from .env takes effect).
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            api: ApiConfig::from_env()?,
            session: SessionConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("SIGNALEMENT_API_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = env::var("SIGNALEMENT_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SIGNALEMENT_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl SessionConfig {
    const SESSION_FILE_NAME: &'static str = "session.json";

    pub fn from_env() -> Result<Self, String> {
        let path = match env::var("SIGNALEMENT_SESSION_FILE") {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => Self::default_path(),
        };

        Ok(Self { path })
    }

    /// `$HOME/.signalement/session.json`, or a dotfile in the working
    /// directory when no home directory is available.
    fn default_path() -> PathBuf {
        match env::var("HOME") {
            Ok(home) if !home.is_empty() => PathBuf::from(home)
                .join(".signalement")
                .join(Self::SESSION_FILE_NAME),
            _ => PathBuf::from(".signalement-session.json"),
        }
    }
}
