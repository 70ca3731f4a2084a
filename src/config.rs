use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

pub const GEMINI_API_HOST: &str = "https://generativelanguage.googleapis.com";
pub const MODEL_NAME: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_SERVER_PORT: u16 = 8080;

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const API_KEY_FILE_VAR: &str = "GEMINI_API_KEY_FILE";
const API_HOST_VAR: &str = "GEMINI_API_HOST";
const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";
const SERVER_HOST_VAR: &str = "SERVER_HOST";
const SERVER_PORT_VAR: &str = "SERVER_PORT";

/// Path of the generateContent endpoint, relative to the API host.
pub fn generate_content_path() -> String {
    format!("/v1/models/{}:generateContent", MODEL_NAME)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: set {0}")]
    Missing(&'static str),

    #[error("Configuration value {0} is empty")]
    Empty(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("Unable to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for the outbound Gemini client.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub host: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiConfig {
            api_key: api_key.into(),
            host: GEMINI_API_HOST.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment, after applying a `.env` file
    /// if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = api_key(&lookup)?;

        let host = lookup(API_HOST_VAR)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| GEMINI_API_HOST.to_string());

        let timeout_secs = parse_or(&lookup, TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: TIMEOUT_VAR,
                value: "0".to_string(),
            });
        }

        let server = ServerConfig {
            host: lookup(SERVER_HOST_VAR).unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or(&lookup, SERVER_PORT_VAR, DEFAULT_SERVER_PORT)?,
        };

        Ok(AppConfig {
            gemini: GeminiConfig {
                api_key,
                host,
                timeout: Duration::from_secs(timeout_secs),
            },
            server,
        })
    }
}

/// Resolves the API key, preferring the variable over the secret file.
fn api_key<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_VAR) {
        return non_empty(API_KEY_VAR, key);
    }
    if let Some(path) = lookup(API_KEY_FILE_VAR) {
        let path = PathBuf::from(path);
        let contents = fs::read_to_string(&path)
            .map_err(|source| ConfigError::Unreadable { path, source })?;
        return non_empty(API_KEY_FILE_VAR, contents);
    }
    Err(ConfigError::Missing(API_KEY_VAR))
}

fn non_empty(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(trimmed.to_string())
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}
