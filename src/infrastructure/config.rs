use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub gigachat: GigaChatConfig,
    pub storage: StorageConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

#[derive(Clone)]
pub struct GigaChatConfig {
    pub oauth_url: String,
    pub scope: String,
    pub api_key: String,
    /// Validity in minutes assumed when the upstream omits it
    pub token_ttl_minutes: i32,
    pub accept_invalid_certs: bool,
}

#[derive(Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Cloud CLI used for IAM lookups
    pub program: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let token_ttl_minutes: i32 = vars.required_parsed("GIGACHAT_TOKEN_TTL")?;
        if token_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "GIGACHAT_TOKEN_TTL",
                value: token_ttl_minutes.to_string(),
            });
        }

        Ok(Self {
            server: ServerConfig {
                host: vars.or("HOST", "0.0.0.0"),
                port: vars.parsed_or("PORT", 8000)?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parsed_or("DB_MAX_CONNECTIONS", 20)?,
                min_connections: vars.parsed_or("DB_MIN_CONNECTIONS", 5)?,
                acquire_timeout: Duration::from_secs(vars.parsed_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
                idle_timeout: Duration::from_secs(vars.parsed_or("DB_IDLE_TIMEOUT_SECS", 600)?),
            },
            gigachat: GigaChatConfig {
                oauth_url: vars.required("GIGACHAT_OAUTH_URL")?,
                scope: vars.required("GIGACHAT_API_SCOPE")?,
                api_key: vars.required("GIGACHAT_API_KEY")?,
                token_ttl_minutes,
                accept_invalid_certs: vars.parsed_or("GIGACHAT_ACCEPT_INVALID_CERTS", false)?,
            },
            storage: StorageConfig {
                bucket: vars.required("OBS_BUCKET")?,
                endpoint: vars.optional("OBS_ENDPOINT"),
                region: vars.or("OBS_REGION", "ru-moscow-1"),
                access_key_id: vars.optional("OBS_ACCESS_KEY_ID"),
                secret_access_key: vars.optional("OBS_SECRET_ACCESS_KEY"),
            },
            identity: IdentityConfig {
                program: vars.or("IAM_CLI", "cloud"),
            },
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &'static str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn or(&self, key: &'static str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn required_parsed<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let value = self.required(key)?;
        parse(key, value)
    }

    fn parsed_or<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.optional(key) {
            Some(value) => parse(key, value),
            None => Ok(default),
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

impl fmt::Debug for GigaChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GigaChatConfig")
            .field("oauth_url", &self.oauth_url)
            .field("scope", &self.scope)
            .field("api_key", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
