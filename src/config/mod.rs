use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub remote: RemoteConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the hosted Supabase project
#[derive(Clone)]
pub struct RemoteConfig {
    pub url: Url,
    pub anon_key: String,
    pub service_role_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub dashboard_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub cors_origins: CorsOrigins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return CorsOrigins::Any;
        }
        CorsOrigins::List(
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

// Keys never show up in logs
impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"<redacted>")
            .field("service_role_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let raw_url = required("SUPABASE_URL")?;
        let url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            name: "SUPABASE_URL",
            reason: e.to_string(),
        })?;

        let remote = RemoteConfig {
            url,
            anon_key: required("SUPABASE_ANON_KEY")?,
            service_role_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
            timeout_secs: 30,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(remote),
            Environment::Staging => Self::staging(remote),
            Environment::Development => Self::development(remote),
        };

        config.with_overrides(&lookup)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{}' is not a port number", v),
            })?;
        }
        if let Some(v) = lookup("REMOTE_TIMEOUT_SECS") {
            self.remote.timeout_secs = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "REMOTE_TIMEOUT_SECS",
                        reason: format!("'{}' is not a positive number of seconds", v),
                    })
                }
            };
        }
        if let Some(v) = lookup("DASHBOARD_ENABLED") {
            self.api.dashboard_enabled = parse_flag(&v).ok_or_else(|| ConfigError::Invalid {
                name: "DASHBOARD_ENABLED",
                reason: format!("'{}' is not a boolean", v),
            })?;
        }
        if let Some(v) = lookup("CORS_ORIGIN") {
            self.security.cors_origins = CorsOrigins::parse(&v);
        }

        Ok(self)
    }

    fn development(remote: RemoteConfig) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            remote,
            api: ApiConfig {
                dashboard_enabled: true,
            },
            security: SecurityConfig {
                cors_origins: CorsOrigins::List(vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ]),
            },
        }
    }

    fn staging(remote: RemoteConfig) -> Self {
        Self {
            environment: Environment::Staging,
            security: SecurityConfig {
                cors_origins: CorsOrigins::Any,
            },
            ..Self::development(remote)
        }
    }

    fn production(remote: RemoteConfig) -> Self {
        Self {
            environment: Environment::Production,
            security: SecurityConfig {
                cors_origins: CorsOrigins::List(vec!["https://elite-real.vercel.app".to_string()]),
            },
            ..Self::development(remote)
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
