//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables have fallback defaults so the server starts out of the
//! box; the secret defaults are insecure and logged as warnings.
//!
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite:vitrine.db?mode=rwc`)
//! - `JWT_SECRET` - Bearer token signing secret (insecure default)
//! - `INITIAL_ADMIN_EMAIL` / `INITIAL_ADMIN_PASSWORD` - Bootstrap
//!   administrator credentials, used only when the admin table is empty
//!
//! ## Optional (Cloudinary - enables image uploads)
//! - `CLOUDINARY_CLOUD_NAME`
//! - `CLOUDINARY_API_KEY`
//! - `CLOUDINARY_API_SECRET`

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite:vitrine.db?mode=rwc";
const DEFAULT_JWT_SECRET: &str = "insecure-dev-secret-change-me";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "change-me";
const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "change-me",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// `SQLite` database connection string
    pub database_url: String,
    /// Bearer token signing secret
    pub jwt_secret: SecretString,
    /// External media store configuration (optional - enables uploads)
    pub media: Option<MediaStoreConfig>,
    /// Bootstrap administrator credentials
    pub bootstrap_admin: BootstrapAdminConfig,
}

/// Cloudinary credentials.
///
/// Implements `Debug` manually to redact the API secret.
#[derive(Clone)]
pub struct MediaStoreConfig {
    /// Cloudinary cloud name (first URL path segment)
    pub cloud_name: String,
    /// API key (sent with every signed request)
    pub api_key: String,
    /// API secret (signs upload and destroy requests)
    pub api_secret: SecretString,
}

impl std::fmt::Debug for MediaStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStoreConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl MediaStoreConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cloud_name = get_optional_env("CLOUDINARY_CLOUD_NAME");
        let api_key = get_optional_env("CLOUDINARY_API_KEY");
        let api_secret = get_optional_env("CLOUDINARY_API_SECRET");

        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Some(Self {
                cloud_name,
                api_key,
                api_secret: SecretString::from(api_secret),
            })),
            (None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "CLOUDINARY_*".to_owned(),
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET \
                 must be set together"
                    .to_owned(),
            )),
        }
    }
}

/// Credentials for the administrator seeded on first startup.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct BootstrapAdminConfig {
    /// Email of the seeded administrator
    pub email: String,
    /// Cleartext password, hashed before it is stored
    pub password: SecretString,
    /// Display name of the seeded administrator
    pub name: String,
}

impl std::fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    /// Insecure fallback secrets are accepted but logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid, or if the
    /// Cloudinary variables are only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_owned(), e.to_string()))?;
        let database_url = get_env_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret = get_env_or_default("JWT_SECRET", DEFAULT_JWT_SECRET);
        warn_if_weak_secret("JWT_SECRET", &jwt_secret);

        let media = MediaStoreConfig::from_env()?;

        let admin_email = get_env_or_default("INITIAL_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL);
        let admin_password = get_env_or_default("INITIAL_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);
        warn_if_weak_secret("INITIAL_ADMIN_PASSWORD", &admin_password);

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret: SecretString::from(jwt_secret),
            media,
            bootstrap_admin: BootstrapAdminConfig {
                email: admin_email,
                password: SecretString::from(admin_password),
                name: DEFAULT_ADMIN_NAME.to_owned(),
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the bearer token signing secret.
    #[must_use]
    pub const fn jwt_secret(&self) -> &SecretString {
        &self.jwt_secret
    }

    /// Returns the media store configuration (if configured).
    #[must_use]
    pub const fn media(&self) -> Option<&MediaStoreConfig> {
        self.media.as_ref()
    }
}

/// Whether a secret value matches a known placeholder pattern.
fn looks_like_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Log a warning for default or placeholder-looking secrets.
///
/// The fallback defaults keep local development friction-free; running
/// production on them is the documented risk this warning flags.
fn warn_if_weak_secret(name: &str, value: &str) {
    if looks_like_placeholder(value) || value.len() < 16 {
        tracing::warn!(
            variable = name,
            "using a default or weak value; set a strong value in production"
        );
    }
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        assert!(looks_like_placeholder("change-me"));
        assert!(looks_like_placeholder("YOUR-api-key-here"));
        assert!(looks_like_placeholder(DEFAULT_JWT_SECRET));
        assert!(!looks_like_placeholder("kJ8#mQ2vR9xW4zL7nB3t"));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            jwt_secret: SecretString::from("x".repeat(32)),
            media: None,
            bootstrap_admin: BootstrapAdminConfig {
                email: DEFAULT_ADMIN_EMAIL.to_owned(),
                password: SecretString::from("test-password"),
                name: DEFAULT_ADMIN_NAME.to_owned(),
            },
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_media_store_config_debug_redacts_secret() {
        let config = MediaStoreConfig {
            cloud_name: "demo".to_owned(),
            api_key: "123456789".to_owned(),
            api_secret: SecretString::from("super_secret_value"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("demo"));
        assert!(debug_output.contains("123456789"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_value"));
    }

    #[test]
    fn test_bootstrap_admin_debug_redacts_password() {
        let config = BootstrapAdminConfig {
            email: "admin@example.com".to_owned(),
            password: SecretString::from("hunter2-hunter2"),
            name: "Administrator".to_owned(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("admin@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-hunter2"));
    }
}
