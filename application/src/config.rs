//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::strapi;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Content store configuration.
    pub store: Store,

    /// Listings configuration.
    pub listings: Listings,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,

    /// Maximum size of a request body accepted by the upload endpoint, in
    /// bytes.
    #[default(20 * 1024 * 1024)]
    pub upload_limit: usize,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Content store configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Store {
    /// Base URL of the content store.
    #[default("http://127.0.0.1:1337".to_owned())]
    pub base_url: String,

    /// API token to authorize the requests with, if any.
    pub api_token: Option<String>,

    /// Timeout of a single request to the content store.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Store> for strapi::Config {
    fn from(value: Store) -> Self {
        let Store {
            base_url,
            api_token,
            timeout,
        } = value;

        Self {
            base_url,
            api_token: api_token.filter(|t| !t.is_empty()).map(Into::into),
            timeout,
        }
    }
}

/// Listings configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Listings {
    /// Page size used when a client doesn't request one.
    #[default(10)]
    pub default_page_size: usize,

    /// Number of featured listings returned by default.
    #[default(6)]
    pub featured_limit: usize,

    /// Page size of the curation lists.
    #[default(100)]
    pub curation_page_size: usize,
}

impl From<Listings> for service::Config {
    fn from(value: Listings) -> Self {
        let Listings {
            default_page_size,
            featured_limit,
            curation_page_size,
        } = value;

        Self {
            default_page_size,
            featured_limit,
            curation_page_size,
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use service::infra::strapi;

    use super::{Config, Listings, Store};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("definitely-missing-config").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.store.timeout, Duration::from_secs(10));
        assert_eq!(conf.listings.featured_limit, 6);
    }

    #[test]
    fn fills_missing_sections_with_defaults() {
        let conf: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[listings]\nfeatured_limit = 3\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(conf.listings.featured_limit, 3);
        assert_eq!(conf.listings.default_page_size, 10);
        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.store.timeout, Duration::from_secs(10));
    }

    #[test]
    fn ignores_empty_api_token() {
        let conf = strapi::Config::from(Store {
            api_token: Some(String::new()),
            ..Store::default()
        });

        assert!(conf.api_token.is_none());
    }

    #[test]
    fn converts_listings_into_service_config() {
        let conf = service::Config::from(Listings {
            default_page_size: 20,
            ..Listings::default()
        });

        assert_eq!(conf.default_page_size, 20);
        assert_eq!(conf.curation_page_size, 100);
    }
}
