//! Server configuration from environment variables.
//!
//! | Variable              | Default                 |
//! |-----------------------|-------------------------|
//! | `TRIP_DATA`           | `data/deals.json`       |
//! | `TRIP_ADDR`           | `127.0.0.1:3000`        |
//! | `TRIP_STATIC_DIR`     | unset (no static files) |
//! | `TRIP_CACHE_TTL_SECS` | `300`                   |
//! | `TRIP_CACHE_CAPACITY` | `1000`                  |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::dataset::DealSource;

/// Default dataset location, relative to the working directory.
const DEFAULT_DATA: &str = "data/deals.json";

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// A configuration variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}={value:?}: {reason}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
    reason: String,
}

/// Configuration for the trip server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Where to load deals from.
    pub data: DealSource,

    /// Address to listen on.
    pub addr: SocketAddr,

    /// Directory served under `/static`, if any.
    pub static_dir: Option<PathBuf>,

    /// Route cache settings.
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data = DealSource::parse(get("TRIP_DATA").as_deref().unwrap_or(DEFAULT_DATA));

        let addr: SocketAddr =
            parse_var("TRIP_ADDR", get("TRIP_ADDR"), DEFAULT_ADDR.parse().ok())?;

        let static_dir = get("TRIP_STATIC_DIR").map(PathBuf::from);

        let defaults = CacheConfig::default();
        let ttl_secs = parse_var(
            "TRIP_CACHE_TTL_SECS",
            get("TRIP_CACHE_TTL_SECS"),
            Some(defaults.ttl.as_secs()),
        )?;
        let max_capacity = parse_var(
            "TRIP_CACHE_CAPACITY",
            get("TRIP_CACHE_CAPACITY"),
            Some(defaults.max_capacity),
        )?;

        Ok(Self {
            data,
            addr,
            static_dir,
            cache: CacheConfig {
                ttl: Duration::from_secs(ttl_secs),
                max_capacity,
            },
        })
    }
}

/// Parse `value` if set, else fall back to `default`.
fn parse_var<T>(
    name: &'static str,
    value: Option<String>,
    default: Option<T>,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            name,
            reason: e.to_string(),
            value,
        }),
        None => default.ok_or_else(|| ConfigError {
            name,
            value: String::new(),
            reason: "no default available".to_string(),
        }),
    }
}
