//! Service configuration
//!
//! Defaults point at the public water data and weather services. Hosts
//! override them through the builder methods or `WATERDATA_*` environment
//! variables.

use networking::HttpClientConfig;
use std::time::Duration;

use crate::timezone::WEATHER_SERVICE_ROOT;
use crate::{Result, ServiceError};

/// Default root of the water data web services
pub const WATER_SERVICES_ROOT: &str = "https://waterservices.usgs.gov";

/// Environment variable names read by [`ServicesConfig::from_env`]
pub mod env_keys {
    /// Water data web services root
    pub const SERVICE_ROOT: &str = "WATERDATA_SERVICE_ROOT";
    /// Weather service root used for timezone lookups
    pub const WEATHER_SERVICE_ROOT: &str = "WATERDATA_WEATHER_SERVICE_ROOT";
    /// Enables the cooperator lookup (`true`/`false`, `1`/`0`)
    pub const COOPERATOR_LOOKUP_ENABLED: &str = "WATERDATA_COOPERATOR_LOOKUP_ENABLED";
    /// Cooperator lookup service root
    pub const COOPERATOR_LOOKUP_ROOT: &str = "WATERDATA_COOPERATOR_LOOKUP_ROOT";
    /// Cooperator lookup service path
    pub const COOPERATOR_LOOKUP_PATH: &str = "WATERDATA_COOPERATOR_LOOKUP_PATH";
    /// HTTP timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "WATERDATA_HTTP_TIMEOUT_SECS";
    /// HTTP user agent
    pub const USER_AGENT: &str = "WATERDATA_USER_AGENT";
}

/// Location of the cooperating partner lookup service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooperatorLookupConfig {
    /// Root of the lookup service
    pub root: String,
    /// Path of the lookup endpoint, resolved against the root
    pub path: String,
    /// Query parameter carrying the monitoring location number
    pub site_param: String,
}

impl Default for CooperatorLookupConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            path: String::new(),
            site_param: "SiteNumber".to_string(),
        }
    }
}

/// Configuration for the service lookups
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    /// Root of the water data web services
    pub service_root: String,
    /// Root of the weather service used for timezone lookups
    pub weather_service_root: String,
    /// Whether cooperator lookups hit the live service
    pub cooperator_lookup_enabled: bool,
    /// Cooperator lookup service location
    pub cooperator_lookup: CooperatorLookupConfig,
    /// HTTP client configuration
    pub http: HttpClientConfig,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            service_root: WATER_SERVICES_ROOT.to_string(),
            weather_service_root: WEATHER_SERVICE_ROOT.to_string(),
            cooperator_lookup_enabled: false,
            cooperator_lookup: CooperatorLookupConfig::default(),
            http: HttpClientConfig::default(),
        }
    }
}

impl ServicesConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides from a key lookup, starting from the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(root) = lookup(env_keys::SERVICE_ROOT) {
            config.service_root = root;
        }
        if let Some(root) = lookup(env_keys::WEATHER_SERVICE_ROOT) {
            config.weather_service_root = root;
        }
        if let Some(root) = lookup(env_keys::COOPERATOR_LOOKUP_ROOT) {
            config.cooperator_lookup.root = root;
        }
        if let Some(path) = lookup(env_keys::COOPERATOR_LOOKUP_PATH) {
            config.cooperator_lookup.path = path;
        }
        if let Some(flag) = lookup(env_keys::COOPERATOR_LOOKUP_ENABLED) {
            config.cooperator_lookup_enabled = parse_flag(env_keys::COOPERATOR_LOOKUP_ENABLED, &flag)?;
        }
        if let Some(secs) = lookup(env_keys::HTTP_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| ServiceError::InvalidConfig {
                key: env_keys::HTTP_TIMEOUT_SECS.to_string(),
                value: secs.clone(),
            })?;
            config.http = config.http.with_timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = lookup(env_keys::USER_AGENT) {
            config.http = config.http.with_user_agent(agent);
        }

        Ok(config)
    }

    /// Set the water data web services root
    pub fn with_service_root(mut self, root: impl Into<String>) -> Self {
        self.service_root = root.into();
        self
    }

    /// Set the weather service root
    pub fn with_weather_service_root(mut self, root: impl Into<String>) -> Self {
        self.weather_service_root = root.into();
        self
    }

    /// Enable live cooperator lookups against a service
    pub fn with_cooperator_lookup(mut self, root: impl Into<String>, path: impl Into<String>) -> Self {
        self.cooperator_lookup.root = root.into();
        self.cooperator_lookup.path = path.into();
        self.cooperator_lookup_enabled = true;
        self
    }

    /// Set the HTTP client configuration
    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ServiceError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
