//! Lookups bound to a hosting application
//!
//! [`ServiceContext`] is built once at startup from a [`ServicesConfig`].
//! It owns the HTTP client and the cooperator provider selected for the
//! configuration, and holds no other state, so it can be shared freely
//! between request handlers.

use networking::{HttpClient, Response};
use rdb::RdbRecord;
use std::fmt::Display;
use std::sync::Arc;

use crate::config::ServicesConfig;
use crate::cooperator::{cooperator_provider, CooperatorInfo, CooperatorProvider};
use crate::timezone::{site_timezone_offset, TimezoneInfo};
use crate::{site, Result};

/// Service lookups bound to one configuration
#[derive(Clone)]
pub struct ServiceContext {
    client: HttpClient,
    config: ServicesConfig,
    cooperators: Arc<dyn CooperatorProvider>,
}

impl ServiceContext {
    /// Build the HTTP client and select the cooperator provider
    pub fn new(config: ServicesConfig) -> Result<Self> {
        let client = HttpClient::new(config.http.clone())?;
        let cooperators = cooperator_provider(&config, &client);
        Ok(Self {
            client,
            config,
            cooperators,
        })
    }

    /// Replace the cooperator provider
    pub fn with_cooperator_provider(mut self, provider: Arc<dyn CooperatorProvider>) -> Self {
        self.cooperators = provider;
        self
    }

    /// Guarded GET against the water services root
    pub async fn get<I, K, V>(&self, path: &str, params: I) -> Result<Response>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(self
            .client
            .get(&self.config.service_root, Some(path), params)
            .await?)
    }

    /// Site service records for a monitoring location
    pub async fn site_records(
        &self,
        site_no: &str,
        agency_cd: Option<&str>,
    ) -> Result<Option<Vec<RdbRecord>>> {
        site::fetch_site_records(&self.client, &self.config.service_root, site_no, agency_cd).await
    }

    /// Cooperating partners of a monitoring location
    pub async fn cooperators(&self, site_no: &str) -> Result<Option<CooperatorInfo>> {
        self.cooperators.cooperators_for_site(site_no).await
    }

    /// Timezone and UTC offsets at a site's coordinates
    pub async fn site_timezone(
        &self,
        latitude: impl Display,
        longitude: impl Display,
    ) -> Result<TimezoneInfo> {
        site_timezone_offset(
            &self.client,
            &self.config.weather_service_root,
            latitude,
            longitude,
        )
        .await
    }

    /// The HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// The configuration
    pub fn config(&self) -> &ServicesConfig {
        &self.config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("client", &self.client)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
