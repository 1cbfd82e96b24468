//! Cooperating partner lookup
//!
//! Monitoring locations are often funded by partner organizations. The
//! partner directory service answers with a JSON document listing them
//! under `Customers`; a location with no partners gets an empty list.

use async_trait::async_trait;
use networking::HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::{CooperatorLookupConfig, ServicesConfig};
use crate::strategy::defined_when;
use crate::{Result, ServiceError};

/// Field of the lookup response listing the partners
pub const CUSTOMERS_FIELD: &str = "Customers";

/// Partner information for a monitoring location
///
/// Wraps the full decoded body of the lookup service. Only constructed when
/// the body lists at least one partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooperatorInfo(Value);

impl CooperatorInfo {
    /// Wrap a decoded lookup body, if it lists any partner
    ///
    /// A missing or zero-length `Customers` field means no partners. A body
    /// that is not an object, or a `Customers` value without a length, is
    /// an error.
    pub fn from_body(body: Value) -> Result<Option<Self>> {
        let fields = body.as_object().ok_or_else(|| {
            ServiceError::UnexpectedBody(format!("expected an object, got {}", kind(&body)))
        })?;

        let listed = match fields.get(CUSTOMERS_FIELD) {
            None => 0,
            Some(Value::Array(customers)) => customers.len(),
            Some(Value::Object(customers)) => customers.len(),
            Some(Value::String(customers)) => customers.len(),
            Some(other) => {
                return Err(ServiceError::UnexpectedBody(format!(
                    "{} is {}",
                    CUSTOMERS_FIELD,
                    kind(other)
                )))
            }
        };
        Ok((listed > 0).then_some(Self(body)))
    }

    /// The full decoded body
    pub fn body(&self) -> &Value {
        &self.0
    }

    /// Consume into the full decoded body
    pub fn into_body(self) -> Value {
        self.0
    }

    /// Typed view of the listed partners
    ///
    /// Entries that are not partner objects are skipped.
    pub fn customers(&self) -> Vec<Cooperator> {
        self.0
            .get(CUSTOMERS_FIELD)
            .and_then(Value::as_array)
            .map(|customers| {
                customers
                    .iter()
                    .filter_map(|c| Cooperator::deserialize(c).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A cooperating partner organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooperator {
    /// Partner name
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Partner logo URL
    #[serde(rename = "IconURL", default)]
    pub icon_url: Option<String>,
    /// Partner website
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
}

/// Gather cooperating partner information from the lookup service
///
/// Returns `None` when the service does not answer successfully, answers
/// with malformed JSON, or lists no partners. A malformed service URL, an
/// unexpected transport error or a well-formed body of the wrong shape is
/// returned as an error.
pub async fn lookup_cooperator<I, K, V>(
    client: &HttpClient,
    root: &str,
    path: &str,
    params: I,
) -> Result<Option<CooperatorInfo>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let response = client.get(root, Some(path), params).await?;
    if !response.is_ok() {
        return Ok(None);
    }

    let body: Value = match response.json() {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = %err, "cooperator lookup returned malformed JSON");
            return Ok(None);
        }
    };

    CooperatorInfo::from_body(body)
}

// =============================================================================
// Providers
// =============================================================================

/// Source of partner information for a monitoring location
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CooperatorProvider: Send + Sync {
    /// Partner information for a site number, if any
    async fn cooperators_for_site(&self, site_no: &str) -> Result<Option<CooperatorInfo>>;
}

/// Provider backed by the live lookup service
#[derive(Debug, Clone)]
pub struct HttpCooperatorProvider {
    client: HttpClient,
    config: CooperatorLookupConfig,
}

impl HttpCooperatorProvider {
    /// Create a provider for a lookup service
    pub fn new(client: HttpClient, config: CooperatorLookupConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl CooperatorProvider for HttpCooperatorProvider {
    async fn cooperators_for_site(&self, site_no: &str) -> Result<Option<CooperatorInfo>> {
        lookup_cooperator(
            &self.client,
            &self.config.root,
            &self.config.path,
            [(self.config.site_param.as_str(), site_no)],
        )
        .await
    }
}

/// Provider used when lookups are switched off; never finds partners
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCooperatorProvider;

#[async_trait]
impl CooperatorProvider for DisabledCooperatorProvider {
    async fn cooperators_for_site(&self, _site_no: &str) -> Result<Option<CooperatorInfo>> {
        Ok(None)
    }
}

/// Pick the cooperator provider for a configuration
pub fn cooperator_provider(config: &ServicesConfig, client: &HttpClient) -> Arc<dyn CooperatorProvider> {
    defined_when(
        config.cooperator_lookup_enabled,
        || {
            Arc::new(HttpCooperatorProvider::new(
                client.clone(),
                config.cooperator_lookup.clone(),
            )) as Arc<dyn CooperatorProvider>
        },
        || Arc::new(DisabledCooperatorProvider) as Arc<dyn CooperatorProvider>,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use networking::HttpClientConfig;
    use serde_json::json;

    #[test]
    fn test_from_body_with_partners() {
        let body = json!({
            "Customers": [
                {"Name": "City of Rockville", "IconURL": "https://x.org/logo.png", "URL": "https://x.org"}
            ],
            "SiteNumber": "01646500"
        });

        let info = CooperatorInfo::from_body(body.clone()).unwrap().unwrap();
        assert_eq!(info.body(), &body);
        assert_eq!(info.into_body(), body);
    }

    #[test]
    fn test_from_body_without_partners() {
        assert!(CooperatorInfo::from_body(json!({"Customers": []})).unwrap().is_none());
        assert!(CooperatorInfo::from_body(json!({"Customers": {}})).unwrap().is_none());
        assert!(CooperatorInfo::from_body(json!({"Customers": ""})).unwrap().is_none());
        assert!(CooperatorInfo::from_body(json!({"Other": [1]})).unwrap().is_none());
    }

    #[test]
    fn test_from_body_rejects_unexpected_shapes() {
        for body in [
            json!([{"Customers": [1]}]),
            json!("Customers"),
            json!(null),
            json!({"Customers": null}),
            json!({"Customers": 5}),
            json!({"Customers": true}),
        ] {
            let result = CooperatorInfo::from_body(body.clone());
            assert!(
                matches!(result, Err(ServiceError::UnexpectedBody(_))),
                "expected an error for {}",
                body
            );
        }
    }

    #[test]
    fn test_customers_typed_view() {
        let info = CooperatorInfo::from_body(json!({
            "Customers": [
                {"Name": "State Water Board", "IconURL": "https://x.org/a.png", "URL": "https://a.example"},
                {"Name": "County Parks"},
                "not a partner"
            ]
        }))
        .unwrap()
        .unwrap();

        let customers = info.customers();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name.as_deref(), Some("State Water Board"));
        assert_eq!(customers[0].icon_url.as_deref(), Some("https://x.org/a.png"));
        assert_eq!(customers[0].url.as_deref(), Some("https://a.example"));
        assert_eq!(
            customers[1],
            Cooperator {
                name: Some("County Parks".to_string()),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_disabled_provider_finds_nothing() {
        let provider = DisabledCooperatorProvider;
        assert!(provider.cooperators_for_site("01646500").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_provider_selection_follows_config() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();

        // disabled: never touches the network, even with an unusable root
        let config = ServicesConfig::default();
        let provider = cooperator_provider(&config, &client);
        assert!(provider.cooperators_for_site("01646500").await.unwrap().is_none());

        // enabled with a malformed root: the live provider surfaces the URL error
        let config = ServicesConfig::default().with_cooperator_lookup("not a url", "lookup");
        let provider = cooperator_provider(&config, &client);
        assert!(provider.cooperators_for_site("01646500").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_provider() {
        let mut provider = MockCooperatorProvider::new();
        provider
            .expect_cooperators_for_site()
            .withf(|site_no| site_no == "01646500")
            .times(1)
            .returning(|_| CooperatorInfo::from_body(json!({"Customers": [{"Name": "A"}]})));

        let info = provider.cooperators_for_site("01646500").await.unwrap().unwrap();
        assert_eq!(info.customers()[0].name.as_deref(), Some("A"));
    }
}
