//! HTTP client for the Hot Pepper gourmet search API.
//!
//! Wraps `reqwest` with key management, query construction and envelope
//! normalization. A missing access key is reported per call, before any
//! request leaves the process, so a server can start without one and still
//! answer every search with a configuration error.

use std::time::Duration;

use gurume_core::{SearchCriteria, SearchResult, Shop};
use reqwest::{Client, Url};

use crate::error::HotpepperError;
use crate::normalize;
use crate::params::{self, AmenityMapping};
use crate::types::ApiEnvelope;

pub const DEFAULT_BASE_URL: &str = "https://webservice.recruit.co.jp/hotpepper/gourmet/v1/";

/// Stands in for the access key in URLs handed back to callers.
const REDACTED_KEY: &str = "[redacted]";

/// Client for the gourmet search API.
///
/// Use [`HotpepperClient::new`] for production or
/// [`HotpepperClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct HotpepperClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    amenity_mapping: AmenityMapping,
}

impl HotpepperClient {
    /// Creates a client pointed at the production API.
    ///
    /// `timeout_secs` of `None` leaves requests without a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HotpepperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: Option<u64>) -> Result<Self, HotpepperError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HotpepperError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`HotpepperError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: Option<u64>,
        base_url: &str,
    ) -> Result<Self, HotpepperError> {
        let mut builder = Client::builder().user_agent("gurume/0.1 (restaurant-search)");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash, so query_pairs_mut never rewrites the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| HotpepperError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned).filter(|k| !k.is_empty()),
            base_url,
            amenity_mapping: AmenityMapping::default(),
        })
    }

    #[must_use]
    pub fn with_amenity_mapping(mut self, mapping: AmenityMapping) -> Self {
        self.amenity_mapping = mapping;
        self
    }

    /// Searches shops and normalizes the page of results.
    ///
    /// # Errors
    ///
    /// - [`HotpepperError::MissingApiKey`] before any request when no key is configured.
    /// - [`HotpepperError::UpstreamStatus`] on a non-2xx response.
    /// - [`HotpepperError::Api`] when the envelope reports an error.
    /// - [`HotpepperError::Http`] / [`HotpepperError::Deserialize`] on
    ///   network or decoding failure.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, HotpepperError> {
        let key = self.api_key()?;
        let extra = params::search_params(criteria, self.amenity_mapping);
        let url = self.build_url(key, &extra);

        let envelope = self.request_envelope(&url).await?;
        let public_url = self.build_url(REDACTED_KEY, &extra);
        let result = normalize::into_search_result(envelope, public_url.to_string())?;

        tracing::debug!(
            total_available = result.total_available,
            total_returned = result.total_returned,
            shops = result.shops.len(),
            "shop search completed"
        );
        Ok(result)
    }

    /// Fetches one shop by its upstream identifier.
    ///
    /// If the upstream returns several records the first well-formed one is
    /// used. Records lacking `id` or `name` are skipped, so a response holding
    /// only such records is reported as not found.
    ///
    /// # Errors
    ///
    /// - [`HotpepperError::MissingApiKey`] before any request when no key is configured.
    /// - [`HotpepperError::NotFound`] when the upstream returns no well-formed record.
    /// - [`HotpepperError::UpstreamStatus`] on a non-2xx response.
    /// - [`HotpepperError::Api`], [`HotpepperError::Http`],
    ///   [`HotpepperError::Deserialize`] as for [`HotpepperClient::search`].
    pub async fn get_shop(&self, id: &str) -> Result<Shop, HotpepperError> {
        let key = self.api_key()?;
        let url = self.build_url(key, &params::shop_params(id));

        let envelope = self.request_envelope(&url).await?;
        let results = envelope.results.unwrap_or_default();
        normalize::check_api_error(&results)?;

        let raw_len = results.shop.len();
        let mut shops = normalize::parse_shops(results.shop);
        if shops.is_empty() {
            if raw_len > 0 {
                tracing::warn!(
                    shop_id = id,
                    malformed = raw_len,
                    "shop lookup returned only malformed records"
                );
            }
            return Err(HotpepperError::NotFound { id: id.to_string() });
        }
        if raw_len > 1 {
            tracing::warn!(
                shop_id = id,
                discarded = raw_len - 1,
                "shop lookup matched several records; using the first"
            );
        }
        Ok(shops.swap_remove(0))
    }

    fn api_key(&self) -> Result<&str, HotpepperError> {
        self.api_key.as_deref().ok_or(HotpepperError::MissingApiKey)
    }

    /// Base URL plus `key`, `format=json` and `extra`, percent-encoded.
    fn build_url(&self, key: &str, extra: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", key);
            pairs.append_pair("format", "json");
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    async fn request_envelope(&self, url: &Url) -> Result<ApiEnvelope, HotpepperError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "upstream returned non-success status");
            return Err(HotpepperError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HotpepperError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}
