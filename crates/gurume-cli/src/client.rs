//! HTTP client for a running gurume-server.
//!
//! The shop view reaches the server the same way a browser would: through
//! its public routes, at the host named by `GURUME_API_HOST`.

use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Utc};
use gurume_core::{SearchCriteria, SearchResult, Shop};
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LabelsView {
    pub atmosphere: Option<String>,
    pub usecase: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReviewView {
    pub id: i64,
    pub employee_id: String,
    pub comment: Option<String>,
    pub atmosphere: Option<i16>,
    pub usecase: Option<i16>,
    #[serde(default)]
    pub labels: LabelsView,
    pub inserted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewInput<'a> {
    pub employee_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usecase: Option<i64>,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client for `host`. A bare `host:port` is taken as plain HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error when no host is configured or it does not parse.
    pub(crate) fn new(host: Option<&str>) -> anyhow::Result<Self> {
        let host = host
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| anyhow!("GURUME_API_HOST is not set; pass --host or set the variable"))?;

        let with_scheme = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        let base_url =
            Url::parse(&with_scheme).with_context(|| format!("invalid API host '{host}'"))?;
        if base_url.cannot_be_a_base() {
            bail!("invalid API host '{host}'");
        }

        let client = Client::builder()
            .user_agent(concat!("gurume-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub(crate) async fn search(&self, criteria: &SearchCriteria) -> anyhow::Result<SearchResult> {
        let mut url = self.endpoint(&["api", "search"]);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in criteria.to_query_pairs() {
                pairs.append_pair(key, &value);
            }
        }
        tracing::debug!(%url, "search request");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    pub(crate) async fn shop(&self, id: &str) -> anyhow::Result<Shop> {
        let url = self.endpoint(&["api", "shops", id]);
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    pub(crate) async fn reviews(&self, shop_id: &str) -> anyhow::Result<Vec<ReviewView>> {
        let url = self.endpoint(&["api", "shops", shop_id, "reviews"]);
        let response = self.client.get(url).send().await?;
        let envelope: Envelope<Vec<ReviewView>> = decode(response).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn create_review(
        &self,
        shop_id: &str,
        input: &ReviewInput<'_>,
    ) -> anyhow::Result<ReviewView> {
        let url = self.endpoint(&["api", "shops", shop_id, "reviews"]);
        let response = self.client.post(url).json(input).send().await?;
        let envelope: Envelope<ReviewView> = decode(response).await?;
        Ok(envelope.data)
    }

    /// Base URL with `segments` as its path, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }
}

/// Decodes a success body, or turns the server's `{ "error": ... }` body into an error.
async fn decode<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        bail!("{}: {message}", status.as_u16());
    }

    serde_json::from_str(&body).context("unexpected response body")
}
