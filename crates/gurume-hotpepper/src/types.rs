//! Gourmet API response envelope.
//!
//! Every response is wrapped in `{"results": {...}}`. Counts arrive as numbers
//! or numeric strings depending on the field and API version, and errors can
//! come back with HTTP 200 inside `results.error`.

use gurume_core::CountValue;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub results: Option<ResultsBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultsBody {
    /// Shops are kept as raw JSON here and typed one by one in
    /// [`crate::normalize::parse_shops`].
    #[serde(default)]
    pub shop: Vec<serde_json::Value>,
    #[serde(default)]
    pub results_available: Option<CountValue>,
    #[serde(default)]
    pub results_returned: Option<CountValue>,
    #[serde(default)]
    pub error: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: Option<CountValue>,
    #[serde(default)]
    pub message: Option<String>,
}
