//! Normalization of the gourmet API's loosely-typed result envelope.

use gurume_core::{CountValue, SearchResult, Shop};

use crate::error::HotpepperError;
use crate::types::{ApiEnvelope, ResultsBody};

/// Returned-count for a page.
///
/// The upstream sends `results_returned` as a string (`"10"`) on some
/// responses and a number on others. When the field is absent, or is text
/// that does not parse, the length of the shop array stands in.
#[must_use]
pub fn returned_count(raw: Option<&CountValue>, shop_len: usize) -> i64 {
    raw.and_then(CountValue::as_i64)
        .unwrap_or_else(|| i64::try_from(shop_len).unwrap_or(i64::MAX))
}

/// Total matches across all pages. Absent means zero.
#[must_use]
pub fn available_count(raw: Option<&CountValue>) -> i64 {
    raw.and_then(CountValue::as_i64).unwrap_or(0)
}

/// Types each shop record, preserving upstream order. Records that do not
/// carry the fields a [`Shop`] requires are logged and dropped.
#[must_use]
pub fn parse_shops(raw: Vec<serde_json::Value>) -> Vec<Shop> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Shop>(value) {
            Ok(shop) => Some(shop),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed shop record");
                None
            }
        })
        .collect()
}

/// Surfaces an error reported inside a 2xx envelope.
///
/// # Errors
///
/// Returns [`HotpepperError::Api`] carrying the first reported error.
pub fn check_api_error(results: &ResultsBody) -> Result<(), HotpepperError> {
    match results.error.first() {
        None => Ok(()),
        Some(entry) => Err(HotpepperError::Api {
            code: entry.code.as_ref().and_then(CountValue::as_i64).unwrap_or(0),
            message: entry
                .message
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        }),
    }
}

/// Builds the client-facing search result from a decoded envelope.
///
/// # Errors
///
/// Returns [`HotpepperError::Api`] if the envelope reports an error.
pub fn into_search_result(envelope: ApiEnvelope, url: String) -> Result<SearchResult, HotpepperError> {
    let results = envelope.results.unwrap_or_default();
    check_api_error(&results)?;

    let total_available = available_count(results.results_available.as_ref());
    let raw_len = results.shop.len();
    let total_returned = returned_count(results.results_returned.as_ref(), raw_len);
    let shops = parse_shops(results.shop);

    Ok(SearchResult {
        shops,
        total_available,
        total_returned,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(value: serde_json::Value) -> ApiEnvelope {
        serde_json::from_value(value).expect("envelope")
    }

    fn shop(id: &str) -> serde_json::Value {
        serde_json::json!({ "id": id, "name": format!("Shop {id}") })
    }

    #[test]
    fn string_returned_count_is_parsed() {
        let text = CountValue::Text("7".to_string());
        assert_eq!(returned_count(Some(&text), 3), 7);
    }

    #[test]
    fn numeric_returned_count_is_used_as_is() {
        assert_eq!(returned_count(Some(&CountValue::Number(4)), 10), 4);
    }

    #[test]
    fn missing_returned_count_falls_back_to_array_length() {
        assert_eq!(returned_count(None, 3), 3);
        let junk = CountValue::Text("n/a".to_string());
        assert_eq!(returned_count(Some(&junk), 2), 2);
    }

    #[test]
    fn missing_available_count_is_zero() {
        assert_eq!(available_count(None), 0);
        assert_eq!(available_count(Some(&CountValue::Text("120".to_string()))), 120);
    }

    #[test]
    fn search_result_tolerates_count_mismatch() {
        let env = envelope(serde_json::json!({
            "results": {
                "results_available": 50,
                "results_returned": "10",
                "shop": [shop("J1"), shop("J2")]
            }
        }));
        let result = into_search_result(env, "u".to_string()).expect("result");
        assert_eq!(result.total_available, 50);
        assert_eq!(result.total_returned, 10);
        assert_eq!(result.shops.len(), 2);
        assert_eq!(result.shops[0].id, "J1");
        assert_eq!(result.url, "u");
    }

    #[test]
    fn empty_envelope_yields_empty_result() {
        let result = into_search_result(envelope(serde_json::json!({})), String::new())
            .expect("result");
        assert!(result.shops.is_empty());
        assert_eq!(result.total_available, 0);
        assert_eq!(result.total_returned, 0);
    }

    #[test]
    fn malformed_shops_are_skipped_in_order() {
        let shops = parse_shops(vec![shop("J1"), serde_json::json!({"name": "no id"}), shop("J3")]);
        let ids: Vec<_> = shops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["J1", "J3"]);
    }

    #[test]
    fn envelope_errors_are_surfaced() {
        let env = envelope(serde_json::json!({
            "results": {
                "error": [{ "code": 2000, "message": "APIキーまたはIPアドレスの認証エラーです" }]
            }
        }));
        let err = into_search_result(env, String::new()).unwrap_err();
        assert!(matches!(err, HotpepperError::Api { code: 2000, .. }));
    }
}
