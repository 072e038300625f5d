//! Query parameters sent to the gourmet API.
//!
//! The access key and `format=json` are added by the client; the functions
//! here produce everything after them, in a fixed order.

use gurume_core::codes::AmenityFlag;
use gurume_core::SearchCriteria;

/// Whether amenity flags are translated into upstream boolean filters.
///
/// The translation is implemented but ships disabled: criteria still carry
/// the flags, they simply do not reach the upstream query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmenityMapping {
    #[default]
    Disabled,
    Enabled,
}

impl From<bool> for AmenityMapping {
    fn from(enabled: bool) -> Self {
        if enabled {
            AmenityMapping::Enabled
        } else {
            AmenityMapping::Disabled
        }
    }
}

/// Parameters for a shop search.
///
/// Order: `count`, `start` (when positive), `keyword`, `genre`, `budget`,
/// `special_category` (each only when non-empty), then amenity filters when
/// mapping is enabled. `party_size` is never forwarded.
#[must_use]
pub fn search_params(
    criteria: &SearchCriteria,
    mapping: AmenityMapping,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("count", criteria.page_size().to_string())];

    if let Some(start) = criteria.start_offset() {
        params.push(("start", start.to_string()));
    }

    let text_fields = [
        ("keyword", &criteria.area),
        ("genre", &criteria.genre),
        ("budget", &criteria.budget),
        ("special_category", &criteria.special_category),
    ];
    for (key, value) in text_fields {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            params.push((key, v.to_string()));
        }
    }

    if mapping == AmenityMapping::Enabled {
        params.extend(amenity_params(&criteria.amenities));
    }

    params
}

/// Parameters for a single-shop lookup.
#[must_use]
pub fn shop_params(id: &str) -> Vec<(&'static str, String)> {
    vec![("id", id.to_string())]
}

fn amenity_params(flags: &[String]) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = Vec::new();
    for flag in flags.iter().filter_map(|f| AmenityFlag::parse(f)) {
        if let Some(key) = flag.upstream_param() {
            if !params.iter().any(|(k, _)| *k == key) {
                params.push((key, "1".to_string()));
            }
        }
    }
    params
}
