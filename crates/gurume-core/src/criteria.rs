//! Search criteria shared by the HTTP boundary, the upstream adapter and the
//! client state machine.
//!
//! Wire names follow the query keys the browser form has always sent
//! (`basho`, `janru`, `kane`, `ninzu`, `kodawari`), so the GET and POST forms
//! of `/api/search` decode into the same struct.

use serde::{Deserialize, Serialize};

/// Page size used when a request omits `count` or sends a non-positive one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text area keyword.
    #[serde(rename = "basho", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Upstream genre code, e.g. `G001`.
    #[serde(rename = "janru", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Upstream budget code, e.g. `B001`.
    #[serde(rename = "kane", default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Accepted and echoed, but not forwarded upstream.
    #[serde(rename = "ninzu", default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<String>,
    #[serde(rename = "kodawari", default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// 1-based offset of the first result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_category: Option<String>,
}

impl SearchCriteria {
    /// Decodes criteria from raw query-string pairs.
    ///
    /// Keys that are absent stay `None`. `kodawari` may repeat. `count` and
    /// `start` values that are not integers are dropped rather than rejected.
    #[must_use]
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "basho" => criteria.area = Some(value.clone()),
                "janru" => criteria.genre = Some(value.clone()),
                "kane" => criteria.budget = Some(value.clone()),
                "ninzu" => criteria.party_size = Some(value.clone()),
                "kodawari" => criteria.amenities.push(value.clone()),
                "count" => criteria.count = value.trim().parse().ok(),
                "start" => criteria.start = value.trim().parse().ok(),
                "special_category" => criteria.special_category = Some(value.clone()),
                _ => {}
            }
        }
        criteria
    }

    /// Encodes the criteria as query-string pairs, skipping unset and empty values.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push_text = |key: &'static str, value: Option<&String>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                pairs.push((key, v.clone()));
            }
        };
        push_text("basho", self.area.as_ref());
        push_text("janru", self.genre.as_ref());
        push_text("kane", self.budget.as_ref());
        push_text("ninzu", self.party_size.as_ref());
        push_text("special_category", self.special_category.as_ref());

        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        if let Some(start) = self.start {
            pairs.push(("start", start.to_string()));
        }
        for flag in self.amenities.iter().filter(|f| !f.is_empty()) {
            pairs.push(("kodawari", flag.clone()));
        }
        pairs
    }

    /// Page size actually requested upstream.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        match self.count {
            Some(c) if c > 0 => c,
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Start offset to forward, or `None` when it should be left to the upstream default.
    #[must_use]
    pub fn start_offset(&self) -> Option<i64> {
        self.start.filter(|s| *s > 0)
    }
}
