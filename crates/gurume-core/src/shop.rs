//! Venue records as returned by the gourmet API, and the normalized search
//! result served to clients.

use serde::{Deserialize, Serialize};

use crate::codes::{budget_label, genre_label};

/// A count the upstream may send either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    Number(i64),
    Text(String),
}

impl CountValue {
    /// Integer value, or `None` for text that does not parse.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CountValue::Number(n) => Some(*n),
            CountValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSizes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc: Option<PhotoSizes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<PhotoSizes>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One venue. Read-only; fields the application does not use are carried in
/// `extra` so the record serializes back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<CodeName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<CodeName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<CountValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_drink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_smoking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<ShopUrls>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Shop {
    /// Upstream genre name, or the label for its code when the name is absent.
    #[must_use]
    pub fn genre_name(&self) -> Option<&str> {
        self.genre
            .as_ref()
            .and_then(|g| g.name.as_deref().or_else(|| g.code.as_deref().and_then(genre_label)))
    }

    #[must_use]
    pub fn budget_name(&self) -> Option<&str> {
        self.budget
            .as_ref()
            .and_then(|b| b.name.as_deref().or_else(|| b.code.as_deref().and_then(budget_label)))
    }

    /// Large PC photo, the one the detail view shows as its hero image.
    #[must_use]
    pub fn hero_photo(&self) -> Option<&str> {
        self.photo
            .as_ref()
            .and_then(|p| p.pc.as_ref())
            .and_then(|pc| pc.l.as_deref())
    }
}

/// Normalized response of `/api/search`.
///
/// `total_returned` comes from the upstream's own count and is not forced to
/// equal `shops.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub shops: Vec<Shop>,
    pub total_available: i64,
    pub total_returned: i64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shop_json() -> serde_json::Value {
        serde_json::json!({
            "id": "J001234567",
            "name": "居酒屋 なは",
            "address": "沖縄県那覇市おもろまち1-1",
            "genre": { "code": "G001", "name": "居酒屋", "catch": "泡盛多数" },
            "budget": { "code": "B008", "name": "2001～3000円", "average": "2500円" },
            "capacity": "40",
            "open": "月～日: 17:00～翌0:00",
            "private_room": "あり",
            "photo": {
                "pc": { "l": "https://img.example/l.jpg", "m": "https://img.example/m.jpg" },
                "mobile": { "l": "https://img.example/ml.jpg", "xl": "https://img.example/mxl.jpg" },
                "thumbnail": { "s": "https://img.example/t.jpg" }
            },
            "urls": { "pc": "https://www.hotpepper.jp/strJ001234567/", "sp": "https://m.example/J001" },
            "lat": 26.2215,
            "station_name": "おもろまち"
        })
    }

    #[test]
    fn count_value_accepts_numbers_and_numeric_strings() {
        let n: CountValue = serde_json::from_str("7").unwrap();
        let s: CountValue = serde_json::from_str("\"7\"").unwrap();
        let bad: CountValue = serde_json::from_str("\"seven\"").unwrap();
        assert_eq!(n.as_i64(), Some(7));
        assert_eq!(s.as_i64(), Some(7));
        assert_eq!(bad.as_i64(), None);
    }

    #[test]
    fn shop_keeps_unmodelled_fields() {
        let raw = sample_shop_json();
        let shop: Shop = serde_json::from_value(raw.clone()).expect("shop");
        assert_eq!(shop.genre_name(), Some("居酒屋"));
        assert_eq!(shop.budget_name(), Some("2001～3000円"));
        assert_eq!(shop.capacity.as_ref().and_then(CountValue::as_i64), Some(40));
        assert_eq!(shop.hero_photo(), Some("https://img.example/l.jpg"));
        assert_eq!(shop.extra["station_name"], "おもろまち");
        let photo = shop.photo.as_ref().expect("photo");
        assert_eq!(
            photo.mobile.as_ref().map(|m| &m.extra["xl"]),
            Some(&serde_json::json!("https://img.example/mxl.jpg"))
        );
        assert!(photo.extra.contains_key("thumbnail"));
        assert!(shop.urls.as_ref().is_some_and(|u| u.extra.contains_key("sp")));

        let back = serde_json::to_value(&shop).expect("serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn names_fall_back_to_code_labels() {
        let shop: Shop = serde_json::from_value(serde_json::json!({
            "id": "J002",
            "name": "コードのみ",
            "genre": { "code": "G013" },
            "budget": { "code": "B003" }
        }))
        .expect("shop");
        assert_eq!(shop.genre_name(), Some("ラーメン"));
        assert_eq!(shop.budget_name(), Some("1,001~1,500円"));

        let unknown: Shop = serde_json::from_value(serde_json::json!({
            "id": "J003",
            "name": "不明",
            "genre": { "code": "G999" }
        }))
        .expect("shop");
        assert_eq!(unknown.genre_name(), None);
        assert_eq!(unknown.budget_name(), None);
    }
}
