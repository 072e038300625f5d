//! Fixed lookup tables mirrored from the gourmet API's code lists.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeOption {
    pub code: &'static str,
    pub label: &'static str,
}

const fn opt(code: &'static str, label: &'static str) -> CodeOption {
    CodeOption { code, label }
}

/// Genre codes in display order. An empty code means "unspecified".
pub const GENRE_OPTIONS: &[CodeOption] = &[
    opt("", "未指定"),
    opt("G001", "居酒屋"),
    opt("G002", "ダイニングバー・バル"),
    opt("G003", "創作料理"),
    opt("G004", "和食"),
    opt("G005", "洋食"),
    opt("G006", "イタリアン・フレンチ"),
    opt("G007", "中華"),
    opt("G008", "焼肉・ホルモン"),
    opt("G017", "韓国料理"),
    opt("G009", "アジア・エスニック料理"),
    opt("G010", "各国料理"),
    opt("G011", "カラオケ・パーティ"),
    opt("G012", "バー・カクテル"),
    opt("G013", "ラーメン"),
    opt("G016", "お好み焼き・もんじゃ"),
    opt("G014", "カフェ・スイーツ"),
    opt("G015", "その他グルメ"),
];

/// Per-person budget codes in display order.
pub const BUDGET_OPTIONS: &[CodeOption] = &[
    opt("", "未指定"),
    opt("B001", "~500円"),
    opt("B002", "501~1,000円"),
    opt("B003", "1,001~1,500円"),
    opt("B008", "2,001~3,000円"),
    opt("B010", "3,001~4,000円"),
    opt("B011", "4,001~5,000円"),
    opt("B017", "5,001~7,000円"),
    opt("B018", "7,001~10,000円"),
];

/// Amenity flags the search form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityFlag {
    PrivateRoom,
    FreeDrink,
    Smoking,
    Parking,
}

impl AmenityFlag {
    pub const ALL: [AmenityFlag; 4] = [
        AmenityFlag::PrivateRoom,
        AmenityFlag::FreeDrink,
        AmenityFlag::Smoking,
        AmenityFlag::Parking,
    ];

    /// Label sent on the wire as a `kodawari` value.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AmenityFlag::PrivateRoom => "個室",
            AmenityFlag::FreeDrink => "飲み放題",
            AmenityFlag::Smoking => "喫煙可",
            AmenityFlag::Parking => "駐車場",
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            AmenityFlag::PrivateRoom => "private_room",
            AmenityFlag::FreeDrink => "free_drink",
            AmenityFlag::Smoking => "smoking",
            AmenityFlag::Parking => "parking",
        }
    }

    /// Upstream boolean parameter for this flag. Smoking has none: the API only
    /// filters for non-smoking venues.
    #[must_use]
    pub fn upstream_param(self) -> Option<&'static str> {
        match self {
            AmenityFlag::PrivateRoom => Some("private_room"),
            AmenityFlag::FreeDrink => Some("free_drink"),
            AmenityFlag::Parking => Some("parking"),
            AmenityFlag::Smoking => None,
        }
    }

    /// Accepts the wire label or the snake_case identifier.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.label() == value || flag.id() == value)
    }
}

#[must_use]
pub fn genre_label(code: &str) -> Option<&'static str> {
    GENRE_OPTIONS
        .iter()
        .find(|o| o.code == code)
        .map(|o| o.label)
}

#[must_use]
pub fn budget_label(code: &str) -> Option<&'static str> {
    BUDGET_OPTIONS
        .iter()
        .find(|o| o.code == code)
        .map(|o| o.label)
}
