//! Scene presets: one action that fills several form fields and searches.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenePreset {
    pub id: &'static str,
    pub label: &'static str,
    /// Joined with spaces into the area keyword.
    pub keywords: &'static [&'static str],
    pub party_size: u32,
    pub amenities: &'static [&'static str],
    pub genre: Option<&'static str>,
    pub budget: Option<&'static str>,
    pub special_category: Option<&'static str>,
}

impl ScenePreset {
    #[must_use]
    pub fn area_keyword(&self) -> String {
        self.keywords.join(" ")
    }
}

pub const SCENE_PRESETS: &[ScenePreset] = &[ScenePreset {
    id: "settai",
    label: "接待",
    keywords: &[],
    party_size: 4,
    amenities: &["個室"],
    genre: None,
    budget: None,
    special_category: Some("SPF9"),
}];

#[must_use]
pub fn find_scene(id: &str) -> Option<&'static ScenePreset> {
    SCENE_PRESETS.iter().find(|s| s.id == id)
}
