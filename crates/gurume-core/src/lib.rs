pub mod app_config;
pub mod codes;
pub mod config;
pub mod criteria;
pub mod review;
pub mod scene;
pub mod search_form;
pub mod shop;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{SearchCriteria, DEFAULT_PAGE_SIZE};
pub use review::{ReviewLabels, Score};
pub use scene::{find_scene, ScenePreset, SCENE_PRESETS};
pub use search_form::{Busy, Control, Pager, SearchForm, SearchSession};
pub use shop::{CountValue, SearchResult, Shop};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("score must be between 1 and 4, got {0}")]
    ScoreOutOfRange(i64),
}
