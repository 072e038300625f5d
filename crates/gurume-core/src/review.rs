use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A 1 to 4 ordinal rating from the review form's sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i16")]
pub struct Score(i16);

impl Score {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 4;

    /// # Errors
    ///
    /// Returns [`CoreError::ScoreOutOfRange`] outside `1..=4`.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        i16::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(CoreError::ScoreOutOfRange(value))
    }

    #[must_use]
    pub fn get(self) -> i16 {
        self.0
    }

    fn is_low(self) -> bool {
        self.0 <= 2
    }
}

impl TryFrom<i64> for Score {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i16 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// Display labels the shop detail view shows next to a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewLabels {
    pub atmosphere: Option<&'static str>,
    pub usecase: Option<&'static str>,
}

impl ReviewLabels {
    /// Raw scores come straight from storage and may be missing. Out-of-range
    /// values produce no label.
    #[must_use]
    pub fn from_scores(atmosphere: Option<i16>, usecase: Option<i16>) -> Self {
        let atmosphere = atmosphere
            .and_then(|v| Score::new(i64::from(v)).ok())
            .map(|s| if s.is_low() { "calm" } else { "lively" });
        let usecase = usecase
            .and_then(|v| Score::new(i64::from(v)).ok())
            .map(|s| if s.is_low() { "special occasion" } else { "everyday" });
        Self {
            atmosphere,
            usecase,
        }
    }
}
