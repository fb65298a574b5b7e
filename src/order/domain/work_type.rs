//! Kinds of yard work an order can request.

use super::ParseWorkTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of requested yard work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    /// Lawn mowing.
    Mowing,
    /// Tree and hedge trimming.
    TreeTrimming,
    /// Fence painting.
    FencePainting,
    /// Anything else.
    Other,
}

impl WorkType {
    /// Every work type, in display order.
    pub const ALL: [Self; 4] = [
        Self::Mowing,
        Self::TreeTrimming,
        Self::FencePainting,
        Self::Other,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mowing => "mowing",
            Self::TreeTrimming => "tree_trimming",
            Self::FencePainting => "fence_painting",
            Self::Other => "other",
        }
    }

    /// Interprets a client-supplied work type.
    ///
    /// Never fails: unrecognised values become [`WorkType::Other`] so newer
    /// clients can send categories this build does not know. The legacy
    /// Czech form keys are accepted as aliases.
    #[must_use]
    pub fn from_client(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "mowing" | "sekani_travy" => Self::Mowing,
            "tree_trimming" | "strhani_stromu" => Self::TreeTrimming,
            "fence_painting" | "natrani_plotu" => Self::FencePainting,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WorkType {
    type Error = ParseWorkTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| ParseWorkTypeError(value.to_owned()))
    }
}
