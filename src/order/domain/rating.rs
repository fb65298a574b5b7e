//! Customer ratings for completed orders.

use super::OrderDomainError;
use serde::{Deserialize, Serialize};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Star rating in `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    /// Creates a validated rating.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::RatingOutOfRange`] when `value` is outside
    /// `[1, 5]`.
    pub fn new(value: i64) -> Result<Self, OrderDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (MIN_RATING..=MAX_RATING).contains(stars))
            .map(Self)
            .ok_or(OrderDomainError::RatingOutOfRange(value))
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = OrderDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        Self::from(rating.0)
    }
}

/// Rating plus optional free-text feedback left by the owning customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    rating: Rating,
    feedback: Option<String>,
}

impl Review {
    /// Creates a review. Blank feedback is dropped.
    #[must_use]
    pub fn new(rating: Rating, feedback: Option<String>) -> Self {
        let normalized = feedback.and_then(|text| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        });
        Self {
            rating,
            feedback: normalized,
        }
    }

    /// Returns the rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the feedback text, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}
