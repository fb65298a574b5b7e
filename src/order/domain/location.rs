//! Where the work happens.

use super::OrderDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Street address of the job site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates an address.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::EmptyAddress`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, OrderDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(OrderDomainError::EmptyAddress);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WGS 84 coordinates of the job site, stored as given.
///
/// Either half may be absent. Values are not range-checked because nothing
/// geocodes them; only NaN and infinities are refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Coordinates {
    /// Creates coordinates from independently optional halves.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::NonFiniteCoordinate`] when a supplied half
    /// is NaN or infinite.
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Result<Self, OrderDomainError> {
        for value in [latitude, longitude].into_iter().flatten() {
            if !value.is_finite() {
                return Err(OrderDomainError::NonFiniteCoordinate(value.to_string()));
            }
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees, if supplied.
    #[must_use]
    pub const fn latitude(self) -> Option<f64> {
        self.latitude
    }

    /// Returns the longitude in degrees, if supplied.
    #[must_use]
    pub const fn longitude(self) -> Option<f64> {
        self.longitude
    }
}
