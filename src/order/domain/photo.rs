//! Photo references attached to an order.

use super::OrderDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of photos an order may carry.
pub const MAX_PHOTOS: usize = 3;

/// Opaque pointer to a stored upload. Never the image bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Creates a photo reference.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::EmptyPhotoRef`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, OrderDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(OrderDomainError::EmptyPhotoRef);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of at most [`MAX_PHOTOS`] photo references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRefs(Vec<PhotoRef>);

impl PhotoRefs {
    /// Builds the list from raw references, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::TooManyPhotos`] when more than
    /// [`MAX_PHOTOS`] references are supplied, or
    /// [`OrderDomainError::EmptyPhotoRef`] for a blank reference.
    pub fn new<I, S>(refs: I) -> Result<Self, OrderDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parsed = refs
            .into_iter()
            .map(PhotoRef::new)
            .collect::<Result<Vec<_>, _>>()?;
        if parsed.len() > MAX_PHOTOS {
            return Err(OrderDomainError::TooManyPhotos {
                max: MAX_PHOTOS,
                actual: parsed.len(),
            });
        }
        Ok(Self(parsed))
    }

    /// Returns the references in upload order.
    #[must_use]
    pub fn as_slice(&self) -> &[PhotoRef] {
        &self.0
    }

    /// Returns the number of attached photos.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no photos are attached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
