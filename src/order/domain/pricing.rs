//! Price estimation by work type.

use super::WorkType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated price of an order, fixed when the order is created.
///
/// The unit is whatever currency the deployment quotes in; the crate treats
/// it as an opaque whole number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimatedPrice(u32);

impl EstimatedPrice {
    /// Wraps a price amount.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Returns the price amount.
    #[must_use]
    pub const fn amount(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EstimatedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rate card mapping each work type to an estimated price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTable {
    mowing: EstimatedPrice,
    tree_trimming: EstimatedPrice,
    fence_painting: EstimatedPrice,
    other: EstimatedPrice,
}

impl PriceTable {
    /// Returns a copy of the table with `work_type` quoted at `price`.
    #[must_use]
    pub const fn with_rate(mut self, work_type: WorkType, price: EstimatedPrice) -> Self {
        match work_type {
            WorkType::Mowing => self.mowing = price,
            WorkType::TreeTrimming => self.tree_trimming = price,
            WorkType::FencePainting => self.fence_painting = price,
            WorkType::Other => self.other = price,
        }
        self
    }

    /// Returns the estimated price for `work_type`.
    #[must_use]
    pub const fn estimate(&self, work_type: WorkType) -> EstimatedPrice {
        match work_type {
            WorkType::Mowing => self.mowing,
            WorkType::TreeTrimming => self.tree_trimming,
            WorkType::FencePainting => self.fence_painting,
            WorkType::Other => self.other,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            mowing: EstimatedPrice::new(500),
            tree_trimming: EstimatedPrice::new(800),
            fence_painting: EstimatedPrice::new(600),
            other: EstimatedPrice::new(400),
        }
    }
}
