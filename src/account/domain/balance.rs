//! The non-negative points balance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A per-account points balance.
///
/// The balance is a plain non-negative integer; debits clamp at zero so
/// it can never go negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PointsBalance(u32);

impl PointsBalance {
    /// The empty balance.
    pub const ZERO: Self = Self(0);

    /// Creates a balance holding the given number of points.
    #[must_use]
    pub const fn new(points: u32) -> Self {
        Self(points)
    }

    /// Returns the number of points held.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.0
    }

    /// Returns whether the balance can fund the given amount.
    #[must_use]
    pub const fn can_afford(self, amount: u32) -> bool {
        self.0 >= amount
    }

    /// Returns the balance after a credit.
    #[must_use]
    pub const fn credited(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }

    /// Returns the balance after a debit, clamped at zero.
    #[must_use]
    pub const fn debited_clamped(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

impl fmt::Display for PointsBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
