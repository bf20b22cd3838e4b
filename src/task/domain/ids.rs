//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic version stamp for optimistic-concurrency writes.
///
/// A task read at version `n` may only be written back while the stored
/// record is still at version `n`; the write lands at `n + 1`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordVersion(u64);

impl RecordVersion {
    /// Version assigned to a freshly inserted record.
    #[must_use]
    pub const fn initial() -> Self {
        Self(1)
    }

    /// Returns the version following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the numeric version value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for RecordVersion {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for RecordVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bounty attached to a task, fixed at creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PointValue(u32);

impl PointValue {
    /// Creates a validated bounty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidBounty`] when the value is zero.
    pub const fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidBounty(value));
        }
        Ok(Self(value))
    }

    /// Returns the number of points.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Penalty charged when a claimed task is abandoned: half the bounty,
    /// rounded down.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "the penalty is defined as half the bounty rounded down"
    )]
    pub const fn abandonment_penalty(self) -> u32 {
        self.0 / 2
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty city name a task is located in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityName(String);

impl CityName {
    /// Creates a validated city name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCity`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyCity);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the city name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
