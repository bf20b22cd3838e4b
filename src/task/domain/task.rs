//! Task aggregate root and the lifecycle state machine.

use super::{
    CityName, CompletionReport, ParseTaskStatusError, PointValue, RecordVersion, TaskDomainError,
    TaskId,
};
use crate::account::domain::UserId;
use crate::geo::{Coordinates, distance_km};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Posted and awaiting moderation.
    Pending,
    /// Published and claimable.
    Open,
    /// Claimed by a volunteer.
    InProgress,
    /// Completion report submitted and awaiting review.
    Review,
    /// Approved and paid out.
    Done,
    /// Refused during moderation.
    Rejected,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Open | Self::Rejected)
                | (Self::Open, Self::InProgress)
                | (Self::InProgress, Self::Review | Self::Open)
                | (Self::Review, Self::Done | Self::InProgress)
        )
    }

    /// Returns whether the status admits no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Rejected)
    }

    /// Returns whether a task in this status may carry an assignee.
    #[must_use]
    pub const fn allows_assignee(self) -> bool {
        matches!(self, Self::InProgress | Self::Review | Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// # Invariants
///
/// - `assigned_to` is `None` unless the status allows an assignee
///   (`InProgress`, `Review`, `Done`)
/// - `bounty` is fixed at creation and never renegotiated
/// - status changes go through the transition table only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    city: CityName,
    location: Option<Coordinates>,
    status: TaskStatus,
    created_by: UserId,
    assigned_to: Option<UserId>,
    bounty: PointValue,
    report: Option<CompletionReport>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: RecordVersion,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted city.
    pub city: CityName,
    /// Persisted location, if any.
    pub location: Option<Coordinates>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creator identifier.
    pub created_by: UserId,
    /// Persisted assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted bounty.
    pub bounty: PointValue,
    /// Persisted completion report, if any.
    pub report: Option<CompletionReport>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted record version.
    pub version: RecordVersion,
}

impl Task {
    /// Creates a new task awaiting moderation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyDescription`] when a required field is
    /// empty after trimming.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        city: CityName,
        location: Option<Coordinates>,
        created_by: UserId,
        bounty: PointValue,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title_text = title.into();
        if title_text.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let description_text = description.into();
        if description_text.trim().is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: title_text,
            description: description_text,
            city,
            location,
            status: TaskStatus::Pending,
            created_by,
            assigned_to: None,
            bounty,
            report: None,
            created_at: timestamp,
            updated_at: timestamp,
            version: RecordVersion::initial(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            city: data.city,
            location: data.location,
            status: data.status,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            bounty: data.bounty,
            report: data.report,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns a copy stamped with the given record version.
    ///
    /// For persistence-adapter use when a commit lands at a new version.
    #[must_use]
    pub fn with_version(mut self, version: RecordVersion) -> Self {
        self.version = version;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the city the task is located in.
    #[must_use]
    pub const fn city(&self) -> &CityName {
        &self.city
    }

    /// Returns the task location, if one was provided.
    #[must_use]
    pub const fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creator identifier.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the claiming volunteer, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the bounty.
    #[must_use]
    pub const fn bounty(&self) -> PointValue {
        self.bounty
    }

    /// Returns the completion report, if one has been submitted.
    #[must_use]
    pub const fn report(&self) -> Option<&CompletionReport> {
        self.report.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the record version this aggregate was read at.
    #[must_use]
    pub const fn version(&self) -> RecordVersion {
        self.version
    }

    /// Distance in kilometres from `origin` to the task location, when
    /// the task has one.
    #[must_use]
    pub fn distance_km_from(&self, origin: Coordinates) -> Option<f64> {
        self.location.map(|location| distance_km(origin, location))
    }

    /// Publishes a pending task after moderation approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the
    /// task is `Pending`.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Open)?;
        self.status = TaskStatus::Open;
        self.touch(clock);
        Ok(())
    }

    /// Refuses a pending task during moderation. Terminal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the
    /// task is `Pending`.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Rejected)?;
        self.status = TaskStatus::Rejected;
        self.touch(clock);
        Ok(())
    }

    /// Assigns the task to a claiming volunteer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyClaimed`] when another volunteer
    /// holds the claim, or [`TaskDomainError::InvalidStatusTransition`]
    /// unless the task is `Open`.
    pub fn claim(&mut self, volunteer: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if let Some(assigned) = self.assigned_to
            && assigned != volunteer
        {
            return Err(TaskDomainError::AlreadyClaimed {
                task_id: self.id,
                assigned_to: assigned,
            });
        }
        self.ensure_transition(TaskStatus::InProgress)?;
        self.assigned_to = Some(volunteer);
        self.status = TaskStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Attaches a completion report and moves the task into review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when `actor` does not
    /// hold the claim, or [`TaskDomainError::InvalidStatusTransition`]
    /// unless the task is `InProgress`.
    pub fn submit_report(
        &mut self,
        actor: UserId,
        report: CompletionReport,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.assigned_to != Some(actor) {
            return Err(TaskDomainError::NotAssignee {
                task_id: self.id,
                actor,
            });
        }
        self.ensure_transition(TaskStatus::Review)?;
        self.report = Some(report);
        self.status = TaskStatus::Review;
        self.touch(clock);
        Ok(())
    }

    /// Returns a reviewed task to the assignee for rework. The claim and
    /// the submitted report are retained.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the
    /// task is `Review`.
    pub fn return_for_rework(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::InProgress)?;
        self.status = TaskStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Approves the completion report and finishes the task. Terminal.
    ///
    /// Returns the volunteer to reward.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the
    /// task is `Review`, or [`TaskDomainError::MissingAssignee`] when no
    /// assignee is on record.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<UserId, TaskDomainError> {
        self.ensure_transition(TaskStatus::Done)?;
        let assignee = self
            .assigned_to
            .ok_or(TaskDomainError::MissingAssignee(self.id))?;
        self.status = TaskStatus::Done;
        self.touch(clock);
        Ok(assignee)
    }

    /// Releases an abandoned task back to the open pool, clearing the
    /// claim.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the
    /// task is `InProgress`.
    pub fn release(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Open)?;
        self.assigned_to = None;
        self.status = TaskStatus::Open;
        self.touch(clock);
        Ok(())
    }

    /// Rejects the change unless the transition table allows it.
    const fn ensure_transition(&self, to: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to,
            })
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
