//! Error types for task domain validation and state transitions.

use super::{TaskId, TaskStatus};
use crate::account::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The city name is empty after trimming.
    #[error("city must not be empty")]
    EmptyCity,

    /// The bounty is below the one-point minimum.
    #[error("invalid bounty {0}, expected at least 1 point")]
    InvalidBounty(u32),

    /// The report description is empty after trimming.
    #[error("report description must not be empty")]
    EmptyReportDescription,

    /// The requested status change is not in the transition table.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task the transition was requested on.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
    },

    /// Another volunteer already holds the claim.
    #[error("task {task_id} already claimed by {assigned_to}")]
    AlreadyClaimed {
        /// Task the claim was attempted on.
        task_id: TaskId,
        /// Volunteer currently holding the claim.
        assigned_to: UserId,
    },

    /// The acting user does not hold the claim on the task.
    #[error("user {actor} does not hold the claim on task {task_id}")]
    NotAssignee {
        /// Task the operation was attempted on.
        task_id: TaskId,
        /// User who attempted the operation.
        actor: UserId,
    },

    /// The task reached a payout without an assignee on record.
    #[error("task {0} has no assignee to reward")]
    MissingAssignee(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
