//! Domain model for the task lifecycle.
//!
//! The task domain models bounty-funded help requests: moderation of
//! freshly posted tasks, volunteer claims with single-winner semantics,
//! completion reports, and abandonment penalties, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod report;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{CityName, PointValue, RecordVersion, TaskId};
pub use report::CompletionReport;
pub use task::{PersistedTaskData, Task, TaskStatus};
