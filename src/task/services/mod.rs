//! Orchestration services for the task module.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, SubmitReportRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
