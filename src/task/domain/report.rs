//! Evidence-of-completion report attached when a task enters review.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Completion report submitted by the claiming volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    description: String,
    evidence_url: Option<String>,
}

impl CompletionReport {
    /// Creates a report with the required description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReportDescription`] when the
    /// description is empty after trimming.
    pub fn new(description: impl Into<String>) -> Result<Self, TaskDomainError> {
        let text = description.into();
        if text.trim().is_empty() {
            return Err(TaskDomainError::EmptyReportDescription);
        }
        Ok(Self {
            description: text,
            evidence_url: None,
        })
    }

    /// Attaches an evidence reference (typically a photo URL).
    #[must_use]
    pub fn with_evidence_url(mut self, url: impl Into<String>) -> Self {
        self.evidence_url = Some(url.into());
        self
    }

    /// Returns the report description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the evidence reference, if any.
    #[must_use]
    pub fn evidence_url(&self) -> Option<&str> {
        self.evidence_url.as_deref()
    }
}
