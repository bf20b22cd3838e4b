//! Service layer for the task lifecycle and the points ledger.
//!
//! Every operation that moves points loads the touched accounts, applies
//! the domain mutation, and hands task and accounts to the repository as
//! one [`LedgerCommit`].

use crate::account::{
    domain::{AccountDomainError, UserAccount, UserId},
    ports::{AccountRepository, AccountRepositoryError},
};
use crate::geo::Coordinates;
use crate::task::{
    domain::{CityName, CompletionReport, PointValue, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{LedgerCommit, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for posting a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    city: String,
    location: Option<Coordinates>,
    created_by: UserId,
    bounty: u32,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        city: impl Into<String>,
        created_by: UserId,
        bounty: u32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            city: city.into(),
            location: None,
            created_by,
            bounty,
        }
    }

    /// Sets the task location.
    #[must_use]
    pub const fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }
}

/// Request payload for submitting a completion report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReportRequest {
    description: String,
    evidence_url: Option<String>,
}

impl SubmitReportRequest {
    /// Creates a request with the required report description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            evidence_url: None,
        }
    }

    /// Attaches an evidence reference (typically a photo URL).
    #[must_use]
    pub fn with_evidence_url(mut self, url: impl Into<String>) -> Self {
        self.evidence_url = Some(url.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Task domain validation or state-machine rejection.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Account domain rejection, notably an underfunded bounty.
    #[error(transparent)]
    AccountDomain(#[from] AccountDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Account lookup or persistence failed.
    #[error(transparent)]
    Account(#[from] AccountRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle and points-ledger orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: AccountRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    accounts: Arc<A>,
    clock: Arc<C>,
}

impl<R, A, C> TaskLifecycleService<R, A, C>
where
    R: TaskRepository,
    A: AccountRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, accounts: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            accounts,
            clock,
        }
    }

    /// Posts a new task, funding its bounty from the creator's balance.
    ///
    /// The task starts in `Pending`, unassigned, awaiting moderation.
    /// The creation deduction and the task insert land as one commit.
    ///
    /// # Errors
    ///
    /// Returns a domain error when a required field is missing or the
    /// bounty is below one point, `InsufficientPoints` when the creator
    /// cannot fund the bounty, or a repository error when the creator is
    /// unknown or persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            city,
            location,
            created_by,
            bounty,
        } = request;

        let city_name = CityName::new(city)?;
        let bounty_value = PointValue::new(bounty)?;

        let mut creator = self.find_account_or_error(created_by).await?;
        creator.fund(bounty_value.get(), &*self.clock)?;

        let task = Task::new(
            title,
            description,
            city_name,
            location,
            created_by,
            bounty_value,
            &*self.clock,
        )?;
        let accounts = [creator];
        let stored = self
            .tasks
            .commit(LedgerCommit::insert(&task).with_accounts(&accounts))
            .await?;
        tracing::info!(task = %stored.id(), bounty = %stored.bounty(), "task posted");
        Ok(stored)
    }

    /// Publishes a pending task after moderation approval.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, or a domain error when
    /// the task is not `Pending`.
    pub async fn approve_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let expected = task.version();
        task.approve(&*self.clock)?;
        Ok(self
            .tasks
            .commit(LedgerCommit::update(&task, expected))
            .await?)
    }

    /// Refuses a pending task during moderation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, or a domain error when
    /// the task is not `Pending`.
    pub async fn reject_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let expected = task.version();
        task.reject(&*self.clock)?;
        Ok(self
            .tasks
            .commit(LedgerCommit::update(&task, expected))
            .await?)
    }

    /// Claims an open task for a volunteer.
    ///
    /// The write is version-checked: when two volunteers race for the
    /// same task exactly one claim lands, and the loser observes
    /// [`TaskDomainError::AlreadyClaimed`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, `AlreadyClaimed` when
    /// another volunteer holds the claim, or a domain error when the task
    /// is not `Open`.
    pub async fn claim(&self, task_id: TaskId, volunteer: UserId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let expected = task.version();
        task.claim(volunteer, &*self.clock)?;

        match self
            .tasks
            .commit(LedgerCommit::update(&task, expected))
            .await
        {
            Ok(stored) => {
                tracing::info!(task = %task_id, volunteer = %volunteer, "task claimed");
                Ok(stored)
            }
            Err(err @ TaskRepositoryError::VersionConflict { .. }) => {
                let current = self.find_task_or_error(task_id).await?;
                if let Some(winner) = current.assigned_to()
                    && winner != volunteer
                {
                    tracing::debug!(task = %task_id, winner = %winner, "claim lost the race");
                    return Err(TaskDomainError::AlreadyClaimed {
                        task_id,
                        assigned_to: winner,
                    }
                    .into());
                }
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Submits a completion report, moving the task into review.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, `NotAssignee` when the
    /// actor does not hold the claim, or a domain error when the report
    /// is invalid or the task is not `InProgress`.
    pub async fn submit_report(
        &self,
        task_id: TaskId,
        actor: UserId,
        request: SubmitReportRequest,
    ) -> TaskLifecycleResult<Task> {
        let SubmitReportRequest {
            description,
            evidence_url,
        } = request;
        let mut report = CompletionReport::new(description)?;
        if let Some(url) = evidence_url {
            report = report.with_evidence_url(url);
        }

        let mut task = self.find_task_or_error(task_id).await?;
        let expected = task.version();
        task.submit_report(actor, report, &*self.clock)?;
        Ok(self
            .tasks
            .commit(LedgerCommit::update(&task, expected))
            .await?)
    }

    /// Approves the completion report, finishing the task and crediting
    /// the full bounty to the assignee in the same commit.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, a domain error when
    /// the task is not `Review`, or an account error when the assignee
    /// is unknown.
    pub async fn approve_report(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let expected = task.version();
        let assignee = task.complete(&*self.clock)?;

        let mut volunteer = self.find_account_or_error(assignee).await?;
        volunteer.credit(task.bounty().get(), &*self.clock);

        let accounts = [volunteer];
        let stored = self
            .tasks
            .commit(LedgerCommit::update(&task, expected).with_accounts(&accounts))
            .await?;
        tracing::info!(
            task = %task_id,
            volunteer = %assignee,
            reward = %stored.bounty(),
            "task completed, bounty paid out"
        );
        Ok(stored)
    }

    /// Returns a reviewed task to its assignee for rework.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, or a domain error when
    /// the task is not `Review`.
    pub async fn return_report(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let expected = task.version();
        task.return_for_rework(&*self.clock)?;
        Ok(self
            .tasks
            .commit(LedgerCommit::update(&task, expected))
            .await?)
    }

    /// Abandons a claimed task.
    ///
    /// The volunteer is debited half the bounty (rounded down, clamping
    /// at zero) and the creator is credited the full computed penalty;
    /// the task returns to the open pool unassigned. Task and both
    /// balances land as one commit.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, `NotAssignee` when the
    /// volunteer does not hold the claim, or a domain error when the task
    /// is not `InProgress`.
    pub async fn abandon(&self, task_id: TaskId, volunteer: UserId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        if task.assigned_to() != Some(volunteer) {
            return Err(TaskDomainError::NotAssignee {
                task_id,
                actor: volunteer,
            }
            .into());
        }
        let expected = task.version();
        task.release(&*self.clock)?;

        let penalty = task.bounty().abandonment_penalty();
        let accounts = self.penalised_accounts(&task, volunteer, penalty).await?;
        let stored = self
            .tasks
            .commit(LedgerCommit::update(&task, expected).with_accounts(&accounts))
            .await?;
        tracing::info!(task = %task_id, volunteer = %volunteer, penalty, "task abandoned");
        Ok(stored)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent.
    pub async fn task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_task_or_error(task_id).await
    }

    /// Returns every task, ascending by creation time.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_all().await?)
    }

    /// Returns every task in the given status, ascending by creation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn tasks_by_status(&self, status: TaskStatus) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_by_status(status).await?)
    }

    /// Loads the accounts touched by an abandonment penalty.
    ///
    /// When the volunteer abandoned their own task the debit and the
    /// credit apply to the single account in order.
    async fn penalised_accounts(
        &self,
        task: &Task,
        volunteer: UserId,
        penalty: u32,
    ) -> TaskLifecycleResult<Vec<UserAccount>> {
        if volunteer == task.created_by() {
            let mut account = self.find_account_or_error(volunteer).await?;
            account.debit_clamped(penalty, &*self.clock);
            account.credit(penalty, &*self.clock);
            return Ok(vec![account]);
        }

        let mut debited = self.find_account_or_error(volunteer).await?;
        debited.debit_clamped(penalty, &*self.clock);
        let mut credited = self.find_account_or_error(task.created_by()).await?;
        credited.credit(penalty, &*self.clock);
        Ok(vec![debited, credited])
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(task_id).into())
    }

    async fn find_account_or_error(&self, user_id: UserId) -> TaskLifecycleResult<UserAccount> {
        self.accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AccountRepositoryError::NotFound(user_id).into())
    }
}
