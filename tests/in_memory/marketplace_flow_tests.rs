//! End-to-end marketplace flows over the in-memory stack.

use super::helpers::{balance_of, platform, post_task, register};
use asar::account::services::AccountServiceError;
use asar::task::{
    domain::{TaskDomainError, TaskStatus},
    services::{SubmitReportRequest, TaskLifecycleError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn posted_task_moves_through_moderation_claim_and_review() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let volunteer = register(&platform, "daniyar").await;

    let task = post_task(&platform, &creator, 50).await;
    assert_eq!(task.status(), TaskStatus::Pending);

    platform
        .tasks
        .approve_task(task.id())
        .await
        .expect("moderation approval should succeed");
    let open = platform
        .tasks
        .tasks_by_status(TaskStatus::Open)
        .await
        .expect("listing should succeed");
    assert!(open.iter().any(|candidate| candidate.id() == task.id()));

    platform
        .tasks
        .claim(task.id(), volunteer.id)
        .await
        .expect("claim should succeed");
    platform
        .tasks
        .submit_report(
            task.id(),
            volunteer.id,
            SubmitReportRequest::new("Flat cleaned top to bottom."),
        )
        .await
        .expect("report submission should succeed");

    let done = platform
        .tasks
        .approve_report(task.id())
        .await
        .expect("report approval should succeed");
    assert_eq!(done.status(), TaskStatus::Done);
    assert_eq!(done.assigned_to(), Some(volunteer.id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_round_trip_after_registration() {
    let platform = platform();
    let registered = register(&platform, "aigerim").await;

    let profile = platform
        .accounts
        .login("aigerim", "secret")
        .await
        .expect("login should succeed");
    assert_eq!(profile, registered);

    let rejected = platform.accounts.login("aigerim", "nope").await;
    assert!(matches!(
        rejected,
        Err(AccountServiceError::InvalidCredentials)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_moderation_refunds_nothing_and_is_terminal() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let volunteer = register(&platform, "daniyar").await;

    let task = post_task(&platform, &creator, 60).await;
    platform
        .tasks
        .reject_task(task.id())
        .await
        .expect("moderation rejection should succeed");

    // Rejected tasks have no refund path; the bounty stays escrowed.
    assert_eq!(balance_of(&platform, &creator).await, 140);

    let result = platform.tasks.claim(task.id(), volunteer.id).await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn returned_report_can_be_resubmitted_and_approved() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let volunteer = register(&platform, "daniyar").await;

    let task = post_task(&platform, &creator, 50).await;
    platform
        .tasks
        .approve_task(task.id())
        .await
        .expect("moderation approval should succeed");
    platform
        .tasks
        .claim(task.id(), volunteer.id)
        .await
        .expect("claim should succeed");
    platform
        .tasks
        .submit_report(task.id(), volunteer.id, SubmitReportRequest::new("First try."))
        .await
        .expect("report submission should succeed");
    platform
        .tasks
        .return_report(task.id())
        .await
        .expect("return should succeed");

    platform
        .tasks
        .submit_report(
            task.id(),
            volunteer.id,
            SubmitReportRequest::new("Second try, with photos.")
                .with_evidence_url("https://photos.example/after.jpg"),
        )
        .await
        .expect("resubmission should succeed");
    let done = platform
        .tasks
        .approve_report(task.id())
        .await
        .expect("report approval should succeed");

    assert_eq!(done.status(), TaskStatus::Done);
    assert!(done.report().is_some_and(|report| {
        report.description() == "Second try, with photos."
    }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn two_volunteers_race_for_one_claim() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let first = register(&platform, "daniyar").await;
    let second = register(&platform, "marat").await;

    let task = post_task(&platform, &creator, 50).await;
    platform
        .tasks
        .approve_task(task.id())
        .await
        .expect("moderation approval should succeed");

    let first_claim = platform.tasks.claim(task.id(), first.id).await;
    let second_claim = platform.tasks.claim(task.id(), second.id).await;

    assert!(first_claim.is_ok());
    assert!(matches!(
        second_claim,
        Err(TaskLifecycleError::Domain(TaskDomainError::AlreadyClaimed {
            assigned_to,
            ..
        })) if assigned_to == first.id
    ));

    let stored = platform
        .tasks
        .task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored.assigned_to(), Some(first.id));
}
