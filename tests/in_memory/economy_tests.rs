//! Points economy integration tests.

use super::helpers::{balance_of, platform, post_task, register};
use asar::account::domain::AccountDomainError;
use asar::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, SubmitReportRequest, TaskLifecycleError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_credits_exactly_the_bounty() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let volunteer = register(&platform, "daniyar").await;

    let task = post_task(&platform, &creator, 50).await;
    assert_eq!(balance_of(&platform, &creator).await, 150);

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
        .submit_report(task.id(), volunteer.id, SubmitReportRequest::new("Done."))
        .await
        .expect("report submission should succeed");
    platform
        .tasks
        .approve_report(task.id())
        .await
        .expect("report approval should succeed");

    assert_eq!(balance_of(&platform, &volunteer).await, 250);
    assert_eq!(balance_of(&platform, &creator).await, 150);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn abandonment_clamps_the_volunteer_and_credits_the_creator_in_full() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let volunteer = register(&platform, "daniyar").await;

    // Burn the volunteer's grant down to 10 points by funding a large
    // task of their own.
    let drain = platform
        .tasks
        .create_task(CreateTaskRequest::new(
            "Drain task",
            "Spends most of the volunteer's balance.",
            "Astana",
            volunteer.id,
            190,
        ))
        .await
        .expect("drain task creation should succeed");
    assert_eq!(drain.bounty().get(), 190);
    assert_eq!(balance_of(&platform, &volunteer).await, 10);

    let task = post_task(&platform, &creator, 50).await;
    assert_eq!(balance_of(&platform, &creator).await, 150);

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
    let released = platform
        .tasks
        .abandon(task.id(), volunteer.id)
        .await
        .expect("abandonment should succeed");

    // Penalty 25: the volunteer held 10, clamping at zero, while the
    // creator gains the full 25. Total points are not conserved; this is
    // the documented behaviour.
    assert_eq!(balance_of(&platform, &volunteer).await, 0);
    assert_eq!(balance_of(&platform, &creator).await, 175);
    assert_eq!(released.status(), TaskStatus::Open);
    assert_eq!(released.assigned_to(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bounties_above_the_balance_cannot_be_posted() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;

    let result = platform
        .tasks
        .create_task(CreateTaskRequest::new(
            "Overfunded request",
            "Asks for more points than the creator holds.",
            "Almaty",
            creator.id,
            500,
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::AccountDomain(
            AccountDomainError::InsufficientPoints {
                required: 500,
                available: 200,
            }
        ))
    ));
    assert_eq!(balance_of(&platform, &creator).await, 200);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn odd_bounty_penalty_rounds_down() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let volunteer = register(&platform, "daniyar").await;

    let task = post_task(&platform, &creator, 25).await;
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
        .abandon(task.id(), volunteer.id)
        .await
        .expect("abandonment should succeed");

    // floor(25 / 2) = 12.
    assert_eq!(balance_of(&platform, &volunteer).await, 188);
    assert_eq!(balance_of(&platform, &creator).await, 187);
}
