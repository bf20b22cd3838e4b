//! First-run seeding tests over the shared store.

use super::helpers::{memory_platform, seed_and_login_admin};
use asar::account::domain::Role;
use asar::bootstrap::{self, DEMO_PASSWORD};
use asar::config::PlatformConfig;
use asar::task::domain::TaskStatus;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_admin_can_log_in_and_moderate() {
    let platform = memory_platform();
    let admin = seed_and_login_admin(&platform).await;
    assert_eq!(admin.role, Role::Admin);

    let pending = platform
        .tasks
        .tasks_by_status(TaskStatus::Pending)
        .await
        .expect("listing should succeed");
    let awaiting = pending.first().expect("a pending demo task should exist");

    let published = platform
        .tasks
        .approve_task(awaiting.id())
        .await
        .expect("moderation should succeed");
    assert_eq!(published.status(), TaskStatus::Open);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_demo_user_can_claim_a_demo_task() {
    let platform = memory_platform();
    seed_and_login_admin(&platform).await;

    let daniyar = platform
        .accounts
        .login("daniyar", DEMO_PASSWORD)
        .await
        .expect("demo login should succeed");
    assert_eq!(daniyar.balance.points(), 200);

    let open = platform
        .tasks
        .tasks_by_status(TaskStatus::Open)
        .await
        .expect("listing should succeed");
    let target = open.first().expect("an open demo task should exist");

    let claimed = platform
        .tasks
        .claim(target.id(), daniyar.id)
        .await
        .expect("claim should succeed");
    assert_eq!(claimed.assigned_to(), Some(daniyar.id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reseeding_does_not_duplicate_accounts_or_tasks() {
    let platform = memory_platform();
    seed_and_login_admin(&platform).await;

    let before_accounts = platform
        .accounts
        .profiles()
        .await
        .expect("listing should succeed")
        .len();
    let before_tasks = platform
        .tasks
        .tasks()
        .await
        .expect("listing should succeed")
        .len();

    let report = bootstrap::seed(
        &platform.collections,
        &PlatformConfig::default(),
        &DefaultClock,
    )
    .expect("reseeding should succeed");
    assert!(!report.first_run);
    assert_eq!(report.accounts_inserted, 0);
    assert_eq!(report.tasks_seeded, 0);

    let after_accounts = platform
        .accounts
        .profiles()
        .await
        .expect("listing should succeed")
        .len();
    let after_tasks = platform
        .tasks
        .tasks()
        .await
        .expect("listing should succeed")
        .len();
    assert_eq!(after_accounts, before_accounts);
    assert_eq!(after_tasks, before_tasks);
}
