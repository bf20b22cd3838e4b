//! Persistence tests: state survives re-opened repositories and, for the
//! directory-backed store, process-independent reopening.

use super::helpers::{memory_platform, platform_over, platform_over_collections};
use asar::account::services::RegisterAccountRequest;
use asar::storage::adapters::DirKeyValueStore;
use asar::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, SubmitReportRequest},
};
use camino::Utf8PathBuf;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_client_sees_committed_lifecycle_state() {
    let first_client = memory_platform();
    let creator = first_client
        .accounts
        .register(RegisterAccountRequest::new(
            "aigerim",
            "Aigerim Seitova",
            "aigerim@asar.dev",
            "secret",
        ))
        .await
        .expect("registration should succeed");
    let task = first_client
        .tasks
        .create_task(CreateTaskRequest::new(
            "Help tidying a flat",
            "A neighbour needs a hand with cleaning.",
            "Almaty",
            creator.id,
            50,
        ))
        .await
        .expect("task creation should succeed");

    // A second stack over the same collections simulates another tab.
    let second_client = platform_over_collections(first_client.collections.clone());
    let seen = second_client
        .tasks
        .task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(seen.status(), TaskStatus::Pending);

    let profile = second_client
        .accounts
        .login("aigerim", "secret")
        .await
        .expect("login should succeed");
    assert_eq!(profile.balance.points(), 150);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn claim_race_across_two_clients_has_one_winner() {
    let first_client = memory_platform();
    let creator = first_client
        .accounts
        .register(RegisterAccountRequest::new(
            "aigerim",
            "Aigerim Seitova",
            "aigerim@asar.dev",
            "secret",
        ))
        .await
        .expect("registration should succeed");
    let volunteer = first_client
        .accounts
        .register(RegisterAccountRequest::new(
            "daniyar",
            "Daniyar Omarov",
            "daniyar@asar.dev",
            "secret",
        ))
        .await
        .expect("registration should succeed");
    let rival = first_client
        .accounts
        .register(RegisterAccountRequest::new(
            "marat",
            "Marat Aliyev",
            "marat@asar.dev",
            "secret",
        ))
        .await
        .expect("registration should succeed");

    let task = first_client
        .tasks
        .create_task(CreateTaskRequest::new(
            "Grocery delivery",
            "Groceries need carrying to the third floor.",
            "Astana",
            creator.id,
            30,
        ))
        .await
        .expect("task creation should succeed");
    first_client
        .tasks
        .approve_task(task.id())
        .await
        .expect("moderation should succeed");

    let second_client = platform_over_collections(first_client.collections.clone());
    let first_claim = first_client.tasks.claim(task.id(), volunteer.id).await;
    let second_claim = second_client.tasks.claim(task.id(), rival.id).await;

    assert!(first_claim.is_ok());
    assert!(second_claim.is_err());

    let stored = second_client
        .tasks
        .task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored.assigned_to(), Some(volunteer.id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_store_survives_reopening() {
    let scratch = tempfile::tempdir().expect("scratch directory should be created");
    let root = Utf8PathBuf::from_path_buf(scratch.path().to_path_buf())
        .expect("scratch path should be UTF-8");

    let task_id = {
        let platform = platform_over(
            DirKeyValueStore::open_ambient(&root).expect("store should open"),
        );
        let creator = platform
            .accounts
            .register(RegisterAccountRequest::new(
                "aigerim",
                "Aigerim Seitova",
                "aigerim@asar.dev",
                "secret",
            ))
            .await
            .expect("registration should succeed");
        let volunteer = platform
            .accounts
            .register(RegisterAccountRequest::new(
                "daniyar",
                "Daniyar Omarov",
                "daniyar@asar.dev",
                "secret",
            ))
            .await
            .expect("registration should succeed");

        let task = platform
            .tasks
            .create_task(CreateTaskRequest::new(
                "Small repairs",
                "Two shelves to mount and a dripping tap to fix.",
                "Shymkent",
                creator.id,
                75,
            ))
            .await
            .expect("task creation should succeed");
        platform
            .tasks
            .approve_task(task.id())
            .await
            .expect("moderation should succeed");
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
                SubmitReportRequest::new("Shelves up, tap fixed."),
            )
            .await
            .expect("report submission should succeed");
        platform
            .tasks
            .approve_report(task.id())
            .await
            .expect("report approval should succeed");
        task.id()
    };

    // A brand-new store over the same directory sees the finished task
    // and the paid-out balance.
    let reopened = platform_over(
        DirKeyValueStore::open_ambient(&root).expect("store should reopen"),
    );
    let task = reopened
        .tasks
        .task(task_id)
        .await
        .expect("lookup should succeed");
    assert_eq!(task.status(), TaskStatus::Done);

    let volunteer = reopened
        .accounts
        .login("daniyar", "secret")
        .await
        .expect("login should succeed");
    assert_eq!(volunteer.balance.points(), 275);
}
