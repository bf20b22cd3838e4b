//! Chat thread integration tests.

use super::helpers::{platform, post_task, register};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_and_volunteer_exchange_messages() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let volunteer = register(&platform, "daniyar").await;
    let task = post_task(&platform, &creator, 50).await;

    let question = platform
        .chat
        .send(task.id(), volunteer.id, "Is the task still available?")
        .await
        .expect("send should succeed");
    platform
        .chat
        .send(task.id(), creator.id, "It is, feel free to claim it.")
        .await
        .expect("send should succeed");

    let thread = platform
        .chat
        .thread(task.id())
        .await
        .expect("thread read should succeed");
    assert_eq!(thread.len(), 2);
    assert_eq!(thread.first(), Some(&question));

    let fresh = platform
        .chat
        .messages_since(task.id(), question.sent_at())
        .await
        .expect("polling read should succeed");
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh.first().map(|message| message.sender()), Some(creator.id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn threads_do_not_leak_across_tasks() {
    let platform = platform();
    let creator = register(&platform, "aigerim").await;
    let first = post_task(&platform, &creator, 30).await;
    let second = post_task(&platform, &creator, 40).await;

    platform
        .chat
        .send(first.id(), creator.id, "About the first task.")
        .await
        .expect("send should succeed");

    let other_thread = platform
        .chat
        .thread(second.id())
        .await
        .expect("thread read should succeed");
    assert!(other_thread.is_empty());
}
