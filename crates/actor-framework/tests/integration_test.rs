use actor_framework::mock::{MockActor, MockEvent, MockJournal};
use actor_framework::{spawn, FrameworkError};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
enum TestError {
    #[error("device busy")]
    Busy,
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

const GRACE: Duration = Duration::from_secs(2);

#[tokio::test]
async fn test_spawn_waits_for_ready_before_returning() {
    let journal = MockJournal::new();

    let first = spawn(MockActor::<TestError>::new("first", journal.clone()))
        .await
        .unwrap();
    // The first actor has fully started before the second is even attempted.
    assert_eq!(journal.started(), vec!["first"]);

    let second = spawn(MockActor::<TestError>::new("second", journal.clone()))
        .await
        .unwrap();

    let events = journal.events();
    let first_ready = events
        .iter()
        .position(|e| *e == MockEvent::Started("first".into()))
        .unwrap();
    let second_attempt = events
        .iter()
        .position(|e| *e == MockEvent::Starting("second".into()))
        .unwrap();
    assert!(first_ready < second_attempt);

    first.stop(GRACE).await.unwrap();
    second.stop(GRACE).await.unwrap();
    assert_eq!(journal.stopped(), vec!["first", "second"]);
}

#[tokio::test]
async fn test_startup_failure_is_returned_and_actor_never_stops() {
    let journal = MockJournal::new();
    let actor = MockActor::new("mixer", journal.clone()).fail_with(TestError::Busy);

    let result = spawn(actor).await;

    assert!(matches!(result, Err(TestError::Busy)));
    assert_eq!(
        journal.events(),
        vec![
            MockEvent::Starting("mixer".into()),
            MockEvent::StartFailed("mixer".into()),
        ]
    );
}

#[tokio::test]
async fn test_panic_during_startup_becomes_task_failure() {
    let journal = MockJournal::new();
    let actor = MockActor::<TestError>::new("backend", journal.clone()).panic_on_start();

    let result = spawn(actor).await;

    assert!(matches!(
        result,
        Err(TestError::Framework(FrameworkError::TaskFailed(_)))
    ));
    assert!(journal.started().is_empty());
}

#[tokio::test]
async fn test_stop_times_out_and_aborts_unresponsive_actor() {
    let journal = MockJournal::new();
    let handle = spawn(MockActor::<TestError>::new("stubborn", journal.clone()).ignore_stop())
        .await
        .unwrap();

    let result = handle.stop(Duration::from_millis(50)).await;

    match result {
        Err(FrameworkError::StopTimedOut { actor, grace }) => {
            assert_eq!(actor, "stubborn");
            assert_eq!(grace, Duration::from_millis(50));
        }
        other => panic!("expected a stop timeout, got {other:?}"),
    }
    assert!(journal.stopped().is_empty());
}

#[tokio::test]
async fn test_dropping_handle_stops_actor() {
    let journal = MockJournal::new();
    let handle = spawn(MockActor::<TestError>::new("frontend", journal.clone()))
        .await
        .unwrap();

    drop(handle);

    for _ in 0..100 {
        if !journal.stopped().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(journal.stopped(), vec!["frontend"]);
}
