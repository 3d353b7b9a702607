/*!
 * Integration tests for the concurrent translation pipeline
 */

use parking_lot::Mutex;
use std::sync::Arc;

use dotwai::app_config::TranslationCommonConfig;
use dotwai::errors::TranslationError;
use dotwai::providers::mock::MockGateway;
use dotwai::providers::CompletionGateway;
use dotwai::translation::{CancellationFlag, ProgressUpdate, RunOutcome, TranslationService};

/// Pool configuration with a retry delay short enough for tests
fn test_common(worker_count: usize) -> TranslationCommonConfig {
    TranslationCommonConfig {
        worker_count,
        retry_delay_ms: 10,
        ..TranslationCommonConfig::default()
    }
}

fn service(gateway: &Arc<MockGateway>, common: TranslationCommonConfig) -> TranslationService {
    TranslationService::new(
        Arc::clone(gateway) as Arc<dyn CompletionGateway>,
        "French",
        common,
    )
}

/// Shared collector for progress updates emitted by worker tasks
fn progress_collector() -> (
    Arc<Mutex<Vec<ProgressUpdate>>>,
    impl Fn(ProgressUpdate) + Clone + Send + Sync + 'static,
) {
    let updates = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&updates);
    (updates, move |update| sink.lock().push(update))
}

/// Test a two-paragraph run with scripted replies and exact assembled output
#[tokio::test]
async fn test_run_withScriptedReplies_shouldAssembleInSourceOrder() {
    let gateway = Arc::new(
        MockGateway::working()
            .with_reply("Hello world.", "Bonjour le monde.")
            .with_reply("Goodbye.", "Au revoir."),
    );
    let service = service(&gateway, test_common(2));
    let (updates, progress) = progress_collector();

    let outcome = service
        .run(
            vec!["Hello world.".to_string(), "Goodbye.".to_string()],
            CancellationFlag::new(),
            progress,
        )
        .await
        .unwrap();

    assert_eq!(
        outcome.into_text().as_deref(),
        Some("Bonjour le monde.\n\nAu revoir.")
    );

    let updates = updates.lock();
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().all(|u| u.total == 2 && !u.stopped));
    // Each update carries the count read at its own slot write
    let mut counts: Vec<usize> = updates.iter().map(|u| u.translated).collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![1, 2]);
}

/// Test that idle workers never issue requests when the queue is shorter than the pool
#[tokio::test]
async fn test_run_withMoreWorkersThanParagraphs_shouldRequestOncePerParagraph() {
    let gateway = Arc::new(MockGateway::working());
    let service = service(&gateway, test_common(5));

    let outcome = service
        .run(
            vec!["Only paragraph.".to_string()],
            CancellationFlag::new(),
            |_| {},
        )
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Completed(_)));
    assert_eq!(gateway.request_count(), 1);
}

/// Test that a flag raised before the run starts stops it with zero requests
#[tokio::test]
async fn test_run_withFlagRaisedBeforeStart_shouldCancelWithoutRequests() {
    let gateway = Arc::new(MockGateway::working());
    let service = service(&gateway, test_common(3));
    let (updates, progress) = progress_collector();

    let cancel = CancellationFlag::new();
    cancel.raise();

    let outcome = service
        .run(
            vec!["One.".to_string(), "Two.".to_string(), "Three.".to_string()],
            cancel,
            progress,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Cancelled));
    assert_eq!(gateway.request_count(), 0);

    let updates = updates.lock();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].stopped);
    assert_eq!(updates[0].translated, 0);
    assert_eq!(updates[0].total, 3);
}

/// Test that transient gateway failures are retried until success
#[tokio::test]
async fn test_run_withTransientFailures_shouldRetryUntilSuccess() {
    let gateway = Arc::new(MockGateway::fail_times(3));
    let service = service(&gateway, test_common(2));
    let (updates, progress) = progress_collector();

    let outcome = service
        .run(
            vec!["First.".to_string(), "Second.".to_string()],
            CancellationFlag::new(),
            progress,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Completed(_)));
    // 3 failures then 1 success per paragraph
    assert_eq!(gateway.request_count(), 8);
    // Failed attempts never produce progress updates
    assert_eq!(updates.lock().len(), 2);
}

/// Test that a bounded retry budget surfaces exhaustion as an error
#[tokio::test]
async fn test_run_withRetryBudgetExceeded_shouldFailWithRetriesExhausted() {
    let gateway = Arc::new(MockGateway::failing());
    let mut common = test_common(1);
    common.max_retries = Some(2);
    let service = service(&gateway, common);

    let result = service
        .run(
            vec!["Doomed paragraph.".to_string()],
            CancellationFlag::new(),
            |_| {},
        )
        .await;

    match result {
        Err(TranslationError::RetriesExhausted { index, attempts }) => {
            assert_eq!(index, 0);
            assert_eq!(attempts, 3);
        }
        other => panic!("Expected RetriesExhausted, got {:?}", other),
    }
    assert_eq!(gateway.request_count(), 3);
}

/// Test that a wide pool preserves source order in the assembled output
#[tokio::test]
async fn test_run_withManyParagraphs_shouldPreserveSourceOrder() {
    let total = 12;
    let mut gateway = MockGateway::working();
    for i in 0..total {
        gateway = gateway.with_reply(format!("Paragraph {}.", i), format!("Translated {}.", i));
    }
    let gateway = Arc::new(gateway);
    let service = service(&gateway, test_common(4));

    let paragraphs: Vec<String> = (0..total).map(|i| format!("Paragraph {}.", i)).collect();
    let outcome = service
        .run(paragraphs, CancellationFlag::new(), |_| {})
        .await
        .unwrap();

    let expected: Vec<String> = (0..total).map(|i| format!("Translated {}.", i)).collect();
    assert_eq!(outcome.into_text().unwrap(), expected.join("\n\n"));
}

/// Test that an empty document completes immediately
#[tokio::test]
async fn test_run_withNoParagraphs_shouldCompleteWithEmptyOutput() {
    let gateway = Arc::new(MockGateway::working());
    let service = service(&gateway, test_common(3));

    let outcome = service
        .run(Vec::new(), CancellationFlag::new(), |_| {})
        .await
        .unwrap();

    assert_eq!(outcome.into_text().as_deref(), Some(""));
    assert_eq!(gateway.request_count(), 0);
}

/// Test cancellation raised mid-run from the progress callback.
///
/// Workers check the flag only between paragraphs, so claims already in
/// flight when the flag goes up still finish: with 2 workers the final count
/// lands between 2 and 4 of the 10 paragraphs.
#[tokio::test]
async fn test_run_withFlagRaisedMidRun_shouldStopClaimingNewWork() {
    let gateway = Arc::new(MockGateway::slow(50));
    let service = service(&gateway, test_common(2));
    let (updates, updates_sink) = progress_collector();

    let cancel = CancellationFlag::new();
    let cancel_from_callback = cancel.clone();
    let progress = move |update: ProgressUpdate| {
        if !update.stopped && update.translated >= 2 {
            cancel_from_callback.raise();
        }
        updates_sink(update);
    };

    let paragraphs: Vec<String> = (0..10).map(|i| format!("Paragraph {}.", i)).collect();
    let outcome = service.run(paragraphs, cancel, progress).await.unwrap();

    assert!(matches!(outcome, RunOutcome::Cancelled));

    let updates = updates.lock();
    let last = updates.last().expect("Expected a terminal update");
    assert!(last.stopped);
    assert!(
        (2..=4).contains(&last.translated),
        "Expected 2..=4 translated paragraphs, got {}",
        last.translated
    );
    assert_eq!(last.total, 10);
    // Unclaimed paragraphs were never requested
    assert!(gateway.request_count() < 10);
}
