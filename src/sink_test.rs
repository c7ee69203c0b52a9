use super::*;
use std::time::Duration;

fn test_settings() -> SinkSettings {
    SinkSettings {
        queue_size: 8,
        max_message_size: 64,
        default_timeout_secs: 1,
        chunk_size: 16,
    }
}

// =============================================================================
// Construction tests
// =============================================================================

#[test]
fn test_sink_creation() {
    let (_tx, rx) = mpsc::channel::<Bytes>(8);
    let sink = HttpAlarmSink::new("http://127.0.0.1:1/", test_settings(), rx);

    assert_eq!(sink.name(), "http");
    assert_eq!(sink.metrics().snapshot(), MetricsSnapshot::default());
}

#[test]
fn test_sink_with_custom_name() {
    let (_tx, rx) = mpsc::channel::<Bytes>(8);
    let sink = HttpAlarmSink::with_name("http://127.0.0.1:1/", test_settings(), rx, "pager");

    assert_eq!(sink.name(), "pager");
}

#[test]
fn test_metrics_handle_outlives_sink() {
    let (_tx, rx) = mpsc::channel::<Bytes>(8);
    let sink = HttpAlarmSink::new("http://127.0.0.1:1/", test_settings(), rx);
    let handle = sink.metrics_handle();
    drop(sink);

    assert_eq!(handle.name(), "http");
    assert_eq!(handle.snapshot(), MetricsSnapshot::default());
}

// =============================================================================
// Metrics tests
// =============================================================================

#[test]
fn test_metrics_record_and_snapshot() {
    let metrics = AlarmSinkMetrics::new();

    metrics.record_received();
    metrics.record_received();
    metrics.record_delivered(12);
    metrics.record_failed();

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.messages_received, 2);
    assert_eq!(snapshot.messages_delivered, 1);
    assert_eq!(snapshot.delivery_failures, 1);
    assert_eq!(snapshot.bytes_sent, 12);
}

#[test]
fn test_metrics_reset() {
    let metrics = AlarmSinkMetrics::new();
    metrics.record_received();
    metrics.record_delivered(5);
    metrics.reset();

    assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
}

// =============================================================================
// Run loop tests
// =============================================================================

#[tokio::test]
async fn test_run_exits_when_channel_closes() {
    let (tx, rx) = mpsc::channel::<Bytes>(8);
    let sink = HttpAlarmSink::new("http://127.0.0.1:1/", test_settings(), rx);

    drop(tx);

    let snapshot = tokio::time::timeout(Duration::from_secs(5), sink.run())
        .await
        .expect("worker should exit when all senders are gone");
    assert_eq!(snapshot, MetricsSnapshot::default());
}

#[tokio::test]
async fn test_empty_messages_are_skipped() {
    let (tx, rx) = mpsc::channel::<Bytes>(8);
    let sink = HttpAlarmSink::new("http://127.0.0.1:1/;conn_timeout=1", test_settings(), rx);

    tx.send(Bytes::new()).await.unwrap();
    drop(tx);

    let snapshot = sink.run().await;
    // Never counted, never attempted.
    assert_eq!(snapshot.messages_received, 0);
    assert_eq!(snapshot.delivery_failures, 0);
}

#[tokio::test]
async fn test_failed_delivery_does_not_stop_the_worker() {
    // Point at a port nothing listens on: every delivery fails, the
    // worker keeps going until the channel closes.
    let (tx, rx) = mpsc::channel::<Bytes>(8);
    let sink = HttpAlarmSink::new(
        "http://127.0.0.1:9/;timeout=1;conn_timeout=1",
        test_settings(),
        rx,
    );

    tx.send(Bytes::from_static(b"first")).await.unwrap();
    tx.send(Bytes::from_static(b"second")).await.unwrap();
    drop(tx);

    let snapshot = sink.run().await;
    assert_eq!(snapshot.messages_received, 2);
    assert_eq!(snapshot.messages_delivered, 0);
    assert_eq!(snapshot.delivery_failures, 2);
}

#[tokio::test]
async fn test_missing_endpoint_fails_per_message() {
    // No URL in the option string: the worker stays alive and each
    // message fails individually.
    let (tx, rx) = mpsc::channel::<Bytes>(8);
    let sink = HttpAlarmSink::new("auth_user=bot", test_settings(), rx);
    let metrics = sink.metrics_handle();

    let worker = tokio::spawn(sink.run());

    tx.send(Bytes::from_static(b"one")).await.unwrap();
    tx.send(Bytes::from_static(b"two")).await.unwrap();
    drop(tx);

    let snapshot = worker.await.expect("worker task");
    assert_eq!(snapshot.delivery_failures, 2);
    assert_eq!(metrics.snapshot(), snapshot);
}
