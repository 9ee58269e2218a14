//! Write adapter tests against the recording transport.

mod common;

use common::{generate_request, init_tracing, TestSeriesBuilder};
use pretty_assertions::assert_eq;
use prom_remote_adapter::core::{Context, MetricMetadata, MetricType, WriteRequest, WriteResponse};
use prom_remote_adapter::transport::memory::{MemoryTransportError, RecordingWriteClient};
use prom_remote_adapter::wire;
use prom_remote_adapter::Pusher;
use std::sync::Arc;

#[tokio::test]
async fn test_single_series_push() {
    init_tracing();
    let client = Arc::new(RecordingWriteClient::new());
    let pusher = Pusher::new(Arc::clone(&client));
    let req =
        WriteRequest::new().with_series(TestSeriesBuilder::new("up").sample(1000, 1.0).build());

    let outcome = pusher
        .push_with_watermark(&Context::background(), &req)
        .await
        .unwrap();

    assert_eq!(outcome.response, WriteResponse);
    assert_eq!(outcome.highest_timestamp, 1000);

    let writes = client.writes();
    assert_eq!(writes.len(), 1);
    assert!(!writes[0].payload.is_empty());
    assert_eq!(
        writes[0].request,
        wire::WriteRequest {
            timeseries: vec![wire::TimeSeries {
                labels: vec![wire::Label {
                    name: "__name__".to_string(),
                    value: "up".to_string(),
                }],
                samples: vec![wire::Sample {
                    value: 1.0,
                    timestamp: 1000,
                }],
                exemplars: vec![],
            }],
            metadata: vec![],
        }
    );
}

#[tokio::test]
async fn test_empty_push_still_reaches_the_transport() {
    let client = Arc::new(RecordingWriteClient::new());
    let pusher = Pusher::new(Arc::clone(&client));

    let outcome = pusher
        .push_with_watermark(&Context::background(), &WriteRequest::new())
        .await
        .unwrap();

    assert_eq!(outcome.highest_timestamp, 0);
    assert_eq!(client.attempts(), 1);
    assert_eq!(client.last_request(), Some(wire::WriteRequest::default()));
}

#[tokio::test]
async fn test_series_and_metadata_order_is_preserved() {
    let client = Arc::new(RecordingWriteClient::new());
    let pusher = Pusher::new(Arc::clone(&client));
    let req = generate_request(50)
        .with_metadata(MetricMetadata {
            metric_type: MetricType::Counter,
            metric_family_name: "metric_1".to_string(),
            help: "second".to_string(),
            unit: String::new(),
        })
        .with_metadata(MetricMetadata {
            metric_type: MetricType::Summary,
            metric_family_name: "metric_0".to_string(),
            help: "first".to_string(),
            unit: "bytes".to_string(),
        });

    pusher.push(&Context::background(), &req).await.unwrap();

    let sent = client.last_request().unwrap();
    let names: Vec<&str> = sent
        .timeseries
        .iter()
        .map(|ts| ts.labels[0].value.as_str())
        .collect();
    let expected: Vec<String> = (0..50).map(|i| format!("metric_{i}")).collect();
    assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());

    let families: Vec<(&str, i32)> = sent
        .metadata
        .iter()
        .map(|m| (m.metric_family_name.as_str(), m.r#type))
        .collect();
    assert_eq!(families, vec![("metric_1", 1), ("metric_0", 5)]);
}

#[tokio::test]
async fn test_exemplars_are_transmitted_and_count_toward_the_watermark() {
    let client = Arc::new(RecordingWriteClient::new());
    let pusher = Pusher::new(Arc::clone(&client));
    let req = WriteRequest::new()
        .with_series(TestSeriesBuilder::new("http_requests_total").sample(1000, 3.0).build())
        .with_series(
            TestSeriesBuilder::new("http_request_duration_seconds_bucket")
                .label("le", "0.5")
                .sample(900, 1.0)
                .exemplar(4000, 0.42)
                .build(),
        );

    let outcome = pusher
        .push_with_watermark(&Context::background(), &req)
        .await
        .unwrap();

    assert_eq!(outcome.highest_timestamp, 4000);
    let sent = client.last_request().unwrap();
    assert_eq!(
        sent.timeseries[1].exemplars,
        vec![wire::Exemplar {
            labels: vec![wire::Label {
                name: "trace_id".to_string(),
                value: "t4000".to_string(),
            }],
            value: 0.42,
            timestamp: 4000,
        }]
    );
}

#[tokio::test]
async fn test_transport_error_is_returned_unchanged() {
    let client = Arc::new(RecordingWriteClient::new());
    client.fail_with("remote unavailable");
    let pusher = Pusher::new(Arc::clone(&client));

    let err = pusher
        .push(&Context::background(), &generate_request(3))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    let source = err
        .transport_source()
        .and_then(|e| e.downcast_ref::<MemoryTransportError>());
    assert!(matches!(
        source,
        Some(MemoryTransportError::Injected(msg)) if msg == "remote unavailable"
    ));

    // No retry inside the adapter.
    assert_eq!(client.attempts(), 1);

    client.recover();
    pusher
        .push(&Context::background(), &generate_request(3))
        .await
        .unwrap();
    assert_eq!(client.attempts(), 2);
}

#[tokio::test]
async fn test_context_is_passed_through_to_the_transport() {
    let client = Arc::new(RecordingWriteClient::new());
    let pusher = Pusher::new(Arc::clone(&client));
    let ctx = Context::background();
    ctx.cancel();

    let err = pusher.push(&ctx, &generate_request(1)).await.unwrap_err();

    assert!(err.is_transport());
    assert!(client.writes()[0].cancelled);
}

#[tokio::test]
async fn test_concurrent_pushes_share_one_client() {
    let client = Arc::new(RecordingWriteClient::new());
    let pusher = Pusher::new(Arc::clone(&client));

    let mut handles = Vec::new();
    for i in 0..8 {
        let pusher = pusher.clone();
        handles.push(tokio::spawn(async move {
            let req = WriteRequest::new()
                .with_series(
                    TestSeriesBuilder::new("up")
                        .label("worker", &i.to_string())
                        .sample(i, 1.0)
                        .build(),
                );
            pusher.push(&Context::background(), &req).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.attempts(), 8);
    assert_eq!(client.writes().len(), 8);
}
