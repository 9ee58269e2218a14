//! Common test utilities and fixtures.

#![allow(dead_code)]

use parking_lot::Mutex;
use prom_remote_adapter::core::{Context, Label, TimeSeries, WriteRequest};
use prom_remote_adapter::transport::{ReadClient, TransportError};
use prom_remote_adapter::wire;
use std::io;

/// Installs a test subscriber once. Honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test fixture builder for internal series with sensible defaults.
pub struct TestSeriesBuilder {
    name: String,
    labels: Vec<(String, String)>,
    samples: Vec<(i64, f64)>,
    exemplars: Vec<(i64, f64)>,
}

impl TestSeriesBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: Vec::new(),
            samples: Vec::new(),
            exemplars: Vec::new(),
        }
    }

    pub fn label(mut self, name: &str, value: &str) -> Self {
        self.labels.push((name.to_string(), value.to_string()));
        self
    }

    pub fn sample(mut self, timestamp_ms: i64, value: f64) -> Self {
        self.samples.push((timestamp_ms, value));
        self
    }

    pub fn exemplar(mut self, timestamp_ms: i64, value: f64) -> Self {
        self.exemplars.push((timestamp_ms, value));
        self
    }

    pub fn build(self) -> TimeSeries {
        let mut labels = vec![Label::new("__name__", self.name)];
        labels.extend(self.labels.into_iter().map(|(n, v)| Label::new(n, v)));

        let mut series = TimeSeries::new(labels);
        for (ts, value) in self.samples {
            series = series.with_sample(ts, value);
        }
        for (ts, value) in self.exemplars {
            let labels = vec![Label::new("trace_id", format!("t{ts}"))];
            series = series.with_exemplar(labels, ts, value);
        }
        series
    }
}

/// Request with `count` single-sample series named `metric_<i>`.
pub fn generate_request(count: usize) -> WriteRequest {
    (0..count).fold(WriteRequest::new(), |req, i| {
        req.with_series(
            TestSeriesBuilder::new(&format!("metric_{i}"))
                .label("instance", &format!("host-{}", i % 4))
                .sample(1000 + i as i64, i as f64)
                .build(),
        )
    })
}

/// Wire series as a remote read endpoint would return it.
pub fn wire_series(labels: &[(&str, &str)], samples: &[(i64, f64)]) -> wire::TimeSeries {
    wire::TimeSeries {
        labels: labels
            .iter()
            .map(|(n, v)| wire::Label {
                name: (*n).to_string(),
                value: (*v).to_string(),
            })
            .collect(),
        samples: samples
            .iter()
            .map(|(t, v)| wire::Sample {
                value: *v,
                timestamp: *t,
            })
            .collect(),
        exemplars: vec![],
    }
}

/// Read client failing with an `io::Error` and recording the context it saw.
#[derive(Default)]
pub struct BrokenReadClient {
    pub seen_cancelled: Mutex<Vec<bool>>,
}

#[async_trait::async_trait]
impl ReadClient for BrokenReadClient {
    async fn read(
        &self,
        ctx: &Context,
        _query: wire::Query,
    ) -> Result<wire::QueryResult, TransportError> {
        self.seen_cancelled.lock().push(ctx.is_cancelled());
        Err(Box::new(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        )))
    }
}
