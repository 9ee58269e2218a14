//! Internal write request <-> wire `WriteRequest`.

use crate::core::{
    Exemplar, Label, MetricMetadata, MetricType, Sample, TimeSeries, WriteRequest,
};
use crate::wire;

/// Highest timestamp of the first sample and first exemplar of every series.
///
/// Producers append at most one sample and one exemplar per series per
/// request, so only index 0 is inspected. Starts at zero: a request without
/// samples or exemplars, or with only negative timestamps, yields 0.
pub fn highest_timestamp(req: &WriteRequest) -> i64 {
    let mut highest = 0;
    for ts in &req.timeseries {
        if let Some(sample) = ts.samples.first() {
            highest = highest.max(sample.timestamp_ms);
        }
        if let Some(exemplar) = ts.exemplars.first() {
            highest = highest.max(exemplar.timestamp_ms);
        }
    }
    highest
}

/// Converts an internal write request to the wire shape, keeping the order of
/// series and metadata.
pub fn to_wire_write_request(req: &WriteRequest) -> wire::WriteRequest {
    wire::WriteRequest {
        timeseries: req.timeseries.iter().map(to_wire_series).collect(),
        metadata: req.metadata.iter().map(to_wire_metadata).collect(),
    }
}

/// Converts a wire write request back to the internal shape.
pub fn from_wire_write_request(req: wire::WriteRequest) -> WriteRequest {
    WriteRequest {
        timeseries: req.timeseries.into_iter().map(from_wire_series).collect(),
        metadata: req.metadata.into_iter().map(from_wire_metadata).collect(),
        ..Default::default()
    }
}

fn to_wire_series(ts: &TimeSeries) -> wire::TimeSeries {
    wire::TimeSeries {
        labels: to_wire_labels(&ts.labels),
        samples: ts
            .samples
            .iter()
            .map(|s| wire::Sample {
                value: s.value,
                timestamp: s.timestamp_ms,
            })
            .collect(),
        exemplars: ts
            .exemplars
            .iter()
            .map(|e| wire::Exemplar {
                labels: to_wire_labels(&e.labels),
                value: e.value,
                timestamp: e.timestamp_ms,
            })
            .collect(),
    }
}

fn from_wire_series(ts: wire::TimeSeries) -> TimeSeries {
    TimeSeries {
        labels: from_wire_labels(ts.labels),
        samples: ts
            .samples
            .into_iter()
            .map(|s| Sample::new(s.timestamp, s.value))
            .collect(),
        exemplars: ts
            .exemplars
            .into_iter()
            .map(|e| Exemplar {
                labels: from_wire_labels(e.labels),
                value: e.value,
                timestamp_ms: e.timestamp,
            })
            .collect(),
    }
}

fn to_wire_metadata(m: &MetricMetadata) -> wire::MetricMetadata {
    wire::MetricMetadata {
        r#type: m.metric_type as i32,
        metric_family_name: m.metric_family_name.clone(),
        help: m.help.clone(),
        unit: m.unit.clone(),
    }
}

fn from_wire_metadata(m: wire::MetricMetadata) -> MetricMetadata {
    MetricMetadata {
        metric_type: MetricType::from_i32(m.r#type),
        metric_family_name: m.metric_family_name,
        help: m.help,
        unit: m.unit,
    }
}

/// Copies labels into the wire shape, order untouched.
pub fn to_wire_labels(labels: &[Label]) -> Vec<wire::Label> {
    labels
        .iter()
        .map(|l| wire::Label {
            name: l.name.clone(),
            value: l.value.clone(),
        })
        .collect()
}

/// Moves wire labels into the internal shape, order untouched.
pub fn from_wire_labels(labels: Vec<wire::Label>) -> Vec<Label> {
    labels
        .into_iter()
        .map(|l| Label {
            name: l.name,
            value: l.value,
        })
        .collect()
}
