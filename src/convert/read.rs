//! Select arguments -> wire `Query`, wire `QueryResult` -> [`SeriesSet`].

use crate::convert::write::from_wire_labels;
use crate::core::{
    Labels, MatchType, Matcher, RemoteError, Result, Sample, SelectHints, METRIC_NAME_LABEL,
};
use crate::querier::{Series, SeriesSet};
use crate::wire::{self, label_matcher};

/// Builds the wire query for one select.
///
/// The time range and matcher values are copied as given; the remote end
/// evaluates them. Only a matcher without a label name is rejected, since it
/// cannot name anything on the wire.
pub fn to_query(
    mint: i64,
    maxt: i64,
    matchers: &[Matcher],
    hints: Option<&SelectHints>,
) -> Result<wire::Query> {
    Ok(wire::Query {
        start_timestamp_ms: mint,
        end_timestamp_ms: maxt,
        matchers: to_label_matchers(matchers)?,
        hints: hints.map(to_read_hints),
    })
}

fn to_label_matchers(matchers: &[Matcher]) -> Result<Vec<wire::LabelMatcher>> {
    matchers
        .iter()
        .map(|m| {
            if m.name.is_empty() {
                return Err(RemoteError::to_query(format!(
                    "matcher {m} has an empty label name"
                )));
            }

            let kind = match m.match_type {
                MatchType::Equal => label_matcher::Type::Eq,
                MatchType::NotEqual => label_matcher::Type::Neq,
                MatchType::Regexp => label_matcher::Type::Re,
                MatchType::NotRegexp => label_matcher::Type::Nre,
            };
            Ok(wire::LabelMatcher {
                r#type: kind as i32,
                name: m.name.clone(),
                value: m.value.clone(),
            })
        })
        .collect()
}

fn to_read_hints(hints: &SelectHints) -> wire::ReadHints {
    wire::ReadHints {
        step_ms: hints.step_ms,
        func: hints.func.clone(),
        start_ms: hints.start_ms,
        end_ms: hints.end_ms,
        grouping: hints.grouping.clone(),
        by: hints.by,
        range_ms: hints.range_ms,
    }
}

/// Decodes a query result into a series set.
///
/// Every series gets its labels sorted by name. With `validate` on, the first
/// series carrying an invalid metric name, an invalid label name or a
/// duplicate label name turns the whole set into a failed one. With
/// `sort_series` on, series come out ordered by label set.
pub fn from_query_result(
    sort_series: bool,
    result: wire::QueryResult,
    validate: bool,
) -> SeriesSet {
    let mut series = Vec::with_capacity(result.timeseries.len());

    for ts in result.timeseries {
        let labels = Labels::new(from_wire_labels(ts.labels));
        if validate {
            if let Err(err) = validate_labels(&labels) {
                return SeriesSet::failed(err);
            }
        }

        let samples = ts
            .samples
            .into_iter()
            .map(|s| Sample::new(s.timestamp, s.value))
            .collect();
        series.push(Series::new(labels, samples));
    }

    if sort_series {
        series.sort_by(|a, b| a.labels().cmp(b.labels()));
    }
    SeriesSet::from_series(series)
}

/// Checks a sorted label set against the classic Prometheus naming rules.
pub fn validate_labels(labels: &Labels) -> Result<()> {
    let mut previous: Option<&str> = None;

    for label in labels {
        if label.name == METRIC_NAME_LABEL && !is_valid_metric_name(&label.value) {
            return Err(RemoteError::invalid_series(format!(
                "invalid metric name: {:?}",
                label.value
            )));
        }
        if !is_valid_label_name(&label.name) {
            return Err(RemoteError::invalid_series(format!(
                "invalid label name: {:?}",
                label.name
            )));
        }
        if previous == Some(label.name.as_str()) {
            return Err(RemoteError::invalid_series(format!(
                "duplicate label with name: {}",
                label.name
            )));
        }
        previous = Some(label.name.as_str());
    }
    Ok(())
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
