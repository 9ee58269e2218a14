use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the label carrying the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// A single name/value label pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,
    /// Label value
    pub value: String,
}

impl Label {
    /// Creates a new label
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A label set sorted by label name.
///
/// The derived ordering compares pairwise by name, then value, then by length,
/// which gives the total order used when a select asks for sorted series.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Labels(Vec<Label>);

impl Labels {
    /// Builds a label set, sorting by name. Duplicate names are kept as given.
    pub fn new(mut labels: Vec<Label>) -> Self {
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        Labels(labels)
    }

    /// Builds a label set from `(name, value)` pairs
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(n, v)| Label::new(n, v)).collect())
    }

    /// Returns the value of the named label
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.value.as_str())
    }

    /// Returns the metric name, if present
    pub fn metric_name(&self) -> Option<&str> {
        self.get(METRIC_NAME_LABEL)
    }

    /// Iterates over the labels in name order
    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set has no labels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the labels as a slice
    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }

    /// Returns the inner vector
    pub fn into_inner(self) -> Vec<Label> {
        self.0
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={:?}", label.name, label.value)?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One (timestamp, value) point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample value
    pub value: f64,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

impl Sample {
    /// Creates a new sample
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            value,
            timestamp_ms,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @{}", self.value, self.timestamp_ms)
    }
}

/// A sample carrying trace-correlation labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exemplar {
    /// Exemplar labels, usually a trace id
    pub labels: Vec<Label>,
    /// Exemplar value
    pub value: f64,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

/// One labeled stream inside a write request.
///
/// Producers append at most one sample and one exemplar per series per
/// request; the watermark computation relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Series labels, names unique within the series
    pub labels: Vec<Label>,
    /// Samples in append order
    pub samples: Vec<Sample>,
    /// Exemplars in append order
    pub exemplars: Vec<Exemplar>,
}

impl TimeSeries {
    /// Creates a series with the given labels and no data
    pub fn new(labels: Vec<Label>) -> Self {
        Self {
            labels,
            ..Default::default()
        }
    }

    /// Adds a sample
    pub fn with_sample(mut self, timestamp_ms: i64, value: f64) -> Self {
        self.samples.push(Sample::new(timestamp_ms, value));
        self
    }

    /// Adds an exemplar
    pub fn with_exemplar(mut self, labels: Vec<Label>, timestamp_ms: i64, value: f64) -> Self {
        self.exemplars.push(Exemplar {
            labels,
            value,
            timestamp_ms,
        });
        self
    }
}

/// Metric family type. Discriminants match the wire enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum MetricType {
    /// Type not reported
    #[default]
    Unknown = 0,
    /// Monotonic counter
    Counter = 1,
    /// Point-in-time value
    Gauge = 2,
    /// Bucketed distribution
    Histogram = 3,
    /// Histogram over a gauge
    GaugeHistogram = 4,
    /// Quantile summary
    Summary = 5,
    /// Informational metric
    Info = 6,
    /// Set of boolean states
    StateSet = 7,
}

impl MetricType {
    /// Maps a wire value back to a type. Unknown values become `Unknown`.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Self::Counter,
            2 => Self::Gauge,
            3 => Self::Histogram,
            4 => Self::GaugeHistogram,
            5 => Self::Summary,
            6 => Self::Info,
            7 => Self::StateSet,
            _ => Self::Unknown,
        }
    }

    /// Lower-case name as used in exposition formats
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Counter => "counter",
            Self::Gauge => "gauge",
            Self::Histogram => "histogram",
            Self::GaugeHistogram => "gaugehistogram",
            Self::Summary => "summary",
            Self::Info => "info",
            Self::StateSet => "stateset",
        }
    }
}

/// Type/help/unit annotation for a metric family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricMetadata {
    /// Metric family type
    pub metric_type: MetricType,
    /// Family name, without suffixes
    pub metric_family_name: String,
    /// Help text
    pub help: String,
    /// Unit
    pub unit: String,
}

/// Where a write originated. Kept on the internal request only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteSource {
    /// Written through the ingestion API
    #[default]
    Api,
    /// Produced by rule evaluation
    Rule,
}

/// One ingestion batch from the internal pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// Series in arrival order
    pub timeseries: Vec<TimeSeries>,
    /// Metric metadata in arrival order
    pub metadata: Vec<MetricMetadata>,
    /// Origin of the batch
    pub source: WriteSource,
}

impl WriteRequest {
    /// Creates an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series
    pub fn with_series(mut self, series: TimeSeries) -> Self {
        self.timeseries.push(series);
        self
    }

    /// Adds a metadata entry
    pub fn with_metadata(mut self, metadata: MetricMetadata) -> Self {
        self.metadata.push(metadata);
        self
    }

    /// True when the request carries neither series nor metadata
    pub fn is_empty(&self) -> bool {
        self.timeseries.is_empty() && self.metadata.is_empty()
    }
}

/// Empty acknowledgement returned by a successful push
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteResponse;

/// Label matcher operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `=~`
    Regexp,
    /// `!~`
    NotRegexp,
}

impl MatchType {
    /// PromQL operator spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Regexp => "=~",
            Self::NotRegexp => "!~",
        }
    }

    /// True for the two regex operators
    pub fn is_regex(&self) -> bool {
        matches!(self, Self::Regexp | Self::NotRegexp)
    }
}

/// A label matcher. Carried to the remote end as-is, never evaluated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matcher {
    /// Operator
    pub match_type: MatchType,
    /// Label name
    pub name: String,
    /// Value or regex pattern
    pub value: String,
}

impl Matcher {
    /// Creates a matcher
    pub fn new(match_type: MatchType, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            match_type,
            name: name.into(),
            value: value.into(),
        }
    }

    /// `name="value"`
    pub fn equal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(MatchType::Equal, name, value)
    }

    /// `name!="value"`
    pub fn not_equal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(MatchType::NotEqual, name, value)
    }

    /// `name=~"pattern"`
    pub fn regexp(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(MatchType::Regexp, name, pattern)
    }

    /// `name!~"pattern"`
    pub fn not_regexp(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(MatchType::NotRegexp, name, pattern)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:?}", self.name, self.match_type.as_str(), self.value)
    }
}

/// Optional hints describing the query that triggered a select
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectHints {
    /// Start of the data needed, in milliseconds
    pub start_ms: i64,
    /// End of the data needed, in milliseconds
    pub end_ms: i64,
    /// Query step in milliseconds
    pub step_ms: i64,
    /// Surrounding function or aggregation
    pub func: String,
    /// Label names used in aggregation
    pub grouping: Vec<String>,
    /// `by` when true, `without` when false
    pub by: bool,
    /// Range vector selector range in milliseconds
    pub range_ms: i64,
}
