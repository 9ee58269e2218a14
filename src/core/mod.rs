//! Domain types, configuration and errors shared by both adapters.

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder, LabelQueries, ReadConfig, WriteConfig};
pub use context::Context;
pub use error::{RemoteError, Result};
pub use types::{
    Exemplar, Label, Labels, MatchType, Matcher, MetricMetadata, MetricType, Sample, SelectHints,
    TimeSeries, WriteRequest, WriteResponse, WriteSource, METRIC_NAME_LABEL,
};
