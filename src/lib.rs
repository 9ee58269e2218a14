//! Prometheus remote storage adapter.
//!
//! Bridges an internal time-series pipeline and a remote Prometheus-compatible
//! backend in both directions:
//!
//! - **Remote write**: a [`Pusher`] converts internal write requests to the
//!   `prompb` wire shape, encodes them with protobuf, compresses them with
//!   snappy and hands the body to a [`WriteClient`].
//! - **Remote read**: a [`Queryable`] hands out [`Querier`]s whose `select`
//!   turns label matchers into a remote read query, runs it through a
//!   [`ReadClient`] and decodes the answer into a [`SeriesSet`].
//!
//! # Architecture
//!
//! - `core`: domain types, configuration, request context and errors
//! - `wire`: protobuf messages and the snappy codec
//! - `convert`: pure translation between internal and wire shapes
//! - `pusher` / `querier`: the two async adapters
//! - `transport`: client capabilities, plus in-memory implementations
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use prom_remote_adapter::core::{Context, Label, Matcher, TimeSeries, WriteRequest};
//! use prom_remote_adapter::transport::memory::{RecordingWriteClient, StaticReadClient};
//! use prom_remote_adapter::{Pusher, Queryable};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::background();
//!
//!     let pusher = Pusher::new(Arc::new(RecordingWriteClient::new()));
//!     let up = TimeSeries::new(vec![Label::new("__name__", "up")]).with_sample(1000, 1.0);
//!     let req = WriteRequest::new().with_series(up);
//!     pusher.push(&ctx, &req).await?;
//!
//!     let queryable = Queryable::new(Arc::new(StaticReadClient::new()));
//!     let querier = queryable.querier(ctx, 0, 2000)?;
//!     for series in querier.select(true, None, &[Matcher::equal("__name__", "up")]).await {
//!         println!("{}", series.labels());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod convert;
pub mod core;
pub mod pusher;
pub mod querier;
pub mod transport;
pub mod wire;

// Re-export the adapters and core types for convenience
pub use crate::core::{Config, Context, RemoteError, Result};
pub use crate::pusher::{build_write_request, EncodedBatch, PushOutcome, Pusher};
pub use crate::querier::{Querier, Queryable, Series, SeriesIterator, SeriesSet};
pub use crate::transport::{ReadClient, TransportError, WriteClient};
