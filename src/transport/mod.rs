//! Transport capabilities the adapters are built on.
//!
//! The HTTP clients that actually talk to the remote backend live outside this
//! crate. They plug in by implementing [`WriteClient`] and/or [`ReadClient`];
//! authentication, retries and connection pooling are theirs to handle.

pub mod memory;

use crate::core::Context;
use crate::wire::{Query, QueryResult};
use bytes::Bytes;

/// Error returned by a transport, passed through the adapters unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A client able to deliver remote write bodies.
#[async_trait::async_trait]
pub trait WriteClient: Send + Sync {
    /// Send one snappy-compressed `WriteRequest`.
    async fn store(&self, ctx: &Context, payload: Bytes) -> Result<(), TransportError>;

    /// Name of the remote, for logs.
    fn name(&self) -> &str;

    /// Endpoint URL of the remote, for logs.
    fn endpoint(&self) -> &str;
}

/// A client able to execute remote read queries.
#[async_trait::async_trait]
pub trait ReadClient: Send + Sync {
    /// Run one query against the remote.
    async fn read(&self, ctx: &Context, query: Query) -> Result<QueryResult, TransportError>;
}
