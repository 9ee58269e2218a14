//! In-memory transports for tests and local wiring.
//!
//! Both clients push every call through the real wire codec, so a test that
//! passes against them has exercised the exact bytes an HTTP transport would
//! put on the wire.

use super::{ReadClient, TransportError, WriteClient};
use crate::core::{Context, RemoteError};
use crate::wire::{self, codec, Query, QueryResult};
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Errors reported by the in-memory transports
#[derive(Error, Debug)]
pub enum MemoryTransportError {
    /// Failure configured by the test
    #[error("injected failure: {0}")]
    Injected(String),

    /// The call's context was already cancelled
    #[error("context cancelled")]
    Cancelled,

    /// The body could not be encoded or decoded
    #[error("wire codec: {0}")]
    Codec(#[from] RemoteError),
}

/// One call observed by [`RecordingWriteClient`]
#[derive(Debug, Clone)]
pub struct RecordedWrite {
    /// Compressed body as received
    pub payload: Bytes,
    /// Body decoded back into the wire request
    pub request: wire::WriteRequest,
    /// Whether the context was cancelled when the call arrived
    pub cancelled: bool,
}

/// Write client that decodes and keeps every body it receives.
#[derive(Debug)]
pub struct RecordingWriteClient {
    name: String,
    endpoint: String,
    writes: Mutex<Vec<RecordedWrite>>,
    failure: Mutex<Option<String>>,
    attempts: AtomicUsize,
}

impl RecordingWriteClient {
    /// Creates a client named `memory`
    pub fn new() -> Self {
        Self::with_name("memory", "memory://write")
    }

    /// Creates a client with an explicit name and endpoint
    pub fn with_name(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            writes: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Makes every following `store` fail with the given message
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Clears an injected failure
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Number of `store` calls, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Every successfully decoded body, in arrival order
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().clone()
    }

    /// The most recent decoded body
    pub fn last_request(&self) -> Option<wire::WriteRequest> {
        self.writes.lock().last().map(|w| w.request.clone())
    }
}

impl Default for RecordingWriteClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WriteClient for RecordingWriteClient {
    async fn store(&self, ctx: &Context, payload: Bytes) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let request = codec::decode_write_request(&payload).map_err(MemoryTransportError::from)?;
        let cancelled = ctx.is_cancelled();
        self.writes.lock().push(RecordedWrite {
            payload,
            request,
            cancelled,
        });

        if cancelled {
            return Err(MemoryTransportError::Cancelled.into());
        }
        if let Some(message) = self.failure.lock().clone() {
            return Err(MemoryTransportError::Injected(message).into());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Read client answering every query with one configured result.
#[derive(Debug, Default)]
pub struct StaticReadClient {
    result: Mutex<QueryResult>,
    queries: Mutex<Vec<Query>>,
    failure: Mutex<Option<String>>,
}

impl StaticReadClient {
    /// Creates a client answering with an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client answering with `result`
    pub fn with_result(result: QueryResult) -> Self {
        let client = Self::default();
        *client.result.lock() = result;
        client
    }

    /// Replaces the configured answer
    pub fn set_result(&self, result: QueryResult) {
        *self.result.lock() = result;
    }

    /// Makes every following `read` fail with the given message
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Queries received so far, as decoded from the request body
    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().clone()
    }

    fn serve(&self, body: &[u8]) -> Result<Vec<u8>, MemoryTransportError> {
        let request = codec::decode_read_request(body)?;
        let results = request
            .queries
            .iter()
            .map(|_| self.result.lock().clone())
            .collect();
        self.queries.lock().extend(request.queries);
        Ok(codec::encode_read_response(results)?)
    }
}

#[async_trait::async_trait]
impl ReadClient for StaticReadClient {
    async fn read(&self, ctx: &Context, query: Query) -> Result<QueryResult, TransportError> {
        if ctx.is_cancelled() {
            return Err(MemoryTransportError::Cancelled.into());
        }
        if let Some(message) = self.failure.lock().clone() {
            return Err(MemoryTransportError::Injected(message).into());
        }

        let body = codec::encode_read_request(vec![query]).map_err(MemoryTransportError::from)?;
        let response = self.serve(&body)?;
        let mut results =
            codec::decode_read_response(&response).map_err(MemoryTransportError::from)?;

        if results.is_empty() {
            return Ok(QueryResult::default());
        }
        Ok(results.swap_remove(0))
    }
}
