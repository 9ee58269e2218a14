//! Write adapter: forwards internal write requests to a remote write endpoint.
//!
//! Each push converts the request to the wire shape, encodes it with protobuf,
//! compresses it with snappy and hands the body to the [`WriteClient`]. No
//! batching, retry or queueing happens here.

use crate::convert;
use crate::core::{Context, RemoteError, Result, WriteConfig, WriteRequest, WriteResponse};
use crate::transport::WriteClient;
use crate::wire::codec;
use bytes::Bytes;
use prost::Message;
use std::sync::Arc;
use tracing::{debug, warn};

/// A compressed remote write body ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBatch {
    /// Snappy-compressed protobuf `WriteRequest`
    pub payload: Bytes,
    /// Highest timestamp seen in the request, see [`convert::highest_timestamp`]
    pub highest_timestamp: i64,
}

/// Outcome of a successful push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushOutcome {
    /// Acknowledgement returned to the caller
    pub response: WriteResponse,
    /// Highest timestamp carried by the pushed request
    pub highest_timestamp: i64,
}

/// Builds the compressed body for `req`, using `scratch` as the compression
/// buffer. The buffer's previous contents are discarded.
pub fn build_write_request(req: &WriteRequest, mut scratch: Vec<u8>) -> Result<EncodedBatch> {
    let highest_timestamp = convert::highest_timestamp(req);
    let wire_req = convert::to_wire_write_request(req);

    let mut raw = Vec::with_capacity(wire_req.encoded_len());
    wire_req
        .encode(&mut raw)
        .map_err(|e| RemoteError::translation(format!("marshal write request: {e}")))?;

    codec::compress(&raw, &mut scratch)
        .map_err(|e| RemoteError::translation(format!("compress write request: {e}")))?;

    Ok(EncodedBatch {
        payload: Bytes::from(scratch),
        highest_timestamp,
    })
}

/// Push adapter bound to one remote write client.
pub struct Pusher<C: ?Sized> {
    client: Arc<C>,
    config: WriteConfig,
}

impl<C: WriteClient + ?Sized> Pusher<C> {
    /// Creates a pusher with the default write configuration
    pub fn new(client: Arc<C>) -> Self {
        Self::with_config(client, WriteConfig::default())
    }

    /// Creates a pusher with an explicit write configuration
    pub fn with_config(client: Arc<C>, config: WriteConfig) -> Self {
        Self { client, config }
    }

    /// Name of the underlying remote
    pub fn name(&self) -> &str {
        self.client.name()
    }

    /// Endpoint of the underlying remote
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Sends `req` to the remote and returns an empty acknowledgement.
    ///
    /// Translation failures are reported without contacting the transport.
    /// Transport failures come back as [`RemoteError::RemoteWrite`] with the
    /// transport's error as source.
    pub async fn push(&self, ctx: &Context, req: &WriteRequest) -> Result<WriteResponse> {
        self.push_with_watermark(ctx, req)
            .await
            .map(|outcome| outcome.response)
    }

    /// Like [`Pusher::push`], also reporting the request's highest timestamp.
    pub async fn push_with_watermark(
        &self,
        ctx: &Context,
        req: &WriteRequest,
    ) -> Result<PushOutcome> {
        let scratch = Vec::with_capacity(self.config.buffer_capacity);
        let batch = build_write_request(req, scratch)?;
        let highest_timestamp = batch.highest_timestamp;

        debug!(
            remote = self.client.name(),
            series = req.timeseries.len(),
            metadata = req.metadata.len(),
            bytes = batch.payload.len(),
            highest_timestamp,
            "Push - remote write"
        );

        if let Err(err) = self.client.store(ctx, batch.payload).await {
            warn!(
                remote = self.client.name(),
                endpoint = self.client.endpoint(),
                error = %err,
                "Push - remote write failed"
            );
            return Err(RemoteError::RemoteWrite(err));
        }

        Ok(PushOutcome {
            response: WriteResponse,
            highest_timestamp,
        })
    }
}

impl<C: ?Sized> Clone for Pusher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
        }
    }
}
