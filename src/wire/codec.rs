//! Snappy block compression and protobuf framing for remote storage bodies.
//!
//! Remote write and remote read both send a protobuf message compressed with
//! the snappy *raw block* format (not the framed stream format). The helpers
//! here are used by the write adapter and are available to transport
//! implementations that need to build or parse HTTP bodies.

use crate::core::Result;
use crate::wire::{Query, QueryResult, ReadRequest, ReadResponse, WriteRequest};
use prost::Message;
use snap::raw::{decompress_len, max_compress_len, Decoder, Encoder};

/// `Content-Encoding` of remote storage bodies
pub const CONTENT_ENCODING: &str = "snappy";
/// `Content-Type` of remote storage bodies
pub const CONTENT_TYPE: &str = "application/x-protobuf";
/// Header carrying the remote write protocol version
pub const REMOTE_WRITE_VERSION_HEADER: &str = "X-Prometheus-Remote-Write-Version";
/// Remote write protocol version implemented here
pub const REMOTE_WRITE_VERSION: &str = "0.1.0";
/// Header carrying the remote read protocol version
pub const REMOTE_READ_VERSION_HEADER: &str = "X-Prometheus-Remote-Read-Version";
/// Remote read protocol version implemented here
pub const REMOTE_READ_VERSION: &str = "0.1.0";

/// Compresses `input` into `output`, replacing its contents.
///
/// `output` is only scratch space: it is cleared and grown to the worst-case
/// compressed size as needed, so an empty or undersized buffer works.
pub fn compress(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    output.clear();
    output.resize(max_compress_len(input.len()), 0);
    let n = Encoder::new().compress(input, output)?;
    output.truncate(n);
    Ok(())
}

/// Decompresses a snappy block into a new buffer.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = vec![0; decompress_len(input)?];
    let n = Decoder::new().decompress(input, &mut output)?;
    output.truncate(n);
    Ok(output)
}

/// Encodes and compresses any message.
pub fn encode_compressed<M: Message>(message: &M) -> Result<Vec<u8>> {
    let raw = message.encode_to_vec();
    let mut compressed = Vec::new();
    compress(&raw, &mut compressed)?;
    Ok(compressed)
}

/// Decompresses and decodes any message.
pub fn decode_compressed<M: Message + Default>(body: &[u8]) -> Result<M> {
    let raw = decompress(body)?;
    Ok(M::decode(raw.as_slice())?)
}

/// Parses a remote write body.
pub fn decode_write_request(body: &[u8]) -> Result<WriteRequest> {
    decode_compressed(body)
}

/// Builds a remote read body carrying the given queries, asking for the
/// `Samples` response type.
pub fn encode_read_request(queries: Vec<Query>) -> Result<Vec<u8>> {
    let request = ReadRequest {
        queries,
        accepted_response_types: vec![super::read_request::ResponseType::Samples as i32],
    };
    encode_compressed(&request)
}

/// Parses a remote read body.
pub fn decode_read_request(body: &[u8]) -> Result<ReadRequest> {
    decode_compressed(body)
}

/// Builds a remote read response body.
pub fn encode_read_response(results: Vec<QueryResult>) -> Result<Vec<u8>> {
    encode_compressed(&ReadResponse { results })
}

/// Parses a remote read response body into its per-query results.
pub fn decode_read_response(body: &[u8]) -> Result<Vec<QueryResult>> {
    let response: ReadResponse = decode_compressed(body)?;
    Ok(response.results)
}
