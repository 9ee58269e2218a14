use thiserror::Error;

use crate::transport::TransportError;

/// Errors produced by the remote adapters and the wire codec.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Snappy error: {0}")]
    Compression(#[from] snap::Error),

    #[error("remote_write: {0}")]
    RemoteWrite(#[source] TransportError),

    #[error("remote_read: {0}")]
    RemoteRead(#[source] TransportError),

    #[error("to_query: {0}")]
    ToQuery(String),

    #[error("Invalid series in query result: {0}")]
    InvalidSeries(String),

    #[error("Not supported by the remote adapter: {0}")]
    Unsupported(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, RemoteError>;

impl RemoteError {
    /// Creates a new translation error
    pub fn translation<S: Into<String>>(msg: S) -> Self {
        Self::Translation(msg.into())
    }

    /// Creates a new query construction error
    pub fn to_query<S: Into<String>>(msg: S) -> Self {
        Self::ToQuery(msg.into())
    }

    /// Creates a new invalid series error
    pub fn invalid_series<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSeries(msg.into())
    }

    /// Creates a new unsupported operation error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if the error came from the transport rather than the adapter.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RemoteWrite(_) | Self::RemoteRead(_))
    }

    /// Returns the transport error this error wraps, if any.
    pub fn transport_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::RemoteWrite(source) | Self::RemoteRead(source) => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Returns the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Translation(_) => "translation",
            Self::Decode(_) | Self::Compression(_) => "codec",
            Self::RemoteWrite(_) | Self::RemoteRead(_) => "transport",
            Self::ToQuery(_) => "query",
            Self::InvalidSeries(_) => "validation",
            Self::Unsupported(_) => "unsupported",
            Self::Config(_) => "config",
        }
    }
}
