//! Pure translation between the internal model and the wire messages.
//!
//! Nothing here performs I/O. The adapters in [`crate::pusher`] and
//! [`crate::querier`] are thin async wrappers around these functions.

pub mod read;
pub mod write;

pub use read::{from_query_result, to_query, validate_labels};
pub use write::{
    from_wire_labels, from_wire_write_request, highest_timestamp, to_wire_labels,
    to_wire_write_request,
};
