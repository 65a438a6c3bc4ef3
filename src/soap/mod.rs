//! SOAP envelope construction and response interpretation.
//!
//! The upstream speaks an RPC-style SOAP dialect:
//!
//! - **`envelope`**: builds the request body for a named operation
//! - **`response`**: turns the upstream reply into a [`RemoteResult`]
//!
//! Replies carry a `return` element whose text is usually a JSON document
//! (with optional `ResultCode`/`ResultMessage` fields) and occasionally plain
//! text, or a `faultstring` element when the call was rejected.

pub mod envelope;
pub mod response;

pub use envelope::{DEFAULT_NAMESPACE, OperationRequest, build_envelope, escape_xml};
pub use response::{FailureKind, RemoteResult, parse_response};
