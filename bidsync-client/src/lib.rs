//! Retrying resource client for the bidsync REST API.
//!
//! The client is split along a transport seam:
//!
//! - [`Transport`] executes one [`ApiRequest`] and reports the raw status
//!   and JSON body. [`HttpTransport`] is the reqwest-backed production
//!   implementation; tests substitute mocks.
//! - [`RetryingClient`] wraps any transport with a fixed attempt budget and
//!   linear backoff, normalizing success to a parsed JSON body.
//! - [`envelope`] decodes the API's `{ success: bool, ... }` response
//!   envelopes into typed outcomes.
//!
//! Application-level rejections (`success: false` with a 2xx status) are a
//! separate failure class from transport errors and are never retried.

pub mod envelope;
mod retry;
mod transport;

pub use envelope::{parse_detail, parse_list, parse_mutation, MutationOutcome};
pub use retry::RetryingClient;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
