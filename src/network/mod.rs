//! Network layer - typed API client over a pluggable transport
//!
//! The store talks to [`ApiClient`]; [`HttpTransport`] puts the requests
//! on the wire.

pub mod client;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use client::ApiClient;
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
