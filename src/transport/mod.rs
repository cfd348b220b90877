//! Transport - The injected HTTP capability behind all remote operations.
//!
//! The library never performs I/O itself. Consumers wire a real client
//! (reqwest, a test double, a mock server) by implementing [`HttpClient`];
//! managers only see the envelope that comes back.

mod client;

pub use client::{HttpClient, HttpRequest, Method, TransportError};
