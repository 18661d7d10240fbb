//! Port traits (interfaces for adapters).
//!
//! The client depends on these traits, not on a concrete HTTP library.

mod transport;

pub use transport::{HttpMethod, HttpRequest, HttpResponse, PixTransport, TransportError};
