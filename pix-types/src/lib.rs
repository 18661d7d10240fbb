//! # Pix Types
//!
//! Domain types and port traits for the Pix client.
//! This crate has ZERO IO dependencies - only data structures,
//! key validation rules, and trait definitions.
//!
//! ## Layout
//!
//! - `domain/` - Pure domain types (payment keys, amounts)
//! - `dto/` - Request/response shapes exchanged with the Pix service
//! - `error/` - The Pix error taxonomy
//! - `ports/` - The transport trait that HTTP adapters implement

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Amount, AmountError, KeyScheme, is_valid_key};
pub use dto::*;
pub use error::PixError;
pub use ports::{HttpMethod, HttpRequest, HttpResponse, PixTransport, TransportError};
