//! Domain models for the Pix client.

pub mod amount;
pub mod key;

pub use amount::{Amount, AmountError};
pub use key::{KeyScheme, is_valid_key};
