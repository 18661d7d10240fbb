//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Amount;

// ─────────────────────────────────────────────────────────────────────────────
// Key lookup DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Resolved identity behind a Pix key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// The key that was looked up
    pub key: String,
    /// Display name of the account holder
    pub account_name: String,
    /// Bank holding the account
    pub bank: String,
}

/// Body of a successful key lookup, as sent by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    /// Echo of the requested key; older revisions omit it
    #[serde(default)]
    pub key: Option<String>,
    #[serde(alias = "name")]
    pub account_name: String,
    pub bank: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transfer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to transfer money to the account behind a Pix key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Sender account identifier
    pub source_account: String,
    /// Recipient Pix key
    pub destination_key: String,
    pub amount: Amount,
    /// Optional idempotency key so retried submissions are deduplicated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl TransferRequest {
    /// Creates a transfer request without an idempotency key.
    pub fn new(
        source_account: impl Into<String>,
        destination_key: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            source_account: source_account.into(),
            destination_key: destination_key.into(),
            amount,
            idempotency_key: None,
        }
    }

    /// Sets the idempotency key.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// Status of a transfer as reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    #[default]
    Success,
    #[serde(alias = "FAILURE")]
    Failed,
}

/// Outcome of a transfer accepted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    /// Recipient Pix key
    pub recipient: String,
    /// Sender account identifier
    pub sender: String,
    /// Transaction identifier assigned by the service
    pub tx_id: String,
    pub amount: Amount,
    pub status: TransferStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a successful transfer submission, as sent by the service.
///
/// Only `tx_id` is mandatory for a successful transfer. The remaining fields
/// fall back to the values of the submitted [`TransferRequest`].
#[derive(Debug, Clone, Deserialize)]
pub struct TransferResponse {
    #[serde(default, alias = "transaction_id")]
    pub tx_id: String,
    #[serde(default)]
    pub status: TransferStatus,
    /// RFC 3339, or a naive timestamp read as UTC; unparseable text is dropped
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "source_account")]
    pub sender: Option<String>,
    #[serde(default, alias = "destination_key")]
    pub recipient: Option<String>,
    #[serde(default, alias = "value")]
    pub amount: Option<Amount>,
}

/// Parses a service timestamp.
///
/// Accepts RFC 3339 first, then offset-less `YYYY-MM-DDTHH:MM:SS[.f]` (with
/// `T` or a space) interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

// `created_at` is informational: a settled transfer must not be reported as
// undecodable because of its timestamp. Non-string values are still rejected.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
