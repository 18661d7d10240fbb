//! # Pix Client SDK
//!
//! A typed, blocking Rust client for a Pix key directory and transfer API.
//!
//! ```no_run
//! use pix_client::{PixClient, Settings};
//! use pix_types::TransferRequest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PixClient::new(Settings::from_env()?)?;
//! let info = client.lookup_key("ana@example.com")?;
//! println!("{} at {}", info.account_name, info.bank);
//!
//! let req = TransferRequest::new("772384558", "ana@example.com", "10.00".parse()?)
//!     .with_idempotency_key("order-42");
//! let result = client.transfer(req)?;
//! println!("tx {}", result.tx_id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod routes;

pub use config::{ConfigError, Settings};
pub use http::HttpTransport;
pub use routes::RouteStyle;

use pix_types::{
    HttpResponse, KeyInfo, KeyScheme, LookupResponse, PixError, PixTransport, TransferRequest,
    TransferResponse, TransferResult, TransferStatus, TransportError, is_valid_key,
};
use serde::de::DeserializeOwned;

/// Error type for client operations.
///
/// `Pix` is a domain outcome the caller can act on; `Transport` means the
/// service could not be reached or answered unintelligibly.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Pix(#[from] PixError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Returns the Pix taxonomy error, if this is one.
    pub fn as_pix(&self) -> Option<&PixError> {
        match self {
            ClientError::Pix(err) => Some(err),
            ClientError::Transport(_) => None,
        }
    }
}

/// Pix API client.
///
/// Owns its transport for its whole lifetime; dropping the client releases
/// it. Every call is attempted exactly once.
pub struct PixClient<T = HttpTransport> {
    settings: Settings,
    transport: T,
}

impl PixClient<HttpTransport> {
    /// Creates a client backed by the default HTTP transport.
    pub fn new(settings: Settings) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&settings)?;
        Ok(Self::with_transport(settings, transport))
    }
}

impl<T: PixTransport> PixClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn with_transport(settings: Settings, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves a Pix key to the account behind it.
    ///
    /// Malformed keys are rejected with [`PixError::InvalidKeyFormat`]
    /// before any request is sent.
    pub fn lookup_key(&self, key: &str) -> Result<KeyInfo, ClientError> {
        if !is_valid_key(key) {
            return Err(PixError::InvalidKeyFormat(key.to_string()).into());
        }
        self.resolve_key(key)
    }

    /// Transfers money to the account behind `req.destination_key`.
    ///
    /// The recipient key is looked up first; the transfer is only submitted
    /// once the service has confirmed the key exists.
    pub fn transfer(&self, req: TransferRequest) -> Result<TransferResult, ClientError> {
        self.resolve_key(&req.destination_key)?;

        let body = serde_json::to_value(&req)
            .map_err(|e| TransportError::Http(format!("failed to encode transfer: {e}")))?;
        let resp = self.transport.send(self.settings.routes().transfer(body))?;

        if resp.status >= 400 {
            return Err(PixError::TransferFailed(resp.body).into());
        }
        let wire: TransferResponse = decode(expect_success(resp)?)?;
        Ok(transfer_result(req, wire)?)
    }

    fn resolve_key(&self, key: &str) -> Result<KeyInfo, ClientError> {
        let resp = self.transport.send(self.settings.routes().lookup(key))?;

        if resp.status == 404 {
            return Err(PixError::KeyNotFound(key.to_string()).into());
        }
        let wire: LookupResponse = decode(expect_success(resp)?)?;

        if let Some(echoed) = &wire.key {
            if !same_key(echoed, key) {
                return Err(TransportError::MalformedResponse(format!(
                    "lookup for {key} returned key {echoed}"
                ))
                .into());
            }
        }
        Ok(KeyInfo {
            key: key.to_string(),
            account_name: wire.account_name,
            bank: wire.bank,
        })
    }
}

/// Emails are compared ignoring ASCII case, since the service may normalize
/// them; every other scheme must match exactly.
fn same_key(echoed: &str, requested: &str) -> bool {
    echoed == requested
        || (KeyScheme::detect(requested) == Some(KeyScheme::Email)
            && echoed.eq_ignore_ascii_case(requested))
}

fn expect_success(resp: HttpResponse) -> Result<HttpResponse, TransportError> {
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(TransportError::UnexpectedStatus {
            status: resp.status,
            body: resp.body,
        })
    }
}

fn decode<W: DeserializeOwned>(resp: HttpResponse) -> Result<W, TransportError> {
    serde_json::from_str(&resp.body).map_err(|e| TransportError::MalformedResponse(e.to_string()))
}

fn transfer_result(
    req: TransferRequest,
    wire: TransferResponse,
) -> Result<TransferResult, TransportError> {
    if wire.status == TransferStatus::Success && wire.tx_id.trim().is_empty() {
        return Err(TransportError::MalformedResponse(
            "successful transfer without a transaction id".to_string(),
        ));
    }
    Ok(TransferResult {
        recipient: wire.recipient.unwrap_or(req.destination_key),
        sender: wire.sender.unwrap_or(req.source_account),
        tx_id: wire.tx_id,
        amount: wire.amount.unwrap_or(req.amount),
        status: wire.status,
        created_at: wire.created_at,
    })
}
