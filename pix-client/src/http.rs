//! Blocking HTTP transport backed by `reqwest`.

use pix_types::{HttpMethod, HttpRequest, HttpResponse, PixTransport, TransportError};
use reqwest::Url;
use reqwest::blocking::Client;

use crate::config::Settings;

/// Default transport: one pooled blocking `reqwest` client bound to the
/// configured base URL and timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http: Client,
}

impl HttpTransport {
    /// Creates a transport for the given settings.
    pub fn new(settings: &Settings) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(classify)?;
        Ok(Self {
            base_url: settings.base_url().clone(),
            http,
        })
    }

    /// Resolves a request against the base URL, percent-encoding each
    /// path segment and query pair.
    fn url_for(&self, request: &HttpRequest) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| TransportError::Http(format!("{} cannot be a base URL", self.base_url)))?;
            segments.pop_if_empty();
            segments.extend(&request.path);
        }
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

impl PixTransport for HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request)?;

        let mut req = match request.method {
            HttpMethod::Get => self.http.get(url.clone()),
            HttpMethod::Post => self.http.post(url.clone()),
        };
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        tracing::debug!(method = ?request.method, %url, "sending Pix request");
        let resp = req.send().map_err(|e| {
            tracing::debug!(method = ?request.method, %url, error = %e, "Pix request failed");
            classify(e)
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(classify)?;
        tracing::debug!(method = ?request.method, %url, status, "received Pix response");

        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_decode() {
        TransportError::MalformedResponse(err.to_string())
    } else {
        TransportError::Http(err.to_string())
    }
}
