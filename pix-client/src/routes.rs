//! Route shapes of the Pix API.
//!
//! The service has been deployed with two route families. Which one a
//! client talks to is pinned in [`Settings`](crate::Settings).

use std::fmt;
use std::str::FromStr;

use pix_types::HttpRequest;

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RouteStyle {
    /// `GET /keys/{key}` and `POST /transactions`.
    #[default]
    Keys,
    /// `GET /search?key={key}` and `POST /transfer`.
    Search,
}

impl RouteStyle {
    /// Builds the key lookup request.
    pub fn lookup(&self, key: &str) -> HttpRequest {
        match self {
            RouteStyle::Keys => HttpRequest::get(["keys", key]),
            RouteStyle::Search => HttpRequest::get(["search"]).with_query("key", key),
        }
    }

    /// Builds the transfer submission request.
    pub fn transfer(&self, body: serde_json::Value) -> HttpRequest {
        match self {
            RouteStyle::Keys => HttpRequest::post_json(["transactions"], body),
            RouteStyle::Search => HttpRequest::post_json(["transfer"], body),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStyle::Keys => "keys",
            RouteStyle::Search => "search",
        }
    }
}

impl FromStr for RouteStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keys" => Ok(RouteStyle::Keys),
            "search" => Ok(RouteStyle::Search),
            _ => Err(ConfigError::UnknownRouteStyle(s.to_string())),
        }
    }
}

impl fmt::Display for RouteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pix_types::HttpMethod;

    #[test]
    fn test_keys_style() {
        let req = RouteStyle::Keys.lookup("ana@example.com");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, vec!["keys", "ana@example.com"]);
        assert!(req.query.is_empty());

        let req = RouteStyle::Keys.transfer(serde_json::json!({}));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path_string(), "/transactions");
    }

    #[test]
    fn test_search_style() {
        let req = RouteStyle::Search.lookup("12345678901");
        assert_eq!(req.path_string(), "/search");
        assert_eq!(req.query, vec![("key".to_string(), "12345678901".to_string())]);

        let req = RouteStyle::Search.transfer(serde_json::json!({}));
        assert_eq!(req.path_string(), "/transfer");
    }

    #[test]
    fn test_parse() {
        assert_eq!("keys".parse::<RouteStyle>().unwrap(), RouteStyle::Keys);
        assert_eq!(" Search ".parse::<RouteStyle>().unwrap(), RouteStyle::Search);
        assert!("rest".parse::<RouteStyle>().is_err());
    }
}
