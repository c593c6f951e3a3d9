//! Request/response inspection against an httpbin-style echo endpoint.

use crate::http::HeaderSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of a `GET /get` echo: what the server saw of our request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    /// Client address; proxies may append more, comma-separated.
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub args: BTreeMap<String, serde_json::Value>,
}

/// Comparison of one header we sent with what the server received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCheck {
    pub name: String,
    pub sent: String,
    pub received: Option<String>,
    pub matches: bool,
}

impl Echo {
    /// First address of `origin`, trimmed.
    pub fn normalized_origin(&self) -> &str {
        self.origin.split(',').next().unwrap_or_default().trim()
    }

    /// Header value as echoed by the server (name compared case-insensitively).
    pub fn received(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Checks each sent header against the echo.
    pub fn verify(&self, sent: &HeaderSet) -> Vec<HeaderCheck> {
        sent.iter()
            .map(|(name, value)| {
                let received = self.received(name).map(String::from);
                HeaderCheck {
                    name: name.to_string(),
                    sent: value.to_string(),
                    matches: received.as_deref() == Some(value),
                    received,
                }
            })
            .collect()
    }
}
