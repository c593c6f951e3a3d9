//! Request header sets with override merging.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Browser-like User-Agent sent by default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Default Accept-Language (Portuguese first, English fallback).
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "pt-PT,pt;q=0.9,en;q=0.8";

/// A mapping from header name to value.
///
/// Names keep the casing they were inserted with, but lookups and merges
/// compare them case-insensitively, as HTTP does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSet {
    entries: BTreeMap<String, String>,
}

impl HeaderSet {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The browser-like headers every request starts from.
    pub fn browser_defaults() -> Self {
        Self::new()
            .with("User-Agent", DEFAULT_USER_AGENT)
            .with("Accept-Language", DEFAULT_ACCEPT_LANGUAGE)
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a header, replacing any existing entry with the same name
    /// regardless of case.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(existing) = self.key_for(&name) {
            self.entries.remove(&existing);
        }
        self.entries.insert(name, value.into());
    }

    /// Looks up a header value by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a new set with `overrides` applied on top of `self`.
    ///
    /// Colliding names take the override's value; everything else in `self`
    /// is preserved.
    pub fn merge(&self, overrides: Option<&HeaderSet>) -> HeaderSet {
        let mut merged = self.clone();
        if let Some(overrides) = overrides {
            for (name, value) in overrides.iter() {
                merged.insert(name, value);
            }
        }
        merged
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key_for(&self, name: &str) -> Option<String> {
        self.entries.keys().find(|k| k.eq_ignore_ascii_case(name)).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}
