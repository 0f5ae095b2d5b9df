// SPDX-License-Identifier: GPL-3.0-or-later

//! Query-string encoding for search requests.
//!
//! Scalars become a single value and are dropped when their text is empty.
//! Lists keep their non-empty elements and are dropped when none remain.

use std::fmt::Display;
use url::form_urlencoded;

/// Ordered query parameters; a key may carry several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(&'static str, Vec<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-valued parameter. `None` and empty text are skipped.
    pub fn push_scalar<T: Display>(&mut self, key: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            let text = value.to_string();
            if !text.is_empty() {
                self.entries.push((key, vec![text]));
            }
        }
        self
    }

    /// Add a multi-valued parameter, dropping empty elements.
    pub fn push_list<I, T>(&mut self, key: &'static str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.to_string())
            .filter(|v| !v.is_empty())
            .collect();

        if !values.is_empty() {
            self.entries.push((key, values));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into `(key, value)` pairs, repeating the key for each value.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (*k, v.as_str())))
    }

    /// Encode as `key=value&key=value` with form escaping.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}
