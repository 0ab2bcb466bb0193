//! Content-addressed cache keys.

use std::collections::BTreeMap;
use std::fmt::Display;

use sha2::{Digest, Sha256};

use crate::types::CompletionOptions;

/// Length of a cache key in hex characters.
pub const KEY_LEN: usize = 16;

/// Builds a deterministic digest over named fields.
///
/// Fields are sorted by name before hashing, so the order in which they
/// are added does not affect the key. Each field is length-prefixed to keep
/// `("ab", "c")` and `("a", "bc")` apart.
///
/// ```rust
/// # use eventsmith::cache::KeyBuilder;
/// let a = KeyBuilder::new().field("model", "gpt-4").field("temperature", 0.7).finish();
/// let b = KeyBuilder::new().field("temperature", 0.7).field("model", "gpt-4").finish();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    fields: BTreeMap<String, String>,
}

impl KeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a named field.
    pub fn field(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.fields.insert(name.into(), value.to_string());
        self
    }

    /// Hash the fields into a fixed-length, filename-safe hex key.
    pub fn finish(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, value) in &self.fields {
            hasher.update(name.len().to_le_bytes());
            hasher.update(name.as_bytes());
            hasher.update(value.len().to_le_bytes());
            hasher.update(value.as_bytes());
        }
        let mut key = hex::encode(hasher.finalize());
        key.truncate(KEY_LEN);
        key
    }
}

/// Key for a completion: both prompt parts, output bound, temperature and model.
pub fn completion_key(system: &str, user: &str, options: &CompletionOptions) -> String {
    KeyBuilder::new()
        .field("system", system)
        .field("user", user)
        .field("max_tokens", options.max_tokens)
        .field("temperature", options.temperature)
        .field("model", &options.model)
        .finish()
}
