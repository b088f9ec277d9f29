// SPDX-License-Identifier: MIT OR Apache-2.0
//! Session context: the variable bindings active for a graph session.
//!
//! The context is always passed explicitly to consumers (no global
//! session state), so traversal and resolution stay testable in
//! isolation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key-value store of session variables
///
/// Variables are referenced from plug values as `${NAME}` placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    vars: IndexMap<String, String>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous binding
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set)
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Remove a variable, returning its value if it was bound
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.shift_remove(name)
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the context has no bindings
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
