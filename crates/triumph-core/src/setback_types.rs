//! Setback categories.
//!
//! The built-in labels are fixed and cannot be removed. User labels are kept
//! in insertion order and deduplicated case-insensitively against every
//! existing label, so "stress" and "Stress" resolve to the same category.

use crate::error::{ProtectedTypeError, ValidationError};

/// Built-in setback categories, in display order.
pub const DEFAULT_SETBACK_TYPES: [&str; 5] = ["Stress", "Boredom", "Social", "Craving", "Other"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetbackTypeRegistry {
    custom: Vec<String>,
}

impl SetbackTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted custom list. Blank labels and labels that
    /// collide with an earlier one are dropped.
    pub fn with_custom<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for label in labels {
            let _ = registry.add(label.as_ref());
        }
        registry
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Defaults followed by custom labels.
    pub fn list(&self) -> Vec<String> {
        DEFAULT_SETBACK_TYPES
            .iter()
            .map(|s| s.to_string())
            .chain(self.custom.iter().cloned())
            .collect()
    }

    pub fn is_default(label: &str) -> bool {
        let label = label.trim().to_lowercase();
        DEFAULT_SETBACK_TYPES
            .iter()
            .any(|d| d.to_lowercase() == label)
    }

    /// Canonical spelling of `label` if it is registered.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let wanted = label.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        DEFAULT_SETBACK_TYPES
            .iter()
            .copied()
            .chain(self.custom.iter().map(String::as_str))
            .find(|existing| existing.to_lowercase() == wanted)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.resolve(label).is_some()
    }

    /// Register `label`, returning the canonical label to use.
    ///
    /// The boolean is `true` when the registry grew.
    pub fn add(&mut self, label: &str) -> Result<(String, bool), ValidationError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "type" });
        }
        if let Some(existing) = self.resolve(trimmed) {
            return Ok((existing.to_string(), false));
        }
        self.custom.push(trimmed.to_string());
        Ok((trimmed.to_string(), true))
    }

    /// Remove a custom label. Returns the removed canonical label, or `None`
    /// when nothing matched.
    pub fn remove(&mut self, label: &str) -> Result<Option<String>, ProtectedTypeError> {
        if Self::is_default(label) {
            return Err(ProtectedTypeError(label.trim().to_string()));
        }
        let wanted = label.trim().to_lowercase();
        let pos = self.custom.iter().position(|c| c.to_lowercase() == wanted);
        Ok(pos.map(|p| self.custom.remove(p)))
    }
}
