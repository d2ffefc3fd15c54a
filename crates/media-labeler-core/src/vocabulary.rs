//! The ordered set of valid label names.
//!
//! Labels are compared case-insensitively (after trimming) but stored with
//! the casing the user typed. The vocabulary is session-local: it is never
//! persisted, only the assignments that reference it are.
//!
//! Removal is guarded against active references so assignments are never
//! orphaned by it. Rename is the one operation that cascades into the
//! assignment mapping, and it validates everything before touching either
//! side so the two can never disagree.

use thiserror::Error;

use crate::models::{Assignments, NO_LABEL};

/// Why a vocabulary mutation was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("Please enter a valid label.")]
    Empty,

    #[error("Label '{0}' already exists.")]
    Duplicate(String),

    #[error("Label '{0}' does not exist.")]
    Missing(String),

    #[error("There are some items labeled with \"{0}\".")]
    Referenced(String),

    #[error("'{0}' is reserved for clearing a label.")]
    Reserved(String),
}

/// Case-insensitive label identity.
pub fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|l| same_label(l, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// The stored spelling of `name`, if present.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.labels[i].as_str())
    }

    /// Append `name` unless it is blank or already present.
    pub fn add(&mut self, name: &str) -> Result<&str, VocabularyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VocabularyError::Empty);
        }
        if same_label(name, NO_LABEL) {
            return Err(VocabularyError::Reserved(name.to_string()));
        }
        if self.contains(name) {
            return Err(VocabularyError::Duplicate(name.to_string()));
        }
        self.labels.push(name.to_string());
        log::debug!("vocabulary: added '{}'", name);
        Ok(&self.labels[self.labels.len() - 1])
    }

    /// Remove `name` unless some assignment value still refers to it.
    ///
    /// Returns the stored spelling of the removed label.
    pub fn remove<'a, I>(&mut self, name: &str, assignment_values: I) -> Result<String, VocabularyError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if name.trim().is_empty() {
            return Err(VocabularyError::Empty);
        }
        let index = self
            .position(name)
            .ok_or_else(|| VocabularyError::Missing(name.trim().to_string()))?;

        let stored = &self.labels[index];
        if assignment_values.into_iter().any(|v| same_label(v, stored)) {
            return Err(VocabularyError::Referenced(stored.clone()));
        }

        let removed = self.labels.remove(index);
        log::debug!("vocabulary: removed '{}'", removed);
        Ok(removed)
    }

    /// Replace `old_name` with `new_name` in place and rewrite every
    /// assignment that carried `old_name`.
    ///
    /// `new_name` may differ from `old_name` only by case. Returns the number
    /// of rewritten assignments.
    pub fn rename(
        &mut self,
        old_name: &str,
        new_name: &str,
        assignments: &mut Assignments,
    ) -> Result<usize, VocabularyError> {
        let index = self
            .position(old_name)
            .ok_or_else(|| VocabularyError::Missing(old_name.trim().to_string()))?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(VocabularyError::Empty);
        }
        if same_label(new_name, NO_LABEL) {
            return Err(VocabularyError::Reserved(new_name.to_string()));
        }
        if let Some(other) = self.position(new_name) {
            if other != index {
                return Err(VocabularyError::Duplicate(new_name.to_string()));
            }
        }

        let old = std::mem::replace(&mut self.labels[index], new_name.to_string());
        let mut rewritten = 0;
        for value in assignments.values_mut() {
            if same_label(value, &old) {
                *value = new_name.to_string();
                rewritten += 1;
            }
        }
        log::debug!(
            "vocabulary: renamed '{}' to '{}' ({} assignments)",
            old,
            new_name,
            rewritten
        );
        Ok(rewritten)
    }
}
