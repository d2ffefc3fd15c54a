//! Assignment persistence.
//!
//! The [`DocumentBackend`] trait is the key-value persistence contract: it
//! reads and writes one textual document per [`Scope`]. [`AssignmentStore`]
//! layers the load / working copy / commit lifecycle on top of it.
//!
//! # Lifecycle
//!
//! | Step | Method |
//! |------|--------|
//! | Start of a pass, discarding unsaved edits | [`begin_pass`](AssignmentStore::begin_pass) |
//! | Read the pass's mapping | [`working_copy`](AssignmentStore::working_copy) |
//! | Record a selection | [`set_label`](AssignmentStore::set_label) |
//! | Explicit save | [`commit`](AssignmentStore::commit) |
//!
//! Commits replace the whole document (last writer wins). Because the
//! working copy is seeded from a full load, committing from a partial view
//! keeps entries for files outside that view.

pub mod memory;
mod scope;

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::models::{Assignments, NO_LABEL};

pub use scope::{Scope, Variant, COMBINED_DOCUMENT, IMAGE_DOCUMENT, VIDEO_DOCUMENT};

/// Failure to persist a working copy.
///
/// Reads never produce this: a document that cannot be read or parsed
/// degrades to an empty mapping instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode assignments: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {scope}: {source}")]
    Write {
        scope: String,
        #[source]
        source: io::Error,
    },
}

/// Durable storage for assignment documents.
pub trait DocumentBackend {
    /// Read the raw document for `scope`, or `None` if it does not exist.
    fn read(&self, scope: &Scope) -> io::Result<Option<String>>;

    /// Replace the document for `scope` with `contents`.
    fn write(&self, scope: &Scope, contents: &str) -> io::Result<()>;
}

/// Best-effort parse of an assignment document.
///
/// Anything that is not a JSON object degrades to an empty mapping, and
/// entries whose value is not a string are dropped (`null` and a stored
/// [`NO_LABEL`] read as cleared). A damaged document never stops a labeling pass.
pub fn parse_document(contents: &str) -> Assignments {
    let value: serde_json::Value = match serde_json::from_str(contents) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("assignment document is not valid JSON, treating as empty: {}", e);
            return Assignments::new();
        }
    };

    let serde_json::Value::Object(map) = value else {
        log::warn!("assignment document is not a mapping, treating as empty");
        return Assignments::new();
    };

    map.into_iter()
        .filter_map(|(file, label)| match label {
            serde_json::Value::String(s) if s.trim().eq_ignore_ascii_case(NO_LABEL) => {
                Some((file, String::new()))
            }
            serde_json::Value::String(s) => Some((file, s)),
            serde_json::Value::Null => Some((file, String::new())),
            other => {
                log::warn!("dropping non-string label for '{}': {}", file, other);
                None
            }
        })
        .collect()
}

/// Render a mapping the way it is written on commit: a pretty JSON object
/// indented by four spaces, keys sorted.
pub fn format_document(assignments: &Assignments) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    assignments.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// The assignment mapping for one scope plus its in-memory working copy.
#[derive(Debug)]
pub struct AssignmentStore<B> {
    backend: B,
    scope: Scope,
    working: Option<Assignments>,
    dirty: bool,
}

impl<B: DocumentBackend> AssignmentStore<B> {
    pub fn new(backend: B, scope: Scope) -> Self {
        Self {
            backend,
            scope,
            working: None,
            dirty: false,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the durable document fresh. Never fails.
    pub fn load(&self) -> Assignments {
        match self.backend.read(&self.scope) {
            Ok(Some(contents)) => parse_document(&contents),
            Ok(None) => Assignments::new(),
            Err(e) => {
                log::warn!("could not read {}, treating as empty: {}", self.scope, e);
                Assignments::new()
            }
        }
    }

    /// Start a new pass: drop any unsaved edits and reseed from storage.
    pub fn begin_pass(&mut self) -> &Assignments {
        if self.dirty {
            log::info!("discarding unsaved assignments for {}", self.scope);
        }
        self.dirty = false;
        let loaded = self.load();
        self.working.insert(loaded)
    }

    /// The working copy, seeded from [`load`](Self::load) if this pass has
    /// none yet.
    pub fn working_copy(&mut self) -> &Assignments {
        self.working_copy_mut()
    }

    pub(crate) fn working_copy_mut(&mut self) -> &mut Assignments {
        if self.working.is_none() {
            let loaded = self.load();
            self.working = Some(loaded);
        }
        self.working.get_or_insert_with(Assignments::new)
    }

    /// The working copy without seeding it.
    pub fn peek(&self) -> Option<&Assignments> {
        self.working.as_ref()
    }

    /// Label of `filename` in the working copy; cleared and unknown files
    /// both read as `None`.
    pub fn label_of(&self, filename: &str) -> Option<&str> {
        self.working
            .as_ref()
            .and_then(|w| w.get(filename))
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// Upsert `filename` in the working copy. An empty label clears it but
    /// keeps the key.
    pub fn set_label(&mut self, filename: &str, label: &str) {
        let working = self.working_copy_mut();
        let changed = working.get(filename).map(String::as_str) != Some(label);
        working.insert(filename.to_string(), label.to_string());
        if changed {
            self.dirty = true;
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the working copy has edits not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the working copy, replacing the durable document.
    ///
    /// Returns the number of entries written. On failure the working copy
    /// is kept so the caller can retry.
    pub fn commit(&mut self) -> Result<usize, StoreError> {
        let contents = format_document(self.working_copy())?;
        let count = self.peek().map_or(0, |w| w.len());
        self.backend
            .write(&self.scope, &contents)
            .map_err(|source| StoreError::Write {
                scope: self.scope.to_string(),
                source,
            })?;
        self.dirty = false;
        log::info!("committed {} assignments to {}", count, self.scope);
        Ok(count)
    }
}
