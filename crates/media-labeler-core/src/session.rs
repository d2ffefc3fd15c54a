//! One labeling pass, held as explicit state.
//!
//! A [`Session`] is created at the start of every interaction. It reloads the
//! assignment document into a fresh working copy, seeds the vocabulary,
//! accepts vocabulary mutations and per-file selections, and commits on an
//! explicit [`save`](Session::save). Anything not saved is discarded with the
//! session.
//!
//! Every outcome is reported as a [`Message`]; only a failed commit is also
//! returned as an error.

use serde::Serialize;

use crate::catalog::MediaCatalog;
use crate::models::{Message, NO_LABEL};
use crate::store::{format_document, AssignmentStore, DocumentBackend, StoreError};
use crate::vocabulary::{same_label, LabelVocabulary};

/// How a session seeds its vocabulary and treats label input.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Labels added at the start of every pass.
    pub initial_labels: Vec<String>,
    /// Also add every distinct label found in the loaded document.
    pub infer_from_document: bool,
    /// Lowercase label text before adding or renaming.
    pub lowercase_input: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_labels: Vec::new(),
            infer_from_document: true,
            lowercase_input: false,
        }
    }
}

/// A visible file and its working-copy label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub filename: String,
    pub label: Option<String>,
}

/// What the collaborator shows for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub entries: Vec<PageEntry>,
}

/// Label usage across the working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Each vocabulary label and how many document entries carry it.
    pub usage: Vec<(String, usize)>,
    /// Values in the document that are not in the vocabulary.
    pub stale: Vec<(String, usize)>,
    /// Entries in the backing document.
    pub document_entries: usize,
    /// Catalog files with a label.
    pub labeled: usize,
    /// Catalog files without one.
    pub unlabeled: usize,
}

#[derive(Debug)]
pub struct Session<B> {
    catalog: MediaCatalog,
    vocabulary: LabelVocabulary,
    store: AssignmentStore<B>,
    choices: Vec<String>,
    messages: Vec<Message>,
    lowercase_input: bool,
}

impl<B: DocumentBackend> Session<B> {
    /// Start a pass over `catalog`, reloading `store` from storage.
    pub fn begin(mut store: AssignmentStore<B>, catalog: MediaCatalog, options: SessionOptions) -> Self {
        store.begin_pass();

        let mut vocabulary = LabelVocabulary::new();
        for label in &options.initial_labels {
            if let Err(e) = vocabulary.add(label) {
                log::debug!("skipping initial label '{}': {}", label, e);
            }
        }
        if options.infer_from_document {
            if let Some(working) = store.peek() {
                for value in working.values() {
                    if !value.trim().is_empty() && !vocabulary.contains(value) {
                        let _ = vocabulary.add(value);
                    }
                }
            }
        }

        let mut messages = Vec::new();
        if catalog.is_empty() {
            messages.push(Message::info(format!(
                "No {} present in this directory.",
                catalog.media_type().kind().plural()
            )));
        }

        log::debug!(
            "session: {} {} in catalog, {} labels, scope {}",
            catalog.len(),
            catalog.media_type().kind().plural(),
            vocabulary.len(),
            store.scope()
        );

        Self {
            catalog,
            vocabulary,
            store,
            choices: Vec::new(),
            messages,
            lowercase_input: options.lowercase_input,
        }
    }

    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &LabelVocabulary {
        &self.vocabulary
    }

    pub fn store(&self) -> &AssignmentStore<B> {
        &self.store
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drain the messages raised so far.
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    fn normalize(&self, input: &str) -> String {
        if self.lowercase_input {
            input.to_lowercase()
        } else {
            input.to_string()
        }
    }

    fn warn(&mut self, text: impl Into<String>) {
        let message = Message::warning(text);
        log::debug!("warning: {}", message);
        self.messages.push(message);
    }

    pub fn add_label(&mut self, name: &str) -> bool {
        let input = self.normalize(name);
        match self.vocabulary.add(&input) {
            Ok(stored) => {
                let text = format!("Label '{}' added.", stored);
                self.messages.push(Message::success(text));
                true
            }
            Err(e) => {
                self.warn(e.to_string());
                false
            }
        }
    }

    /// Remove a label unless any entry in the working copy still uses it.
    pub fn remove_label(&mut self, name: &str) -> bool {
        let values = self
            .store
            .peek()
            .into_iter()
            .flat_map(|w| w.values().map(String::as_str));
        match self.vocabulary.remove(name, values) {
            Ok(removed) => {
                self.choices.retain(|c| !same_label(c, &removed));
                self.messages
                    .push(Message::success(format!("Label '{}' removed.", removed)));
                true
            }
            Err(e) => {
                self.warn(e.to_string());
                false
            }
        }
    }

    /// Rename a label and rewrite the working copy in the same step.
    pub fn rename_label(&mut self, old_name: &str, new_name: &str) -> bool {
        let new_name = self.normalize(new_name);
        let working = self.store.working_copy_mut();
        match self.vocabulary.rename(old_name, &new_name, working) {
            Ok(rewritten) => {
                if rewritten > 0 {
                    self.store.mark_dirty();
                }
                let new_name = new_name.trim();
                for choice in self.choices.iter_mut() {
                    if same_label(choice, old_name) {
                        *choice = new_name.to_string();
                    }
                }
                self.messages.push(Message::success(format!(
                    "Label '{}' renamed to '{}'.",
                    old_name.trim(),
                    new_name
                )));
                true
            }
            Err(e) => {
                self.warn(e.to_string());
                false
            }
        }
    }

    /// Restrict the labels a selection may use. An empty list offers the
    /// whole vocabulary plus [`NO_LABEL`].
    pub fn set_choices<S: AsRef<str>>(&mut self, labels: &[S]) {
        self.choices.clear();
        for label in labels {
            let label = label.as_ref().trim();
            let resolved = if label.eq_ignore_ascii_case(NO_LABEL) {
                Some(NO_LABEL.to_string())
            } else {
                self.vocabulary.find(label).map(str::to_string)
            };
            match resolved {
                Some(choice) if !self.choices.contains(&choice) => self.choices.push(choice),
                Some(_) => {}
                None => self.warn(format!("Label '{}' does not exist.", label)),
            }
        }
    }

    /// Labels currently offered for selection.
    pub fn offered(&self) -> Vec<String> {
        if self.choices.is_empty() {
            std::iter::once(NO_LABEL.to_string())
                .chain(self.vocabulary.labels().iter().cloned())
                .collect()
        } else {
            self.choices.clone()
        }
    }

    fn is_offered(&self, choice: &str) -> bool {
        self.choices.is_empty() || self.choices.iter().any(|c| same_label(c, choice))
    }

    /// Record the label chosen for a visible file. An empty label or
    /// [`NO_LABEL`] clears it.
    pub fn select(&mut self, filename: &str, label: &str) -> bool {
        if !self.catalog.contains(filename) {
            let plural = self.catalog.media_type().kind().plural();
            self.warn(format!("'{}' is not one of the {} in this directory.", filename, plural));
            return false;
        }

        let label = label.trim();
        let clearing = label.is_empty() || label.eq_ignore_ascii_case(NO_LABEL);
        let value = if clearing {
            if !self.is_offered(NO_LABEL) {
                self.warn(format!("'{}' is not among the chosen labels.", NO_LABEL));
                return false;
            }
            String::new()
        } else {
            let Some(stored) = self.vocabulary.find(label).map(str::to_string) else {
                self.warn(format!("Label '{}' does not exist.", label));
                return false;
            };
            if !self.is_offered(&stored) {
                self.warn(format!("Label '{}' is not among the chosen labels.", stored));
                return false;
            }
            stored
        };

        self.store.set_label(filename, &value);
        true
    }

    pub fn label_of(&self, filename: &str) -> Option<&str> {
        self.store.label_of(filename)
    }

    /// The page to display, with `page` clamped into range.
    pub fn page_view(&self, page: usize) -> PageView {
        let pagination = self.catalog.pagination();
        let page = pagination.clamp_page(page);
        let entries = self
            .catalog
            .page(page)
            .iter()
            .map(|filename| PageEntry {
                filename: filename.clone(),
                label: self.label_of(filename).map(str::to_string),
            })
            .collect();
        PageView {
            page,
            total_pages: pagination.total_pages,
            total_items: pagination.total_items,
            entries,
        }
    }

    pub fn summary(&self) -> Summary {
        let Some(working) = self.store.peek() else {
            return Summary {
                unlabeled: self.catalog.len(),
                ..Summary::default()
            };
        };

        let usage = self
            .vocabulary
            .labels()
            .iter()
            .map(|label| {
                let count = working.values().filter(|v| same_label(v, label)).count();
                (label.clone(), count)
            })
            .collect();

        let mut stale: Vec<(String, usize)> = Vec::new();
        for value in working.values() {
            if value.is_empty() || self.vocabulary.contains(value) {
                continue;
            }
            match stale.iter_mut().find(|(name, _)| name == value) {
                Some((_, count)) => *count += 1,
                None => stale.push((value.clone(), 1)),
            }
        }

        let labeled = self
            .catalog
            .items()
            .iter()
            .filter(|f| self.label_of(f).is_some())
            .count();

        Summary {
            usage,
            stale,
            document_entries: working.len(),
            labeled,
            unlabeled: self.catalog.len() - labeled,
        }
    }

    fn apply_pending_rename(&mut self, rename: Option<(&str, &str)>) {
        if let Some((old_name, new_name)) = rename {
            self.rename_label(old_name, new_name);
        }
    }

    /// Explicit save: apply a pending rename, then commit the working copy.
    ///
    /// A rejected rename is reported but does not block the commit.
    pub fn save(&mut self, rename: Option<(&str, &str)>) -> Result<usize, StoreError> {
        self.apply_pending_rename(rename);
        match self.store.commit() {
            Ok(count) => {
                self.messages
                    .push(Message::success("Changes saved successfully."));
                Ok(count)
            }
            Err(e) => {
                self.messages
                    .push(Message::error(format!("Failed to save changes: {}", e)));
                Err(e)
            }
        }
    }

    /// Like [`save`](Self::save) but returns the document that would be
    /// written instead of committing it.
    pub fn preview_save(&mut self, rename: Option<(&str, &str)>) -> Result<String, StoreError> {
        self.apply_pending_rename(rename);
        Ok(format_document(self.store.working_copy_mut())?)
    }
}
