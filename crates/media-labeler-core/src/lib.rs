//! # Media Labeler Core
//!
//! The label-assignment persistence and consistency engine behind
//! `mlabel`: the label vocabulary, the per-scope assignment store with its
//! working copy, catalog filtering and pagination, and the [`session::Session`]
//! that ties them together for one pass.
//!
//! This crate performs no filesystem I/O. Directory listings are handed in
//! as plain filenames and durable documents go through the
//! [`store::DocumentBackend`] trait, so the whole engine can be driven from
//! tests with [`store::memory::InMemoryBackend`].

pub mod catalog;
pub mod models;
pub mod session;
pub mod store;
pub mod vocabulary;

pub use catalog::{MediaCatalog, Pagination, DEFAULT_PAGE_SIZE};
pub use models::{Assignments, Image, MediaKind, MediaType, Message, MessageKind, Video, NO_LABEL};
pub use session::{PageEntry, PageView, Session, SessionOptions};
pub use store::{AssignmentStore, DocumentBackend, Scope, StoreError, Variant};
pub use vocabulary::{LabelVocabulary, VocabularyError};
