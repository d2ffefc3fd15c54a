//! # Media Labeler
//!
//! **A local-first assistant for assigning one label per image or video.**
//!
//! Point it at a directory, define a set of labels, and pick a label for
//! each media file. Assignments are kept in a small JSON document and
//! survive across sessions; the label vocabulary itself is rebuilt at the
//! start of every pass.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌──────────────┐
//! │  Directory   │──▶│  media-labeler-core      │──▶│  JSON file   │
//! │  listing     │   │  Vocabulary · Store ·    │   │  per scope   │
//! │  (walkdir)   │   │  Catalog · Session       │   │  (atomic)    │
//! └──────────────┘   └────────────┬─────────────┘   └──────────────┘
//!                                 ▼
//!                          ┌────────────┐
//!                          │    CLI     │
//!                          │  (mlabel)  │
//!                          └────────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. [`catalog`] lists the directory and keeps files of the requested media type.
//! 2. [`session::open_session`] resolves the scope, loads the document into a
//!    fresh working copy and seeds the vocabulary.
//! 3. Commands mutate the vocabulary and working copy through
//!    [`media_labeler_core::Session`].
//! 4. An explicit save applies a pending rename and commits through
//!    [`json_store::JsonFileBackend`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`catalog`] | Directory listing with exclude globs |
//! | [`json_store`] | Filesystem document backend with atomic replace |
//! | [`session`] | Pass wiring: media type, scope, message output |
//! | [`show`] | `mlabel show`: one page with current labels |
//! | [`labels`] | `mlabel labels`: vocabulary with usage counts |
//! | [`apply`] | `mlabel apply`: mutations, selections and save |
//! | [`stats`] | `mlabel stats`: progress and document overview |
//! | [`export`] | `mlabel export`: files grouped by label as JSON |

pub mod apply;
pub mod catalog;
pub mod config;
pub mod export;
pub mod json_store;
pub mod labels;
pub mod session;
pub mod show;
pub mod stats;

pub use media_labeler_core as core;
