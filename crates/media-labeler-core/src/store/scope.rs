//! Scope resolution: which durable document a directory's assignments live in.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::MediaType;

/// Document name for the combined variant, placed in the parent of the
/// labeled directory.
pub const COMBINED_DOCUMENT: &str = "selected_labels_file.json";
/// Fixed document for the image-only variant.
pub const IMAGE_DOCUMENT: &str = "selected_labels_file1.json";
/// Fixed document for the video-only variant.
pub const VIDEO_DOCUMENT: &str = "selected_labels_file_videio.json";

/// Deployment variant, which decides both the allowed media types and how
/// the scope is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Images and videos; one document per parent directory.
    #[default]
    Combined,
    /// Images only; one fixed document for the deployment.
    Image,
    /// Videos only; one fixed document for the deployment.
    Video,
}

impl Variant {
    /// The only media type a single-media variant accepts.
    pub fn fixed_media_type(&self) -> Option<MediaType> {
        match self {
            Variant::Combined => None,
            Variant::Image => Some(MediaType::Image),
            Variant::Video => Some(MediaType::Video),
        }
    }
}

/// Identity of one durable assignment document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope(PathBuf);

impl Scope {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Derive the scope for `directory` under `variant`.
    ///
    /// Single-media variants ignore `directory` and use their fixed document
    /// under `root`. The combined variant uses the directory's parent, so
    /// sibling directories share one document. A path written with a
    /// trailing separator names the parent itself.
    pub fn resolve(variant: Variant, directory: &Path, root: &Path) -> Self {
        match variant {
            Variant::Image => Self(root.join(IMAGE_DOCUMENT)),
            Variant::Video => Self(root.join(VIDEO_DOCUMENT)),
            Variant::Combined => Self(document_dir(directory).join(COMBINED_DOCUMENT)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Everything before the last separator of `directory`.
///
/// A trailing separator keeps the directory itself (`/a/imgs/` gives
/// `/a/imgs`), the same split `dirname` makes.
fn document_dir(directory: &Path) -> &Path {
    let trailing = directory
        .as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator);
    if trailing {
        directory
    } else {
        directory.parent().unwrap_or(directory)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
