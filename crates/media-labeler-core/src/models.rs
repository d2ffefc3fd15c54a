//! Core data types shared by the labeling engine.
//!
//! These types describe the media kinds a catalog can hold, the assignment
//! mapping persisted per scope, and the message signals reported back to
//! whatever surface drives a session.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Filename → label mapping for one scope.
///
/// An empty string value means the file was explicitly cleared; a missing
/// key means it was never labeled. Both read back as "unlabeled".
pub type Assignments = BTreeMap<String, String>;

/// Selection value that clears a file's label.
pub const NO_LABEL: &str = "NO LABEL";

pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".bmp"];
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".mkv"];

/// A kind of media the catalog can enumerate.
///
/// Implementors only describe which filenames belong to them; listing and
/// pagination are shared (see [`crate::catalog`]).
pub trait MediaKind {
    /// Singular lowercase name, e.g. `"image"`.
    fn name(&self) -> &'static str;

    /// Plural lowercase name used in messages, e.g. `"images"`.
    fn plural(&self) -> &'static str;

    /// Recognised filename suffixes, lowercase and including the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Case-insensitive suffix match against [`extensions`](MediaKind::extensions).
    fn matches(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        self.extensions().iter().any(|ext| lower.ends_with(ext))
    }
}

/// Still images.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

/// Video files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Video;

impl MediaKind for Image {
    fn name(&self) -> &'static str {
        "image"
    }

    fn plural(&self) -> &'static str {
        "images"
    }

    fn extensions(&self) -> &'static [&'static str] {
        IMAGE_EXTENSIONS
    }
}

impl MediaKind for Video {
    fn name(&self) -> &'static str {
        "video"
    }

    fn plural(&self) -> &'static str {
        "videos"
    }

    fn extensions(&self) -> &'static [&'static str] {
        VIDEO_EXTENSIONS
    }
}

/// Serializable selector for a [`MediaKind`], used by config and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    pub fn kind(&self) -> &'static dyn MediaKind {
        match self {
            MediaType::Image => &Image,
            MediaType::Video => &Video,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}

/// Severity of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A user-facing signal raised during a pass.
///
/// Validation failures never propagate as errors; they become warnings here
/// and the operation is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_matches_case_insensitively() {
        assert!(Image.matches("a.JPG"));
        assert!(Image.matches("b.jpeg"));
        assert!(Image.matches("c.Bmp"));
        assert!(!Image.matches("d.mp4"));
        assert!(!Image.matches("png"));
    }

    #[test]
    fn test_video_matches_case_insensitively() {
        assert!(Video.matches("clip.MKV"));
        assert!(Video.matches("clip.mov"));
        assert!(!Video.matches("clip.gif"));
    }

    #[test]
    fn test_media_type_dispatch() {
        assert_eq!(MediaType::Image.kind().plural(), "images");
        assert_eq!(MediaType::Video.kind().name(), "video");
        assert_eq!(MediaType::Video.to_string(), "video");
    }
}
