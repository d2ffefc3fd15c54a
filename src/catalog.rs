//! Directory listing for the media catalog.
//!
//! Lists the direct entries of a directory in the order the filesystem
//! returns them (no sorting), drops subdirectories and excluded names, and
//! keeps the names whose extension matches the requested media kind.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use media_labeler_core::{MediaCatalog, MediaKind, MediaType, Message};
use std::path::Path;
use walkdir::WalkDir;

use crate::config::CatalogConfig;

/// Names of the files directly inside `directory` that match `kind`.
pub fn list_matching(directory: &Path, kind: &dyn MediaKind, config: &CatalogConfig) -> Result<Vec<String>> {
    if !directory.is_dir() {
        bail!("Directory does not exist: {}", directory.display());
    }

    let exclude_set = build_globset(&config.exclude_globs)?;

    let mut names = Vec::new();
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(config.follow_symlinks);
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to list {}", directory.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if exclude_set.is_match(&name) {
            continue;
        }
        if kind.matches(&name) {
            names.push(name);
        }
    }

    log::debug!(
        "listed {} {} in {}",
        names.len(),
        kind.plural(),
        directory.display()
    );
    Ok(names)
}

/// Build the catalog for one pass.
///
/// A listing failure does not abort the pass: it becomes a warning and the
/// catalog is empty.
pub fn open_catalog(
    directory: &Path,
    media_type: MediaType,
    config: &CatalogConfig,
) -> (MediaCatalog, Option<Message>) {
    match list_matching(directory, media_type.kind(), config) {
        Ok(names) => (MediaCatalog::from_listing(media_type, names), None),
        Err(e) => {
            log::warn!("{:#}", e);
            (
                MediaCatalog::empty(media_type),
                Some(Message::warning(format!("{:#}", e))),
            )
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_labeler_core::{Image, Video};
    use std::fs;
    use tempfile::TempDir;

    fn fixture(names: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in names {
            fs::write(tmp.path().join(name), b"x").unwrap();
        }
        tmp
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[test]
    fn test_lists_matching_files_only() {
        let tmp = fixture(&["a.jpg", "B.PNG", "notes.txt", "clip.mp4"]);
        fs::create_dir(tmp.path().join("nested.jpg")).unwrap();
        let images = list_matching(tmp.path(), &Image, &CatalogConfig::default()).unwrap();
        assert_eq!(sorted(images), vec!["B.PNG", "a.jpg"]);
        let videos = list_matching(tmp.path(), &Video, &CatalogConfig::default()).unwrap();
        assert_eq!(videos, vec!["clip.mp4"]);
    }

    #[test]
    fn test_does_not_recurse() {
        let tmp = fixture(&["top.jpg"]);
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("deep.jpg"), b"x").unwrap();
        let images = list_matching(tmp.path(), &Image, &CatalogConfig::default()).unwrap();
        assert_eq!(images, vec!["top.jpg"]);
    }

    #[test]
    fn test_exclude_globs() {
        let tmp = fixture(&["a.jpg", "._a.jpg"]);
        let config = CatalogConfig {
            exclude_globs: vec!["._*".to_string()],
            follow_symlinks: false,
        };
        let images = list_matching(tmp.path(), &Image, &config).unwrap();
        assert_eq!(images, vec!["a.jpg"]);
    }

    #[test]
    fn test_missing_directory_becomes_warning() {
        let tmp = TempDir::new().unwrap();
        let (catalog, message) = open_catalog(&tmp.path().join("nope"), MediaType::Image, &CatalogConfig::default());
        assert!(catalog.is_empty());
        assert!(message.unwrap().text.contains("does not exist"));
    }
}
