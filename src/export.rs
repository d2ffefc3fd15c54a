//! Export the labels of one catalog as JSON grouped by label.
//!
//! Produces `{ "<label>": ["file", ...], "": [unlabeled files] }` for the
//! files of the current directory and media type only, so the output can
//! feed a dataset split without knowing the storage layout.

use anyhow::{Context, Result};
use media_labeler_core::{MediaType, Session, DocumentBackend};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Config;
use crate::session::open_session;

/// Group the catalog's files by their working-copy label.
pub fn group_by_label<B: DocumentBackend>(session: &Session<B>) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in session.catalog().items() {
        let label = session.label_of(file).unwrap_or_default().to_string();
        groups.entry(label).or_default().push(file.clone());
    }
    groups
}

/// Export grouped labels as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn run_export(
    config: &Config,
    directory: &Path,
    kind: Option<MediaType>,
    output: Option<&Path>,
) -> Result<()> {
    let session = open_session(config, directory, kind)?;
    let groups = group_by_label(&session);
    let json = serde_json::to_string_pretty(&groups)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} {} in {} groups to {}",
                session.catalog().len(),
                session.catalog().media_type().kind().plural(),
                groups.len(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
