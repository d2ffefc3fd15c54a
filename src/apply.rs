//! `mlabel apply`: one full labeling pass ending in an explicit save.
//!
//! Order within the pass: vocabulary additions, removals, the choice set,
//! per-file selections, then the save, which applies a pending rename to
//! the working copy before committing it.

use anyhow::{bail, Result};
use media_labeler_core::MediaType;
use std::path::Path;

use crate::config::Config;
use crate::session::{open_session, print_messages};

/// Everything the collaborator asks for in one pass.
#[derive(Debug, Clone, Default)]
pub struct ApplyRequest {
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub rename: Option<(String, String)>,
    pub set: Vec<(String, String)>,
    pub choices: Vec<String>,
    pub dry_run: bool,
}

pub fn run_apply(
    config: &Config,
    directory: &Path,
    kind: Option<MediaType>,
    request: &ApplyRequest,
) -> Result<()> {
    let mut session = open_session(config, directory, kind)?;

    for label in &request.add {
        session.add_label(label);
    }
    for label in &request.remove {
        session.remove_label(label);
    }
    if !request.choices.is_empty() {
        session.set_choices(request.choices.as_slice());
    }
    let mut selected = 0;
    for (file, label) in &request.set {
        if session.select(file, label) {
            selected += 1;
        }
    }
    log::info!("applied {} of {} selections", selected, request.set.len());

    let rename = request
        .rename
        .as_ref()
        .map(|(old, new)| (old.as_str(), new.as_str()));

    if request.dry_run {
        let document = session.preview_save(rename)?;
        print_messages(&session.take_messages());
        println!("{}", document);
        println!("Dry run: nothing was saved to {}.", session.store().scope());
        return Ok(());
    }

    let result = session.save(rename);
    print_messages(&session.take_messages());
    match result {
        Ok(count) => {
            log::debug!("saved {} entries", count);
            Ok(())
        }
        Err(e) => bail!("save failed for {}: {}", session.store().scope(), e),
    }
}
