//! `mlabel labels`: print the pass's vocabulary and how often each label is used.

use anyhow::Result;
use media_labeler_core::MediaType;
use std::path::Path;

use crate::config::Config;
use crate::session::{open_session, print_messages};

pub fn run_labels(config: &Config, directory: &Path, kind: Option<MediaType>) -> Result<()> {
    let mut session = open_session(config, directory, kind)?;
    print_messages(&session.take_messages());

    let summary = session.summary();
    if summary.usage.is_empty() {
        println!("No labels defined.");
        return Ok(());
    }

    println!("{:<24} USED", "LABEL");
    for (label, count) in &summary.usage {
        println!("{:<24} {}", label, count);
    }
    Ok(())
}
