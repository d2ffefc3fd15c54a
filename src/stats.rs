//! Labeling progress overview.
//!
//! Summarises the backing document and the current catalog: how many files
//! are labeled, per-label usage, labels in the document that are no longer
//! in the vocabulary, and whether other directories share the same
//! combined-variant document.

use anyhow::Result;
use media_labeler_core::{MediaType, Scope, Variant};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::session::{open_session, print_messages, resolve_scope};

/// Run the stats command: open a pass and print a summary.
pub fn run_stats(config: &Config, directory: &Path, kind: Option<MediaType>) -> Result<()> {
    let mut session = open_session(config, directory, kind)?;
    print_messages(&session.take_messages());

    let summary = session.summary();
    let scope = session.store().scope().clone();
    let document_size = std::fs::metadata(scope.path()).map(|m| m.len()).unwrap_or(0);
    let plural = session.catalog().media_type().kind().plural();
    let total = summary.labeled + summary.unlabeled;

    println!("Media Labeler Stats");
    println!("===================");
    println!();
    println!("  Directory:   {}", directory.display());
    println!("  Document:    {}", scope);
    println!("  Size:        {}", format_bytes(document_size));
    println!("  Entries:     {}", summary.document_entries);
    println!();
    println!(
        "  Labeled {}: {} / {} ({}%)",
        plural,
        summary.labeled,
        total,
        if total > 0 {
            (summary.labeled * 100) / total
        } else {
            0
        }
    );

    if !summary.usage.is_empty() {
        println!();
        println!("  By label:");
        println!("  {:<24} {:>6}", "LABEL", "USED");
        for (label, count) in &summary.usage {
            println!("  {:<24} {:>6}", label, count);
        }
    }

    if !summary.stale.is_empty() {
        println!();
        println!("  Not in vocabulary:");
        for (label, count) in &summary.stale {
            println!("  {:<24} {:>6}", label, count);
        }
    }

    if config.storage.variant == Variant::Combined {
        let siblings = directories_sharing(config, directory, &scope);
        if !siblings.is_empty() {
            println!();
            println!("  Also stored in this document:");
            for sibling in siblings {
                println!("    {}", sibling.display());
            }
        }
    }

    Ok(())
}

/// Other directories whose combined-variant scope resolves to `scope`.
pub fn directories_sharing(config: &Config, directory: &Path, scope: &Scope) -> Vec<PathBuf> {
    let Some(parent) = directory.parent() else {
        return Vec::new();
    };
    let listing_root = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let Ok(entries) = std::fs::read_dir(listing_root) else {
        return Vec::new();
    };

    let own_name = directory.file_name();
    let mut shared: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| Some(e.file_name().as_os_str()) != own_name)
        .map(|e| parent.join(e.file_name()))
        .filter(|p| &resolve_scope(config, p) == scope)
        .collect();
    shared.sort();
    shared
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
