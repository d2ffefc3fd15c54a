//! `mlabel show`: display one page of the catalog with current labels.

use anyhow::Result;
use media_labeler_core::{MediaType, PageView};
use std::path::Path;

use crate::config::Config;
use crate::session::{open_session, print_messages};

pub fn run_show(
    config: &Config,
    directory: &Path,
    kind: Option<MediaType>,
    page: usize,
    json: bool,
) -> Result<()> {
    let mut session = open_session(config, directory, kind)?;
    let view = session.page_view(page);
    let plural = session.catalog().media_type().kind().plural();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_messages(&session.take_messages());
    println!("Total Pages: {}", view.total_pages);
    println!("Total {}: {}", capitalize(plural), view.total_items);
    if view.total_items == 0 {
        return Ok(());
    }

    println!("Labels: {}", session.offered().join(", "));
    println!();
    print_page(&view);
    Ok(())
}

pub fn print_page(view: &PageView) {
    println!("Page {} / {}", view.page, view.total_pages);
    let width = view
        .entries
        .iter()
        .map(|e| e.filename.chars().count())
        .max()
        .unwrap_or(0);
    for entry in &view.entries {
        println!(
            "  {:<width$}  {}",
            entry.filename,
            entry.label.as_deref().unwrap_or("-"),
            width = width
        );
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("images"), "Images");
        assert_eq!(capitalize(""), "");
    }
}
