//! Wiring a labeling pass from config and command-line input.

use anyhow::{bail, Result};
use media_labeler_core::{
    AssignmentStore, MediaType, Message, MessageKind, Scope, Session, Variant,
};
use std::path::Path;

use crate::catalog::open_catalog;
use crate::config::Config;
use crate::json_store::JsonFileBackend;

/// Pick the media type for this pass.
///
/// Single-media variants fix it; the combined variant takes the requested
/// one and defaults to images.
pub fn resolve_media_type(variant: Variant, requested: Option<MediaType>) -> Result<MediaType> {
    match (variant.fixed_media_type(), requested) {
        (Some(fixed), Some(req)) if fixed != req => {
            bail!(
                "This deployment only labels {}; --kind {} is not available",
                fixed.kind().plural(),
                req
            )
        }
        (Some(fixed), _) => Ok(fixed),
        (None, Some(req)) => Ok(req),
        (None, None) => Ok(MediaType::Image),
    }
}

pub fn resolve_scope(config: &Config, directory: &Path) -> Scope {
    Scope::resolve(config.storage.variant, directory, &config.storage.root)
}

/// Start a pass over `directory`.
pub fn open_session(
    config: &Config,
    directory: &Path,
    requested: Option<MediaType>,
) -> Result<Session<JsonFileBackend>> {
    let media_type = resolve_media_type(config.storage.variant, requested)?;
    let scope = resolve_scope(config, directory);
    log::info!(
        "opening {} pass over {} (document {})",
        media_type,
        directory.display(),
        scope
    );

    let (catalog, listing_warning) = open_catalog(directory, media_type, &config.catalog);
    let store = AssignmentStore::new(JsonFileBackend::new(), scope);
    let mut session = Session::begin(store, catalog, config.labels.session_options());

    if let Some(warning) = listing_warning {
        // Report the listing failure in place of the generic no-media notice.
        let mut messages = session.take_messages();
        messages.retain(|m| m.kind != MessageKind::Info);
        print_messages(&[warning]);
        print_messages(&messages);
    }
    Ok(session)
}

/// Print message signals: success and info on stdout, warnings and errors
/// on stderr.
pub fn print_messages(messages: &[Message]) {
    for message in messages {
        match message.kind {
            MessageKind::Success | MessageKind::Info => println!("{}", message.text),
            MessageKind::Warning => eprintln!("warning: {}", message.text),
            MessageKind::Error => eprintln!("error: {}", message.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_defaults_to_images() {
        assert_eq!(resolve_media_type(Variant::Combined, None).unwrap(), MediaType::Image);
        assert_eq!(
            resolve_media_type(Variant::Combined, Some(MediaType::Video)).unwrap(),
            MediaType::Video
        );
    }

    #[test]
    fn test_single_variant_fixes_kind() {
        assert_eq!(resolve_media_type(Variant::Video, None).unwrap(), MediaType::Video);
        assert!(resolve_media_type(Variant::Image, Some(MediaType::Video)).is_err());
    }
}
