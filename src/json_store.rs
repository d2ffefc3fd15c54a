//! Filesystem [`DocumentBackend`]: one pretty-printed JSON file per scope.
//!
//! Writes go to a temporary file next to the target and are renamed into
//! place, so an interrupted commit leaves the previous document intact.

use media_labeler_core::{DocumentBackend, Scope};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileBackend;

impl JsonFileBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for JsonFileBackend {
    fn read(&self, scope: &Scope) -> io::Result<Option<String>> {
        match fs::read_to_string(scope.path()) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, scope: &Scope, contents: &str) -> io::Result<()> {
        let path = scope.path();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        log::debug!("wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}
