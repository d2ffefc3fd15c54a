//! In-memory [`DocumentBackend`] for tests and embedding.
//!
//! Documents live in a `HashMap` behind `std::sync::RwLock`. A read-only
//! switch makes every write fail, to exercise save-error paths.

use std::collections::HashMap;
use std::io;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{DocumentBackend, Scope};

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    documents: RwLock<HashMap<Scope, String>>,
    read_only: AtomicBool,
}

fn poisoned() -> io::Error {
    io::Error::other("in-memory backend lock poisoned")
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw `contents` for `scope`, bypassing the read-only switch.
    pub fn insert(&self, scope: &Scope, contents: &str) {
        if let Ok(mut docs) = self.documents.write() {
            docs.insert(scope.clone(), contents.to_string());
        }
    }

    /// Raw contents currently stored for `scope`.
    pub fn document(&self, scope: &Scope) -> Option<String> {
        self.documents
            .read()
            .ok()
            .and_then(|docs| docs.get(scope).cloned())
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::Relaxed);
    }
}

impl DocumentBackend for InMemoryBackend {
    fn read(&self, scope: &Scope) -> io::Result<Option<String>> {
        let docs = self.documents.read().map_err(|_| poisoned())?;
        Ok(docs.get(scope).cloned())
    }

    fn write(&self, scope: &Scope, contents: &str) -> io::Result<()> {
        if self.read_only.load(Ordering::Relaxed) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", scope),
            ));
        }
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        docs.insert(scope.clone(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.read(&Scope::new("x.json")).unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let backend = InMemoryBackend::new();
        let scope = Scope::new("x.json");
        backend.write(&scope, "{}").unwrap();
        assert_eq!(backend.read(&scope).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let backend = InMemoryBackend::new();
        let scope = Scope::new("x.json");
        backend.set_read_only(true);
        let err = backend.write(&scope, "{}").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(backend.document(&scope), None);
    }
}
