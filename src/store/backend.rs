//! Persistence backends for the snapshot store.
//!
//! The store hands a backend one complete JSON document per save and
//! asks for it back on load. Backends know nothing about its contents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{Error, Result};

/// Trait for pluggable persistence backends.
pub trait StoreBackend {
    /// Read the stored document, or `None` on first run.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    fn save(&mut self, document: &str) -> Result<()>;
}

/// JSON file on disk, replaced atomically on every save.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at [`JsonFileBackend::default_path`].
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// `<config dir>/zone-settings/state.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zone-settings")
            .join("state.json")
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, document: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, document)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = document.len(), "saved snapshot store");
        Ok(())
    }
}

/// Document kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    document: Option<String>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryBackend {
    /// Create an empty backend (first run).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    /// Make saves fail (or succeed again).
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// The last saved document.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StoreBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &str) -> Result<()> {
        if self.fail_saves {
            return Err(Error::Persistence("storage unavailable".to_string()));
        }
        self.document = Some(document.to_string());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_first_run_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("state.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_creates_parent_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut backend = JsonFileBackend::new(&path);

        backend.save(r#"{"version":1}"#).unwrap();
        backend.save(r#"{"version":2}"#).unwrap();

        assert_eq!(backend.load().unwrap().as_deref(), Some(r#"{"version":2}"#));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(JsonFileBackend::default_path().ends_with("zone-settings/state.json"));
    }

    #[test]
    fn test_memory_backend_failures() {
        let mut backend = MemoryBackend::new();
        backend.set_fail_saves(true);
        assert!(backend.save("x").is_err());
        assert_eq!(backend.save_count(), 0);

        backend.set_fail_saves(false);
        backend.save("x").unwrap();
        assert_eq!(backend.document(), Some("x"));
    }
}
