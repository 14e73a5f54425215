//! Key/value storage scopes backing the token store.
//!
//! DESIGN
//! ======
//! A `StorageScope` is the shared medium: tab-local memory, or an
//! origin-wide JSON file that survives restarts. Consumers never touch the
//! scope directly; they hold a `StorageHandle`, the equivalent of one
//! browser tab. Writes through a handle are broadcast to the scope, and
//! every *other* handle can observe them through `foreign_changes`, which
//! mirrors the browser `storage` event that only fires in other tabs.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use uuid::Uuid;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
    #[error("storage encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Raw persistence medium. Implementations must be cheap to read.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Write every pair or none of them.
    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage; contents vanish when the process exits.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in pairs {
            entries.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// JSON-file storage. The whole map is cached in memory and rewritten on
/// every mutation (write to a temp file, then rename).
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileBackend {
    /// Open (or lazily create) the storage file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::Corrupt { path: path.display().to_string(), reason: e.to_string() })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path: path.display().to_string(), source }),
        };
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io { path: self.path.display().to_string(), source };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, contents).map_err(io_err)?;

        // Tokens are credentials: owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).map_err(io_err)?;
        }

        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }

    fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        apply(&mut next);
        if next == *entries {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        self.mutate(|entries| {
            for (key, value) in pairs {
                entries.insert((*key).to_owned(), (*value).to_owned());
            }
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }
}

// =============================================================================
// SCOPE + HANDLES
// =============================================================================

/// A write observed on a storage scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    /// Handle that performed the write.
    pub origin: Uuid,
}

struct ScopeInner {
    backend: Box<dyn StorageBackend>,
    changes: broadcast::Sender<StorageChange>,
}

/// Shared storage medium. Cloning yields another reference to the same scope.
#[derive(Clone)]
pub struct StorageScope {
    inner: Arc<ScopeInner>,
}

impl StorageScope {
    #[must_use]
    pub fn from_backend(backend: Box<dyn StorageBackend>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { inner: Arc::new(ScopeInner { backend, changes }) }
    }

    /// Tab-local scope held in memory.
    #[must_use]
    pub fn memory() -> Self {
        Self::from_backend(Box::new(MemoryBackend::default()))
    }

    /// Origin-wide scope persisted to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::from_backend(Box::new(FileBackend::open(path)?)))
    }

    /// Open a new view of this scope with its own origin id.
    #[must_use]
    pub fn handle(&self) -> StorageHandle {
        StorageHandle { scope: self.clone(), origin: Uuid::new_v4() }
    }
}

/// One consumer's view of a storage scope.
#[derive(Clone)]
pub struct StorageHandle {
    scope: StorageScope,
    origin: Uuid,
}

impl StorageHandle {
    #[must_use]
    pub fn origin(&self) -> Uuid {
        self.origin
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.scope.inner.backend.get(key)
    }

    /// Write `value` under `key` and notify other handles.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to persist the write.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.scope.inner.backend.set(key, value)?;
        self.announce(key);
        Ok(())
    }

    /// Write all pairs in one backend mutation, then notify other handles
    /// once per key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; no pair is written then.
    pub fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        self.scope.inner.backend.set_many(pairs)?;
        for (key, _) in pairs {
            self.announce(key);
        }
        Ok(())
    }

    /// Remove `key` and notify other handles.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to persist the removal.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.scope.inner.backend.remove(key)?;
        self.announce(key);
        Ok(())
    }

    /// Stream of writes made through *other* handles of the same scope.
    #[must_use]
    pub fn foreign_changes(&self) -> ForeignChanges {
        ForeignChanges { rx: self.scope.inner.changes.subscribe(), origin: self.origin }
    }

    fn announce(&self, key: &str) {
        // No receivers is the common case and not an error.
        let _ = self
            .scope
            .inner
            .changes
            .send(StorageChange { key: key.to_owned(), origin: self.origin });
    }
}

/// Receiver half of [`StorageHandle::foreign_changes`].
pub struct ForeignChanges {
    rx: broadcast::Receiver<StorageChange>,
    origin: Uuid,
}

impl ForeignChanges {
    /// Wait for the next foreign write. Returns `None` once the scope is gone.
    pub async fn recv(&mut self) -> Option<StorageChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) if change.origin == self.origin => {}
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "storage change listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
