//! Durable storage slot for the cart.
//!
//! The cart persists as one JSON payload in a single key-value slot. The
//! [`CartSlot`] trait is the seam between the cart store and the medium, so
//! tests run against [`MemorySlot`] while the binary uses [`FileSlot`].

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by the durable cart slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the slot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the cart for storage failed.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A single durable key-value slot holding the JSON-encoded cart.
pub trait CartSlot: Send + Sync {
    /// Read the stored payload; `None` if the slot was never written.
    fn load(&self) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Overwrite the slot with a new payload.
    fn save(&self, payload: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Cart slot backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot at the given path. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartSlot for FileSlot {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn save(&self, payload: &str) -> Result<(), StorageError> {
        tokio::fs::write(&self.path, payload).await?;
        Ok(())
    }
}

/// Volatile slot for ephemeral sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    payload: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-seeded with a payload.
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Arc::new(Mutex::new(Some(payload.into()))),
        }
    }

    /// Snapshot the current payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<String> {
        self.payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartSlot for MemorySlot {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.payload())
    }

    async fn save(&self, payload: &str) -> Result<(), StorageError> {
        *self.payload.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_slot_absent_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("cart.json"));
        assert!(slot.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_slot_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("cart.json"));

        slot.save("[]").await.unwrap();
        assert_eq!(slot.load().await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_memory_slot_roundtrip() {
        let slot = MemorySlot::new();
        assert!(slot.load().await.unwrap().is_none());

        slot.save("{\"k\":1}").await.unwrap();
        assert_eq!(slot.load().await.unwrap().as_deref(), Some("{\"k\":1}"));
    }
}
