use super::storage::{merge_session, remove_session, SessionRepository};
use crate::error::{ChatError, Result};
use crate::models::ChatSession;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Session collection stored as one JSON array in a single file.
pub struct FilesystemSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FilesystemSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Result<Vec<ChatSession>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            ChatError::Storage(format!(
                "Failed to parse session collection {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_collection(&self, sessions: &[ChatSession]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(sessions)?;
        // Write a sibling file then rename, so the collection is never half-written.
        let staging = self.staging_path();
        fs::write(&staging, content)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), sessions = sessions.len(), "Wrote session collection");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    fn locked(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| ChatError::Storage("Session store lock poisoned".into()))
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Vec<ChatSession>) -> T) -> Result<T> {
        let _guard = self.locked()?;
        let mut sessions = self.read_collection()?;
        let result = f(&mut sessions);
        self.write_collection(&sessions)?;
        Ok(result)
    }
}

impl SessionRepository for FilesystemSessionStore {
    fn list(&self) -> Result<Vec<ChatSession>> {
        self.read_collection()
    }

    fn upsert(&self, session: &ChatSession) -> Result<()> {
        self.modify(|sessions| merge_session(sessions, session))
    }

    fn delete(&self, id: &str) -> Result<bool> {
        self.modify(|sessions| remove_session(sessions, id))
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.locked()?;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
