use super::storage::{merge_session, remove_session, SessionRepository};
use crate::error::{ChatError, Result};
use crate::models::ChatSession;
use std::sync::{Mutex, MutexGuard};

/// Non-persistent collection, handy for tests and throwaway sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<Vec<ChatSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> Result<MutexGuard<'_, Vec<ChatSession>>> {
        self.sessions
            .lock()
            .map_err(|_| ChatError::Storage("Session store lock poisoned".into()))
    }
}

impl SessionRepository for MemorySessionStore {
    fn list(&self) -> Result<Vec<ChatSession>> {
        Ok(self.sessions()?.clone())
    }

    fn upsert(&self, session: &ChatSession) -> Result<()> {
        let mut sessions = self.sessions()?;
        merge_session(&mut sessions, session);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut sessions = self.sessions()?;
        Ok(remove_session(&mut sessions, id))
    }

    fn clear(&self) -> Result<()> {
        self.sessions()?.clear();
        Ok(())
    }
}
