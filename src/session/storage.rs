use crate::error::Result;
use crate::models::ChatSession;

/// Backing store for the session collection.
///
/// The collection is ordered most-recent-first for newly created sessions;
/// updating an existing session keeps its position.
pub trait SessionRepository: Send + Sync {
    /// Every stored session, in collection order.
    fn list(&self) -> Result<Vec<ChatSession>>;

    /// Look up a single session by id.
    fn get(&self, id: &str) -> Result<Option<ChatSession>> {
        Ok(self.list()?.into_iter().find(|s| s.id == id))
    }

    /// Insert a new session at the front, or replace an existing one in place.
    fn upsert(&self, session: &ChatSession) -> Result<()>;

    /// Remove one session. Returns whether anything was removed.
    fn delete(&self, id: &str) -> Result<bool>;

    /// Remove every session.
    fn clear(&self) -> Result<()>;
}

/// Apply the upsert rule to an in-memory collection.
pub fn merge_session(collection: &mut Vec<ChatSession>, session: &ChatSession) {
    match collection.iter_mut().find(|s| s.id == session.id) {
        Some(existing) => *existing = session.clone(),
        None => collection.insert(0, session.clone()),
    }
}

/// Remove `id` from an in-memory collection. Returns whether it was present.
pub fn remove_session(collection: &mut Vec<ChatSession>, id: &str) -> bool {
    let before = collection.len();
    collection.retain(|s| s.id != id);
    collection.len() != before
}
