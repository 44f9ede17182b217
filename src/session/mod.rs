mod filesystem;
mod memory;
mod storage;
mod text;
mod transport;
mod view;

pub use filesystem::FilesystemSessionStore;
pub use memory::MemorySessionStore;
pub use storage::{merge_session, remove_session, SessionRepository};
pub use text::{derive_title, normalize_input, MAX_TITLE_CHARS};
pub use transport::{DispatchTransport, HttpTransport, LocalTransport};
pub use view::{ChatView, PendingTurn, TurnOutcome, ViewState};

use chrono::Utc;
use uuid::Uuid;

/// Create a session id: creation time in milliseconds plus a random suffix,
/// so ids sort by age and two sessions opened in the same millisecond differ.
pub fn new_session_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}
