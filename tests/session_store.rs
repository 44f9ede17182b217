use persona_chat::error::ChatError;
use persona_chat::models::{ChatSession, Message, Selector};
use persona_chat::session::{FilesystemSessionStore, MemorySessionStore, SessionRepository};
use std::fs;
use tempfile::TempDir;

fn create_test_session(id: &str) -> ChatSession {
    let mut session = ChatSession::new(id, &Selector::Character("solomon".to_string()), "Test");
    session.messages = vec![
        Message::assistant("Greetings."),
        Message::user("Test question."),
    ];
    session
}

fn ids(sessions: &[ChatSession]) -> Vec<String> {
    sessions.iter().map(|s| s.id.clone()).collect()
}

fn store_in(temp_dir: &TempDir) -> FilesystemSessionStore {
    FilesystemSessionStore::new(temp_dir.path().join("data").join("chatHistory.json"))
}

#[test]
fn test_missing_file_is_empty_collection() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    assert!(store.list().unwrap().is_empty());
    assert!(store.get("nope").unwrap().is_none());
}

#[test]
fn test_save_and_get_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.upsert(&create_test_session("test-123")).unwrap();

    let found = store.get("test-123").unwrap().unwrap();
    assert_eq!(found.id, "test-123");
    assert_eq!(found.messages.len(), 2);
    assert_eq!(found.character_id.as_deref(), Some("solomon"));
}

#[test]
fn test_new_sessions_are_prepended() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.upsert(&create_test_session("first")).unwrap();
    store.upsert(&create_test_session("second")).unwrap();
    store.upsert(&create_test_session("third")).unwrap();

    assert_eq!(ids(&store.list().unwrap()), vec!["third", "second", "first"]);
}

#[test]
fn test_update_keeps_position() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.upsert(&create_test_session("old")).unwrap();
    store.upsert(&create_test_session("new")).unwrap();

    let mut updated = create_test_session("old");
    updated.messages.push(Message::assistant("An answer."));
    updated.title = "Updated".to_string();
    store.upsert(&updated).unwrap();

    let sessions = store.list().unwrap();
    assert_eq!(ids(&sessions), vec!["new", "old"]);
    assert_eq!(sessions[1].messages.len(), 3);
    assert_eq!(sessions[1].title, "Updated");
}

#[test]
fn test_delete_removes_exactly_one() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    for id in ["a", "b", "c"] {
        store.upsert(&create_test_session(id)).unwrap();
    }
    let before = ids(&store.list().unwrap());

    assert!(store.delete("b").unwrap());

    let after = ids(&store.list().unwrap());
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.contains(&"b".to_string()));
    assert!(after.iter().all(|id| before.contains(id)));
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.upsert(&create_test_session("a")).unwrap();

    assert!(!store.delete("missing").unwrap());
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_clear_all_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.upsert(&create_test_session("session-1")).unwrap();
    store.upsert(&create_test_session("session-2")).unwrap();

    store.clear().unwrap();

    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_collection_uses_camel_case_keys() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.upsert(&create_test_session("keys")).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"characterId\""));
    assert!(raw.contains("\"createdAt\""));
    assert!(!raw.contains("\"topicId\""));
}

#[test]
fn test_corrupt_collection_is_storage_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "{ not json").unwrap();

    let result = store.list();
    assert!(matches!(result, Err(ChatError::Storage(_))));
}

#[test]
fn test_memory_store_follows_same_rules() {
    let store = MemorySessionStore::new();
    store.upsert(&create_test_session("x")).unwrap();
    store.upsert(&create_test_session("y")).unwrap();
    store.upsert(&create_test_session("x")).unwrap();

    assert_eq!(ids(&store.list().unwrap()), vec!["y", "x"]);
    assert!(store.delete("x").unwrap());
    assert_eq!(ids(&store.list().unwrap()), vec!["y"]);
}

#[test]
fn test_save_leaves_no_staging_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.upsert(&create_test_session("a")).unwrap();
    store.upsert(&create_test_session("b")).unwrap();

    let names: Vec<String> = fs::read_dir(store.path().parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["chatHistory.json".to_string()]);
    assert_eq!(store.list().unwrap().len(), 2);
}

#[test]
fn test_concurrent_clear_and_upsert_stay_consistent() {
    let temp_dir = TempDir::new().unwrap();
    let store = std::sync::Arc::new(store_in(&temp_dir));
    store.upsert(&create_test_session("seed")).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    store.clear().unwrap();
                } else {
                    store.upsert(&create_test_session(&format!("s{}", i))).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Whatever interleaving won, the collection must still parse.
    let sessions = store.list().unwrap();
    assert!(sessions.len() <= 5);

    store.clear().unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(!store.path().exists());
}
