use super::*;
use crate::util::token_storage::MemoryTokenStorage;

fn alice() -> User {
    User { id: 1, username: Some("alice".to_owned()), email: "a@x.com".to_owned(), created_at: None }
}

fn store_with(storage: &MemoryTokenStorage) -> SessionStore {
    SessionStore::new(Arc::new(storage.clone()))
}

#[test]
fn new_session_is_loading_and_unauthenticated() {
    let store = store_with(&MemoryTokenStorage::new());
    assert!(store.session().loading);
    assert!(!store.is_authenticated());
}

#[test]
fn restored_token_alone_is_not_authenticated() {
    let storage = MemoryTokenStorage::with_token("tok-1");
    let mut store = store_with(&storage);
    assert_eq!(store.restore().as_deref(), Some("tok-1"));
    assert_eq!(store.token(), Some("tok-1"));
    assert!(!store.is_authenticated());
}

#[test]
fn set_session_persists_and_settles() {
    let storage = MemoryTokenStorage::new();
    let mut store = store_with(&storage);
    store.fail("old error");
    store.begin();
    store.set_session("tok-2".to_owned(), alice());

    assert!(store.is_authenticated());
    assert_eq!(storage.load().as_deref(), Some("tok-2"));
    assert!(!store.session().loading);
    assert!(store.session().last_error.is_none());
}

#[test]
fn clear_removes_persisted_token_and_user() {
    let storage = MemoryTokenStorage::new();
    let mut store = store_with(&storage);
    store.set_session("tok-3".to_owned(), alice());
    store.begin();
    store.clear();

    assert!(storage.load().is_none());
    assert!(store.session().token.is_none());
    assert!(store.session().user.is_none());
    assert!(!store.session().loading);
}

#[test]
fn fail_records_error_and_stops_loading() {
    let mut store = store_with(&MemoryTokenStorage::new());
    store.begin();
    store.fail("Invalid email or password");
    assert_eq!(store.session().last_error.as_deref(), Some("Invalid email or password"));
    assert!(!store.session().loading);
    store.clear_error();
    assert!(store.session().last_error.is_none());
}
