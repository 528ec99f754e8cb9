//! Persistence for the session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only session data that survives a reload. Browser builds
//! keep it in `localStorage`; other builds and tests use an in-memory slot.
//! Storage failures are swallowed: a token that fails to persist only costs
//! a re-login after reload.

#[cfg(test)]
#[path = "token_storage_test.rs"]
mod token_storage_test;

use std::sync::{Arc, Mutex, PoisonError};

/// A single process-wide slot holding the persisted token.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn remove(&self);
}

/// `localStorage`-backed slot under a fixed key.
#[derive(Clone, Debug)]
pub struct BrowserTokenStorage {
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    key: String,
}

impl BrowserTokenStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let raw = local_storage()?.get_item(&self.key).ok().flatten()?;
            (!raw.is_empty()).then_some(raw)
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            if storage.set_item(&self.key, token).is_err() {
                log::warn!("failed to persist session token");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn remove(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(&self.key);
            }
        }
    }
}

/// In-memory slot. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `token`, as after a previous run.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(token.into()))) }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn remove(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Token storage for the current build target.
#[must_use]
pub fn default_token_storage(key: &str) -> Arc<dyn TokenStorage> {
    #[cfg(feature = "csr")]
    {
        Arc::new(BrowserTokenStorage::new(key))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        Arc::new(MemoryTokenStorage::new())
    }
}
