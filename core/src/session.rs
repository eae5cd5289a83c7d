//! Process-wide session credential.
//!
//! The credential is read by every dispatch and written only by the auth
//! flows (login, refresh, logout). A plain `RwLock<Option<String>>` behind
//! an `Arc` gives replace-on-write semantics with cheap cloned handles.

use std::sync::{Arc, RwLock};

/// Cloneable handle to the current session token, shared between the
/// dispatcher and the auth call sites.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if a user is logged in.
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("session lock poisoned").clone()
    }

    /// Replace the credential after a login or refresh.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().expect("session lock poisoned") = Some(token.into());
    }

    /// Drop the credential on logout or when the server rejects a refresh.
    pub fn clear(&self) {
        *self.token.write().expect("session lock poisoned") = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }
}
