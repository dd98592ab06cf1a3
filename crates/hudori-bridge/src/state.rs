//! Session state: the authenticated identity shared by every outgoing request.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Credentials of the signed-in user.
///
/// Either both fields are empty (anonymous) or both are set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty() && !self.user_id.is_empty()
    }
}

/// Lock-guarded owner of the [`Session`].
///
/// Shared through an `Arc` by the gateway and the commands. All reads return a
/// snapshot of both fields taken under the same lock.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: Mutex<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite both credentials at once.
    pub fn set(&self, token: impl Into<String>, user_id: impl Into<String>) {
        let next = Session { token: token.into(), user_id: user_id.into() };
        *self.lock() = next;
    }

    /// Forget the credentials. Clearing an anonymous session is a no-op.
    pub fn clear(&self) {
        *self.lock() = Session::default();
    }

    /// Snapshot of the current credentials.
    pub fn current(&self) -> Session {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Replace the user id of an authenticated session, keeping its token.
    ///
    /// Returns `false` and leaves the state untouched when nobody is signed in.
    pub fn refresh_user_id(&self, user_id: impl Into<String>) -> bool {
        let mut session = self.lock();
        if !session.is_authenticated() {
            return false;
        }
        let user_id = user_id.into();
        if user_id.is_empty() {
            return false;
        }
        session.user_id = user_id;
        true
    }

    // A panic while holding the guard cannot leave a half-written session:
    // every writer replaces the whole value in one assignment.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_starts_anonymous() {
        let state = SessionState::new();
        assert_eq!(state.current(), Session::default());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_set_then_clear() {
        let state = SessionState::new();
        state.set("tok123", "u1");
        assert!(state.is_authenticated());
        assert_eq!(state.current(), Session { token: "tok123".into(), user_id: "u1".into() });

        state.clear();
        assert!(!state.is_authenticated());
        assert_eq!(state.current(), Session::default());
    }

    #[test]
    fn test_set_and_clear_are_idempotent() {
        let state = SessionState::new();
        state.set("t", "u");
        let once = state.current();
        state.set("t", "u");
        assert_eq!(state.current(), once);

        state.clear();
        let cleared = state.current();
        state.clear();
        assert_eq!(state.current(), cleared);
    }

    #[test]
    fn test_half_filled_session_is_not_authenticated() {
        let state = SessionState::new();
        state.set("tok", "");
        assert!(!state.is_authenticated());
        state.set("", "u1");
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_refresh_user_id_requires_authentication() {
        let state = SessionState::new();
        assert!(!state.refresh_user_id("u9"));
        assert_eq!(state.current(), Session::default());

        state.set("tok", "u1");
        assert!(state.refresh_user_id("u2"));
        assert_eq!(state.current(), Session { token: "tok".into(), user_id: "u2".into() });
        assert!(!state.refresh_user_id(""));
        assert_eq!(state.current().user_id, "u2");
    }

    #[test]
    fn test_concurrent_writers_never_mix_pairs() {
        let state = Arc::new(SessionState::new());
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        state.set(format!("tok-{i}"), format!("user-{i}"));
                    }
                })
            })
            .collect();

        for _ in 0..4_000 {
            let snapshot = state.current();
            if snapshot.is_authenticated() {
                let t = snapshot.token.trim_start_matches("tok-");
                let u = snapshot.user_id.trim_start_matches("user-");
                assert_eq!(t, u, "token and user id from different sessions");
            }
        }

        for w in writers {
            w.join().unwrap();
        }
    }
}
