// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared bearer-credential cell with single-flight refresh.
//!
//! The token's expiry is signaled only by the server's error code, never by
//! a client-side clock, so the store has no notion of time. It guarantees
//! that concurrent stale-token detections converge on one login: the lock
//! is held across the refresh round-trip, and a caller that blocked on it
//! re-checks whether the token it saw is still current before logging in
//! itself.

use tokio::sync::Mutex;
use tracing::debug;

use banter_core::BanterError;

/// Sentinel credential used before the first login.
///
/// Guarantees the first secured request deterministically takes the
/// invalid-token path and triggers a login.
const UNAUTHENTICATED: &str = "none";

/// Holds the current bearer credential for the converse API.
pub struct TokenStore {
    current: Mutex<String>,
}

impl TokenStore {
    /// Creates a store holding the unauthenticated sentinel.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(UNAUTHENTICATED.to_string()),
        }
    }

    /// Returns a clone of the current credential.
    pub async fn current(&self) -> String {
        self.current.lock().await.clone()
    }

    /// Refreshes the credential via `login`, unless another caller already
    /// replaced the `stale` value this caller observed.
    ///
    /// Returns the credential that is current after the call, which is the
    /// fresh login result for the winner and the winner's result for any
    /// latecomer that awaited the same refresh.
    pub async fn refresh_with<F, Fut>(&self, stale: &str, login: F) -> Result<String, BanterError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, BanterError>>,
    {
        let mut guard = self.current.lock().await;
        if *guard != stale {
            debug!("token already refreshed by a concurrent request");
            return Ok(guard.clone());
        }
        let fresh = login().await?;
        *guard = fresh.clone();
        Ok(fresh)
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn starts_unauthenticated() {
        let store = TokenStore::new();
        assert_eq!(store.current().await, "none");
    }

    #[tokio::test]
    async fn refresh_replaces_stale_token() {
        let store = TokenStore::new();
        let fresh = store
            .refresh_with("none", || async { Ok("jwt-1".to_string()) })
            .await
            .unwrap();
        assert_eq!(fresh, "jwt-1");
        assert_eq!(store.current().await, "jwt-1");
    }

    #[tokio::test]
    async fn concurrent_refreshes_converge_on_one_login() {
        let store = TokenStore::new();
        let logins = AtomicUsize::new(0);

        let login = || async {
            logins.fetch_add(1, Ordering::SeqCst);
            Ok("jwt-1".to_string())
        };

        // Both callers observed the same stale token before either refreshed.
        let (a, b) = tokio::join!(
            store.refresh_with("none", login),
            store.refresh_with("none", login),
        );

        assert_eq!(a.unwrap(), "jwt-1");
        assert_eq!(b.unwrap(), "jwt-1");
        assert_eq!(logins.load(Ordering::SeqCst), 1, "only one login may run");
    }

    #[tokio::test]
    async fn refresh_skips_login_when_token_already_rotated() {
        let store = TokenStore::new();
        store
            .refresh_with("none", || async { Ok("jwt-1".to_string()) })
            .await
            .unwrap();

        // A caller still holding the old sentinel must not trigger a login.
        let result = store
            .refresh_with("none", || async {
                panic!("login must not run for an outdated stale value")
            })
            .await
            .unwrap();
        assert_eq!(result, "jwt-1");
    }

    #[tokio::test]
    async fn failed_login_leaves_token_unchanged() {
        let store = TokenStore::new();
        let err = store
            .refresh_with("none", || async {
                Err(BanterError::Transport {
                    message: "connection refused".to_string(),
                    source: None,
                })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BanterError::Transport { .. }));
        assert_eq!(store.current().await, "none");
    }
}
