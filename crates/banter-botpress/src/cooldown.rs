// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-(bot,user) dedup window.
//!
//! Expiry is passive: a lookup that finds an expired entry treats it as
//! absent and re-arms it in place. A background sweeper bounds memory
//! growth; it is not needed for correctness.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::task::JoinHandle;
use tracing::debug;

use banter_core::{BotId, UserId};

/// Admits the first interaction for a (bot, user) pair within a fixed
/// time-to-live window and suppresses the rest.
///
/// `admit` is check-and-arm in one step: the map's entry API locks the
/// key's shard, so two concurrent admits for the same key can never both
/// observe absence.
pub struct CooldownGate {
    entries: DashMap<(BotId, UserId), Instant>,
    ttl: Duration,
}

impl CooldownGate {
    /// Creates a gate with the given window length.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns `true` and arms the window if the pair is new (or its
    /// previous window has elapsed); returns `false` without side effect
    /// while the window is live.
    pub fn admit(&self, bot_id: &BotId, user_id: &UserId) -> bool {
        let now = Instant::now();
        match self.entries.entry((bot_id.clone(), user_id.clone())) {
            Entry::Occupied(mut occupied) => {
                if *occupied.get() > now {
                    false
                } else {
                    occupied.insert(now + self.ttl);
                    true
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(now + self.ttl);
                true
            }
        }
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, expires_at| *expires_at > now);
    }

    /// Number of tracked entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the gate currently tracks no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawns a background task purging expired entries every `interval`.
    ///
    /// The task runs for the lifetime of the process; dropping the handle
    /// detaches it.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let gate = Arc::clone(self);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(interval);
            tick.tick().await; // the first tick fires immediately
            loop {
                tick.tick().await;
                let before = gate.len();
                gate.purge_expired();
                let purged = before.saturating_sub(gate.len());
                if purged > 0 {
                    debug!(purged, "cooldown sweep evicted expired entries");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    fn key() -> (BotId, UserId) {
        (BotId("support".into()), UserId("1234".into()))
    }

    #[test]
    fn first_admit_passes_second_is_suppressed() {
        let (bot, user) = key();
        let gate = CooldownGate::new(Duration::from_secs(60));
        assert!(gate.admit(&bot, &user));
        assert!(!gate.admit(&bot, &user));
        assert!(!gate.admit(&bot, &user));
    }

    #[test]
    fn distinct_pairs_are_independent() {
        let gate = CooldownGate::new(Duration::from_secs(60));
        let bot = BotId("support".into());
        assert!(gate.admit(&bot, &UserId("1".into())));
        assert!(gate.admit(&bot, &UserId("2".into())));
        assert!(gate.admit(&BotId("sales".into()), &UserId("1".into())));
        assert!(!gate.admit(&bot, &UserId("1".into())));
    }

    #[test]
    fn admit_passes_again_after_ttl_elapses() {
        let (bot, user) = key();
        let gate = CooldownGate::new(Duration::from_millis(30));
        assert!(gate.admit(&bot, &user));
        assert!(!gate.admit(&bot, &user));

        thread::sleep(Duration::from_millis(50));
        assert!(gate.admit(&bot, &user), "expired entry reads as absent");
        assert!(!gate.admit(&bot, &user), "re-admission re-arms the window");
    }

    #[test]
    fn concurrent_admits_for_one_key_admit_exactly_one() {
        let gate = Arc::new(CooldownGate::new(Duration::from_secs(60)));
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let (bot, user) = key();
                    barrier.wait();
                    gate.admit(&bot, &user)
                })
            })
            .collect();

        let admitted: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            admitted.iter().filter(|a| **a).count(),
            1,
            "exactly one concurrent admit may win, got {admitted:?}"
        );
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let gate = CooldownGate::new(Duration::from_millis(30));
        let bot = BotId("support".into());
        gate.admit(&bot, &UserId("old".into()));
        thread::sleep(Duration::from_millis(50));
        gate.admit(&bot, &UserId("new".into()));

        assert_eq!(gate.len(), 2);
        gate.purge_expired();
        assert_eq!(gate.len(), 1);
        assert!(!gate.admit(&bot, &UserId("new".into())));
    }

    #[tokio::test]
    async fn sweeper_bounds_table_growth() {
        let gate = Arc::new(CooldownGate::new(Duration::from_millis(10)));
        let _sweeper = gate.spawn_sweeper(Duration::from_millis(20));

        let bot = BotId("support".into());
        for i in 0..10 {
            gate.admit(&bot, &UserId(format!("user-{i}")));
        }

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(gate.is_empty(), "sweeper should have evicted expired entries");
    }
}
