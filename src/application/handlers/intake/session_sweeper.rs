//! SessionSweeper - Background removal of idle intake sessions.
//!
//! Expiry is also enforced lazily when a message arrives, so the sweeper only
//! bounds how long abandoned sessions stay in the store.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | How often to sweep |
//! | `threshold` | 30min | Idle time after which a session is removed |
//!
//! ## Graceful Shutdown
//!
//! The loop exits when the shutdown channel flips to `true`. A sweep in
//! progress finishes first.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::Timestamp;

use super::session_registry::SessionRegistry;

pub struct SessionSweeper {
    registry: Arc<SessionRegistry>,
    interval: Duration,
    threshold: chrono::Duration,
}

impl SessionSweeper {
    pub fn new(
        registry: Arc<SessionRegistry>,
        interval: Duration,
        threshold: chrono::Duration,
    ) -> Self {
        Self {
            registry,
            interval,
            threshold,
        }
    }

    /// Runs until `shutdown` is set to `true` or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Session sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.sweep_once(Timestamp::now()).await;
                }
            }
        }
    }

    /// One sweep pass. Store failures are logged and count as zero removed.
    pub async fn sweep_once(&self, now: Timestamp) -> usize {
        match self.registry.sweep_expired(now, self.threshold).await {
            Ok(0) => 0,
            Ok(removed) => {
                tracing::info!(removed, "Swept expired intake sessions");
                removed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session sweep failed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::Identity;
    use crate::domain::intake::IntakeSession;
    use crate::ports::SessionStore;

    fn sweeper(store: Arc<InMemorySessionStore>) -> SessionSweeper {
        let registry = Arc::new(SessionRegistry::new(store, chrono::Duration::minutes(30)));
        SessionSweeper::new(
            registry,
            Duration::from_millis(10),
            chrono::Duration::minutes(30),
        )
    }

    #[tokio::test]
    async fn sweep_once_removes_idle_sessions() {
        let store = Arc::new(InMemorySessionStore::new());
        let started = Timestamp::from_unix_secs(1_750_413_600);
        store
            .store(&IntakeSession::new(Identity::new("idle").unwrap(), started))
            .await
            .unwrap();
        let sweeper = sweeper(store.clone());

        assert_eq!(sweeper.sweep_once(started.plus_minutes(10)).await, 0);
        assert_eq!(sweeper.sweep_once(started.plus_minutes(30)).await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn run_removes_stale_sessions_and_stops_on_shutdown() {
        let store = Arc::new(InMemorySessionStore::new());
        let long_ago = Timestamp::now().plus_minutes(-120);
        store
            .store(&IntakeSession::new(Identity::new("stale").unwrap(), long_ago))
            .await
            .unwrap();
        let sweeper = sweeper(store.clone());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop")
            .unwrap();
        assert!(store.is_empty().await);
    }
}
