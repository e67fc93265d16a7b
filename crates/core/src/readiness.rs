//! One-shot readiness signal for the initial authentication check

use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Flag that flips from `false` to `true` once and never reverts
///
/// Clones share the same flag. Waiters that arrive after the flip resolve
/// immediately.
#[derive(Clone, Debug)]
pub struct ReadinessGate {
    tx: Arc<watch::Sender<bool>>,
}

impl ReadinessGate {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Mark the gate ready
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn mark_ready(&self) -> bool {
        let fired = self.tx.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        });
        if fired {
            debug!("Auth readiness published");
        }
        fired
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the gate is ready
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        rx.wait_for(|ready| *ready).await.ok();
    }

    /// Receiver replaying the current readiness value
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Guard that marks the gate ready when dropped
    #[must_use]
    pub fn ready_on_drop(&self) -> ReadyOnDrop {
        ReadyOnDrop { gate: self.clone() }
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks its gate ready on drop, including on early return, panic or cancellation
#[must_use = "readiness fires when the guard is dropped"]
pub struct ReadyOnDrop {
    gate: ReadinessGate,
}

impl Drop for ReadyOnDrop {
    fn drop(&mut self) {
        self.gate.mark_ready();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_starts_not_ready() {
        let gate = ReadinessGate::new();
        assert!(!gate.is_ready());
        assert!(!*gate.subscribe().borrow());
    }

    #[test]
    fn test_fires_exactly_once() {
        let gate = ReadinessGate::new();
        assert!(gate.mark_ready());
        assert!(!gate.mark_ready());
        assert!(!gate.clone().mark_ready());
        assert!(gate.is_ready());
    }

    #[test]
    fn test_late_subscriber_sees_ready() {
        let gate = ReadinessGate::new();
        gate.mark_ready();
        assert!(*gate.subscribe().borrow());
    }

    #[test]
    fn test_guard_fires_on_drop() {
        let gate = ReadinessGate::new();
        {
            let _guard = gate.ready_on_drop();
            assert!(!gate.is_ready());
        }
        assert!(gate.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiters_before_and_after() {
        let gate = ReadinessGate::new();

        let early = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!early.is_finished());

        gate.mark_ready();
        tokio::time::timeout(Duration::from_secs(1), early)
            .await
            .expect("early waiter resolves")
            .unwrap();

        tokio::time::timeout(Duration::from_secs(1), gate.wait())
            .await
            .expect("late waiter resolves immediately");
    }
}
