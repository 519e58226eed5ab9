//! Event listener host.
//!
//! Owns the concurrent execution context for event-triggered pipelines: one
//! detached tokio task per registered listener.

use flint_core::traits::{ActivationCallback, EventTrigger};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Host for long-lived event listeners.
///
/// Listeners are spawned detached and never joined: the host deliberately
/// retains no handles, matching the daemon-style lifetime of the triggers
/// it runs. Cancellation is left to process shutdown.
pub struct ListenerHost {
    /// Number of listeners spawned so far.
    spawned: AtomicUsize,
}

impl ListenerHost {
    /// Create a new host with no listeners.
    pub fn new() -> Self {
        Self {
            spawned: AtomicUsize::new(0),
        }
    }

    /// Launch `trigger` on its own detached task.
    ///
    /// Returns as soon as the task is spawned; the trigger's `start` future
    /// runs for the remainder of the process lifetime. A failure inside the
    /// task is logged and stays confined to it.
    pub fn spawn(
        &self,
        trigger: Box<dyn EventTrigger>,
        on_event: ActivationCallback,
        pipeline: &Path,
    ) {
        let pipeline = pipeline.to_path_buf();
        self.spawned.fetch_add(1, Ordering::Relaxed);

        tokio::spawn(async move {
            if let Err(e) = trigger.start(on_event).await {
                tracing::error!(
                    pipeline = %pipeline.display(),
                    error = %e,
                    "event listener failed"
                );
            } else {
                tracing::info!(
                    pipeline = %pipeline.display(),
                    "event listener ended"
                );
            }
        });
    }

    /// Number of listeners spawned by this host.
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::Relaxed)
    }
}

impl Default for ListenerHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flint_core::error::FlintError;
    use flint_core::traits::CapabilityFuture;
    use std::sync::Arc;
    use std::time::Duration;

    /// Trigger whose start future never resolves.
    struct PendingTrigger;

    impl EventTrigger for PendingTrigger {
        fn start<'a>(&'a self, _on_event: ActivationCallback) -> CapabilityFuture<'a, ()> {
            Box::pin(std::future::pending())
        }
    }

    /// Trigger that fails immediately on start.
    struct FailingTrigger;

    impl EventTrigger for FailingTrigger {
        fn start<'a>(&'a self, _on_event: ActivationCallback) -> CapabilityFuture<'a, ()> {
            Box::pin(async {
                Err(FlintError::Watch {
                    path: "/tmp/gone".into(),
                    cause: "source vanished".to_string(),
                })
            })
        }
    }

    fn noop_callback() -> ActivationCallback {
        Arc::new(|| Box::pin(async { Ok(()) }))
    }

    #[tokio::test]
    async fn spawn_does_not_block() {
        let host = ListenerHost::new();

        tokio::time::timeout(Duration::from_millis(100), async {
            host.spawn(
                Box::new(PendingTrigger),
                noop_callback(),
                Path::new("p.yaml"),
            );
        })
        .await
        .expect("spawn must not wait for the listener");

        assert_eq!(host.spawned(), 1);
    }

    #[tokio::test]
    async fn listener_failure_stays_confined() {
        let host = ListenerHost::new();
        host.spawn(
            Box::new(FailingTrigger),
            noop_callback(),
            Path::new("p.yaml"),
        );

        // Give the failing task a chance to run; the host must stay usable.
        tokio::time::sleep(Duration::from_millis(20)).await;
        host.spawn(
            Box::new(PendingTrigger),
            noop_callback(),
            Path::new("q.yaml"),
        );
        assert_eq!(host.spawned(), 2);
    }
}
