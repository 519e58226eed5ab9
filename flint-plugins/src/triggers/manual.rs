//! Manual trigger.
//!
//! Allows explicit activation through a programmatic handle. Useful for
//! exercising pipelines in tests and demos.

use flint_core::error::{FlintError, Result};
use flint_core::traits::{
    ActivationCallback, CapabilityConfig, CapabilityFuture, EventTrigger, EventTriggerFactory,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handle for firing a running [`ManualTrigger`].
#[derive(Clone)]
pub struct FireHandle {
    tx: mpsc::Sender<()>,
}

impl FireHandle {
    /// Fire the trigger once.
    pub async fn fire(&self) -> Result<()> {
        self.tx.send(()).await.map_err(|_| FlintError::ConfigValue {
            field: "manual".to_string(),
            cause: "trigger is no longer running".to_string(),
        })
    }
}

/// Manual trigger.
///
/// # Configuration
///
/// ```yaml
/// event:
///   type: manual
///   config:
///     buffer_size: 10
/// ```
///
/// # Parameters
///
/// - `buffer_size` - maximum fires to buffer while a run is in progress
///   (default: 10)
///
/// # Usage
///
/// ```ignore
/// let trigger = Arc::new(ManualTrigger::new());
/// // start() the trigger on its own task, then:
/// let handle = trigger.fire_handle().unwrap();
/// handle.fire().await?;
/// ```
pub struct ManualTrigger {
    /// Fire buffer capacity.
    buffer_size: usize,
    /// Sender installed once the trigger is started.
    fire_tx: Arc<RwLock<Option<mpsc::Sender<()>>>>,
}

impl ManualTrigger {
    /// Create a new manual trigger with the default buffer size.
    pub fn new() -> Self {
        Self {
            buffer_size: 10,
            fire_tx: Arc::new(RwLock::new(None)),
        }
    }

    /// Create from configuration.
    pub fn from_config(config: &CapabilityConfig) -> Result<Self> {
        let buffer_size = config.get_i64("buffer_size").unwrap_or(10);
        if buffer_size <= 0 {
            return Err(FlintError::ConfigValue {
                field: "buffer_size".to_string(),
                cause: format!("must be positive, got {}", buffer_size),
            });
        }

        Ok(Self {
            buffer_size: buffer_size as usize,
            fire_tx: Arc::new(RwLock::new(None)),
        })
    }

    /// Get a handle to fire the trigger.
    ///
    /// Returns `None` until the trigger has been started.
    pub fn fire_handle(&self) -> Option<FireHandle> {
        self.fire_tx
            .read()
            .as_ref()
            .map(|tx| FireHandle { tx: tx.clone() })
    }
}

impl Default for ManualTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTrigger for ManualTrigger {
    fn start<'a>(&'a self, on_event: ActivationCallback) -> CapabilityFuture<'a, ()> {
        Box::pin(async move {
            let (tx, mut rx) = mpsc::channel(self.buffer_size);
            *self.fire_tx.write() = Some(tx);

            tracing::info!(buffer_size = self.buffer_size, "manual trigger started");

            while let Some(()) = rx.recv().await {
                tracing::debug!("manual fire received");
                if on_event().await.is_err() {
                    // Already reported by the activation callback.
                    tracing::debug!("pipeline run failed, trigger continues");
                }
            }

            // Unreachable while the stored sender is alive, but mirrors the
            // watch triggers should the channel ever close.
            *self.fire_tx.write() = None;
            Ok(())
        })
    }
}

/// Factory for manual triggers.
pub struct ManualTriggerFactory;

impl EventTriggerFactory for ManualTriggerFactory {
    fn create(&self, config: &CapabilityConfig) -> Result<Box<dyn EventTrigger>> {
        Ok(Box::new(ManualTrigger::from_config(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn no_handle_before_start() {
        let trigger = ManualTrigger::new();
        assert!(trigger.fire_handle().is_none());
    }

    #[test]
    fn from_config_buffer_size() {
        let config = CapabilityConfig::new(
            serde_yaml::from_str("buffer_size: 50\n").unwrap(),
            "p.yaml",
        );
        let trigger = ManualTrigger::from_config(&config).unwrap();
        assert_eq!(trigger.buffer_size, 50);
    }

    #[test]
    fn from_config_rejects_nonpositive_buffer() {
        let config = CapabilityConfig::new(
            serde_yaml::from_str("buffer_size: 0\n").unwrap(),
            "p.yaml",
        );
        assert!(ManualTrigger::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn fires_reach_the_callback() {
        let trigger = Arc::new(ManualTrigger::new());
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = Arc::clone(&fired);
        let callback: ActivationCallback = Arc::new(move || {
            let fired = Arc::clone(&fired_clone);
            Box::pin(async move {
                fired.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        });

        let runner = Arc::clone(&trigger);
        tokio::spawn(async move {
            let _ = runner.start(callback).await;
        });

        // The sender appears once the trigger's task is up.
        let handle = loop {
            if let Some(handle) = trigger.fire_handle() {
                break handle;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        };

        handle.fire().await.unwrap();
        handle.fire().await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), async {
            while fired.load(Ordering::SeqCst) < 2 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("both fires should run the pipeline");
    }
}
