//! Filesystem event trigger.
//!
//! Watches a directory and activates the pipeline on file changes.

use flint_core::error::{FlintError, Result};
use flint_core::traits::{
    ActivationCallback, CapabilityConfig, CapabilityFuture, EventTrigger, EventTriggerFactory,
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Filesystem event trigger.
///
/// # Configuration
///
/// ```yaml
/// event:
///   type: file_watch
///   config:
///     dir: /data/incoming
///     recursive: true
///     events:
///       - create
///       - modify
/// ```
///
/// # Parameters
///
/// - `path` (alias `dir`) - directory to watch (required)
/// - `recursive` - watch subdirectories (default: false)
/// - `events` - event kinds to react to: `create`, `modify`, `remove`
///   (default: all three)
///
/// Each accepted event awaits the activation callback before the next one
/// is processed, so runs of the owning pipeline never overlap.
#[derive(Debug)]
pub struct FileWatchTrigger {
    /// Path to watch.
    path: PathBuf,
    /// Watch subdirectories.
    recursive: bool,
    /// React to file creation.
    watch_create: bool,
    /// React to file modification.
    watch_modify: bool,
    /// React to file removal.
    watch_remove: bool,
}

impl FileWatchTrigger {
    /// Create a new trigger watching `path` for all event kinds.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recursive: false,
            watch_create: true,
            watch_modify: true,
            watch_remove: true,
        }
    }

    /// Create from configuration.
    pub fn from_config(config: &CapabilityConfig) -> Result<Self> {
        let path = config
            .get_string("path")
            .or_else(|| config.get_string("dir"))
            .ok_or_else(|| FlintError::ConfigValue {
                field: "path".to_string(),
                cause: "file_watch trigger requires a 'path' (or 'dir') parameter".to_string(),
            })?;

        let recursive = config.get_bool("recursive").unwrap_or(false);

        let (watch_create, watch_modify, watch_remove) = match config
            .params
            .get("events")
            .and_then(|v| v.as_sequence())
        {
            Some(kinds) => {
                let mut create = false;
                let mut modify = false;
                let mut remove = false;
                for kind in kinds.iter().filter_map(|v| v.as_str()) {
                    match kind {
                        "create" => create = true,
                        "modify" => modify = true,
                        "remove" | "delete" => remove = true,
                        other => {
                            return Err(FlintError::ConfigValue {
                                field: "events".to_string(),
                                cause: format!("unknown event kind '{}'", other),
                            });
                        }
                    }
                }
                (create, modify, remove)
            }
            None => (true, true, true),
        };

        Ok(Self {
            path: PathBuf::from(path),
            recursive,
            watch_create,
            watch_modify,
            watch_remove,
        })
    }

    /// Enable recursive watching.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    fn accepts(&self, kind: &notify::EventKind) -> bool {
        match kind {
            notify::EventKind::Create(_) => self.watch_create,
            notify::EventKind::Modify(_) => self.watch_modify,
            notify::EventKind::Remove(_) => self.watch_remove,
            _ => false,
        }
    }
}

impl EventTrigger for FileWatchTrigger {
    fn start<'a>(&'a self, on_event: ActivationCallback) -> CapabilityFuture<'a, ()> {
        Box::pin(async move {
            if !self.path.exists() {
                return Err(FlintError::Watch {
                    path: self.path.clone(),
                    cause: "watched path does not exist".to_string(),
                });
            }

            tracing::info!(
                path = %self.path.display(),
                recursive = self.recursive,
                "file watch started"
            );

            // Bridge the blocking notify callback into the async loop.
            let (tx, mut rx) = mpsc::channel(100);
            let mut watcher = RecommendedWatcher::new(
                move |res: std::result::Result<notify::Event, notify::Error>| {
                    if let Ok(event) = res {
                        let _ = tx.blocking_send(event);
                    }
                },
                notify::Config::default(),
            )
            .map_err(|e| FlintError::Watch {
                path: self.path.clone(),
                cause: format!("failed to create watcher: {}", e),
            })?;

            let mode = if self.recursive {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };

            watcher
                .watch(&self.path, mode)
                .map_err(|e| FlintError::Watch {
                    path: self.path.clone(),
                    cause: format!("failed to watch path: {}", e),
                })?;

            while let Some(event) = rx.recv().await {
                if !self.accepts(&event.kind) {
                    continue;
                }

                tracing::debug!(
                    path = %self.path.display(),
                    kind = ?event.kind,
                    paths = ?event.paths,
                    "filesystem event detected"
                );

                if on_event().await.is_err() {
                    // Already reported by the activation callback; keep watching.
                    tracing::debug!(
                        path = %self.path.display(),
                        "pipeline run failed, listener continues"
                    );
                }
            }

            tracing::info!(path = %self.path.display(), "file watch ended");
            Ok(())
        })
    }
}

/// Factory for filesystem triggers.
pub struct FileWatchTriggerFactory;

impl EventTriggerFactory for FileWatchTriggerFactory {
    fn create(&self, config: &CapabilityConfig) -> Result<Box<dyn EventTrigger>> {
        Ok(Box::new(FileWatchTrigger::from_config(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> CapabilityConfig {
        CapabilityConfig::new(serde_yaml::from_str(yaml).unwrap(), "pipelines/ingest.yaml")
    }

    #[test]
    fn from_config_with_dir_alias() {
        let trigger = FileWatchTrigger::from_config(&config("dir: /tmp/incoming\n")).unwrap();
        assert_eq!(trigger.path, PathBuf::from("/tmp/incoming"));
        assert!(!trigger.recursive);
        assert!(trigger.watch_create && trigger.watch_modify && trigger.watch_remove);
    }

    #[test]
    fn from_config_missing_path() {
        let result = FileWatchTrigger::from_config(&config("recursive: true\n"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), "E103");
    }

    #[test]
    fn from_config_event_subset() {
        let trigger = FileWatchTrigger::from_config(&config(
            "path: /tmp/incoming\nevents:\n  - create\n",
        ))
        .unwrap();
        assert!(trigger.watch_create);
        assert!(!trigger.watch_modify);
        assert!(!trigger.watch_remove);
    }

    #[test]
    fn from_config_unknown_event_kind() {
        let result = FileWatchTrigger::from_config(&config(
            "path: /tmp/incoming\nevents:\n  - rename_weirdly\n",
        ));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn start_fails_on_missing_path() {
        let trigger = FileWatchTrigger::new("/nonexistent/never/here");
        let callback: ActivationCallback = std::sync::Arc::new(|| Box::pin(async { Ok(()) }));
        let err = trigger.start(callback).await.unwrap_err();
        assert_eq!(err.code(), "E301");
    }
}
