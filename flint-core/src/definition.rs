//! Pipeline definition model and loading.
//!
//! A pipeline definition is a YAML document with up to three recognized
//! top-level keys:
//!
//! ```yaml
//! event:            # optional: activate on an external event
//!   type: file_watch
//!   config:
//!     dir: /data/incoming
//!
//! scheduler:        # optional: activate on a recurring schedule
//!   type: interval
//!   config:
//!     seconds: 30
//!
//! pipeline:         # the body executed on each activation
//!   - operator: log
//!     params:
//!       message: "hello"
//! ```
//!
//! At most one of `event`/`scheduler` is meaningful; a definition with
//! neither runs its `pipeline` body immediately at registration.

use crate::error::{FlintError, Result};
use serde::Deserialize;
use std::path::Path;

/// A trigger selection block (the value of `event` or `scheduler`).
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerBlock {
    /// Registry identifier of the capability implementation.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Opaque capability parameters, passed through verbatim.
    #[serde(default)]
    pub config: serde_yaml::Value,
}

/// A parsed pipeline definition document.
///
/// Owned transiently by the dispatcher for the duration of one registration
/// call; activation callbacks re-load the document from disk at fire time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineDefinition {
    /// Event-activation block, if present.
    pub event: Option<TriggerBlock>,
    /// Scheduled-activation block, if present.
    pub scheduler: Option<TriggerBlock>,
    /// The pipeline body, opaque to the dispatcher.
    pub pipeline: Option<serde_yaml::Value>,
}

/// The activation mode a definition resolves to.
#[derive(Debug)]
pub enum Activation<'a> {
    /// Start a long-lived event listener.
    Event(&'a TriggerBlock),
    /// Register a job with the shared temporal scheduler.
    Scheduled(&'a TriggerBlock),
    /// Run the pipeline body immediately.
    Immediate(&'a serde_yaml::Value),
}

impl PipelineDefinition {
    /// Load a definition from a YAML file.
    ///
    /// The path is checked for existence before any read or parse is
    /// attempted.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FlintError::PipelineNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FlintError::Io {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| FlintError::DefinitionParse {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })
    }

    /// Classify this definition into its activation mode.
    ///
    /// `event` takes precedence over `scheduler` when both are present (use
    /// [`has_conflicting_blocks`](Self::has_conflicting_blocks) to detect
    /// and report that case). Returns `None` when none of the recognized
    /// keys is present.
    pub fn activation(&self) -> Option<Activation<'_>> {
        if let Some(event) = &self.event {
            Some(Activation::Event(event))
        } else if let Some(scheduler) = &self.scheduler {
            Some(Activation::Scheduled(scheduler))
        } else {
            self.pipeline.as_ref().map(Activation::Immediate)
        }
    }

    /// Whether both `event` and `scheduler` blocks are present.
    ///
    /// The `scheduler` block is ignored in that case; callers surface a
    /// warning.
    pub fn has_conflicting_blocks(&self) -> bool {
        self.event.is_some() && self.scheduler.is_some()
    }

    /// The pipeline body, or an error naming the definition that lacks one.
    ///
    /// Used at fire time, when a body is required regardless of activation
    /// mode.
    pub fn body(&self, path: &Path) -> Result<&serde_yaml::Value> {
        self.pipeline
            .as_ref()
            .ok_or_else(|| FlintError::InvalidDefinition {
                path: path.to_path_buf(),
                cause: "definition has no 'pipeline' body".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> PipelineDefinition {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn classify_immediate() {
        let def = parse("pipeline:\n  - operator: log\n");
        assert!(matches!(def.activation(), Some(Activation::Immediate(_))));
        assert!(!def.has_conflicting_blocks());
    }

    #[test]
    fn classify_event() {
        let def = parse(
            r#"
event:
  type: file_watch
  config:
    dir: /tmp/incoming
pipeline:
  - operator: log
"#,
        );

        match def.activation() {
            Some(Activation::Event(block)) => {
                assert_eq!(block.type_name, "file_watch");
                assert_eq!(
                    block.config.get("dir").and_then(|v| v.as_str()),
                    Some("/tmp/incoming")
                );
            }
            other => panic!("expected event activation, got {:?}", other),
        }
    }

    #[test]
    fn classify_scheduled() {
        let def = parse(
            r#"
scheduler:
  type: interval
  config:
    seconds: 30
pipeline:
  - operator: log
"#,
        );
        assert!(matches!(def.activation(), Some(Activation::Scheduled(_))));
    }

    #[test]
    fn event_takes_precedence_over_scheduler() {
        let def = parse(
            r#"
event:
  type: file_watch
scheduler:
  type: interval
"#,
        );
        assert!(def.has_conflicting_blocks());
        assert!(matches!(def.activation(), Some(Activation::Event(_))));
    }

    #[test]
    fn no_recognized_keys() {
        let def = parse("description: just metadata\n");
        assert!(def.activation().is_none());
    }

    #[test]
    fn block_config_defaults_to_null() {
        let def = parse("event:\n  type: manual\n");
        let event = def.event.unwrap();
        assert_eq!(event.type_name, "manual");
        assert!(event.config.is_null());
    }

    #[test]
    fn body_missing_is_invalid() {
        let def = parse("event:\n  type: manual\n");
        let err = def.body(Path::new("p.yaml")).unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[test]
    fn load_missing_path() {
        let err = PipelineDefinition::load(Path::new("/nonexistent/p.yaml")).unwrap_err();
        assert!(matches!(err, FlintError::PipelineNotFound { .. }));
    }
}
