//! `flint validate` - check a definition without activating it.

use anyhow::Result;
use flint_core::definition::{Activation, PipelineDefinition};
use flint_core::error::FlintError;
use std::path::Path;

/// Load and classify a definition, resolving its capability type against
/// the standard registries.
pub fn run(file: &Path) -> Result<()> {
    let definition = PipelineDefinition::load(file)?;
    let (triggers, schedulers) = flint_plugins::standard_registries();

    match definition.activation() {
        Some(Activation::Event(block)) => {
            if triggers.lookup(&block.type_name).is_none() {
                return Err(FlintError::UnknownTrigger {
                    type_name: block.type_name.clone(),
                }
                .into());
            }
            println!(
                "{}: event-triggered via '{}'",
                file.display(),
                block.type_name
            );
        }
        Some(Activation::Scheduled(block)) => {
            if schedulers.lookup(&block.type_name).is_none() {
                return Err(FlintError::UnknownScheduler {
                    type_name: block.type_name.clone(),
                }
                .into());
            }
            println!("{}: scheduled via '{}'", file.display(), block.type_name);
        }
        Some(Activation::Immediate(_)) => {
            println!("{}: immediate", file.display());
        }
        None => {
            return Err(FlintError::InvalidDefinition {
                path: file.to_path_buf(),
                cause: "definition has none of 'event', 'scheduler' or 'pipeline'".to_string(),
            }
            .into());
        }
    }

    if definition.has_conflicting_blocks() {
        println!(
            "warning: both 'event' and 'scheduler' present; 'scheduler' will be ignored"
        );
    }

    Ok(())
}
