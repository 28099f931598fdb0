//! Purge command implementation

use std::path::PathBuf;

use inquire::Confirm;

use crate::cli::PurgeArgs;
use crate::environment;
use crate::error::{self, Result};
use crate::ui;

/// Delete every environment directory alias and build artifact under the
/// project root. Destructive, so it prompts unless `--yes` was given.
pub fn run(project: Option<PathBuf>, args: PurgeArgs) -> Result<()> {
    let project = super::project_root(project)?;

    if !args.yes {
        let confirmed = Confirm::new(&format!(
            "Delete all environment directories under {}?",
            project.display()
        ))
        .with_default(false)
        .prompt()?;
        if !confirmed {
            ui::status("purge cancelled");
            return Ok(());
        }
    }

    let outcome = environment::purge(&project);

    for path in &outcome.removed {
        ui::status(&format!("removed {}", path.display()));
    }
    if outcome.removed.is_empty() && outcome.is_clean() {
        ui::status("nothing to purge");
    }

    if outcome.is_clean() {
        Ok(())
    } else {
        let failed: Vec<String> = outcome
            .failed
            .iter()
            .map(|(path, reason)| format!("{}: {}", path.display(), reason))
            .collect();
        Err(error::environment_setup_failed(format!(
            "could not remove: {}",
            failed.join("; ")
        )))
    }
}
