//! Handler for the `entity` command.

use super::CommandHandler;
use crate::config::Project;
use crate::{prompt, wizard, PointsmithError, Result};
use std::path::Path;

pub struct EntityCommand {
    pub project_dir: String,
    pub name: Option<String>,
    pub regenerate: bool,
}

impl CommandHandler for EntityCommand {
    fn execute(&self) -> Result<()> {
        let project = Project::load(Path::new(&self.project_dir))?;

        if self.regenerate {
            // Hook mode: no prompts, rebuild from the recorded field list.
            let entity = self.name.as_deref().ok_or_else(|| {
                PointsmithError::Config(
                    "--regenerate requires --name <Entity>".to_string(),
                )
            })?;
            println!("♻️  Re-generating point fields for {entity}");
            return wizard::regenerate_from_sidecar(&project, entity);
        }

        println!(
            "🗺️  pointsmith — PostGIS point fields for {}",
            project.descriptor.base_name
        );
        project.warn_on_old_scaffolder();

        let mut prompter = prompt::stdio();
        wizard::run(&project, &mut prompter, self.name.as_deref())
    }

    fn name(&self) -> &'static str {
        "entity"
    }
}

impl EntityCommand {
    pub fn new(project_dir: String, name: Option<String>, regenerate: bool) -> Self {
        Self {
            project_dir,
            name,
            regenerate,
        }
    }
}
