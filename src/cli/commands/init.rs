//! Handler for the `init` command.

use super::CommandHandler;
use crate::config::Project;
use crate::generate::ModuleInitializer;
use crate::{prompt, Result};
use std::path::Path;

pub struct InitCommand {
    pub project_dir: String,
    pub yes: bool,
}

impl CommandHandler for InitCommand {
    fn execute(&self) -> Result<()> {
        let project = Project::load(Path::new(&self.project_dir))?;
        println!(
            "🗺️  pointsmith — PostGIS point fields for {}",
            project.descriptor.base_name
        );
        project.warn_on_old_scaffolder();
        project.require_postgresql()?;

        let initializer = ModuleInitializer::new(&project);
        if initializer.is_initialized() {
            println!("✅ The point module is already initialized.");
            initializer.register_hook();
            return Ok(());
        }

        if !self.yes {
            let mut prompter = prompt::stdio();
            let choice = prompter.select(
                "Do you want to initialize the point module?",
                &["Yes", "No, continue"],
                1,
            )?;
            if choice != 0 {
                println!("No changes were made.");
                return Ok(());
            }
        }

        initializer.run()?;
        initializer.register_hook();

        println!();
        println!("✅ Point module initialized successfully!");
        println!("🎯 Next steps:");
        println!("  1. Review the changes to pom.xml and the application profiles");
        println!("  2. Run 'pointsmith entity' to add point fields to an entity");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "init"
    }
}

impl InitCommand {
    pub fn new(project_dir: String, yes: bool) -> Self {
        Self { project_dir, yes }
    }
}
