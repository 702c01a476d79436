//! The entity field wizard.
//!
//! Linear flow: pick an entity, pick an update mode, edit the field list,
//! validate it, then hand the result to the regeneration orchestrator. Every
//! prompt's visibility is a pure function of prior answers in the same run;
//! nothing is written before the file-mutation pass starts.

pub mod editor;
pub mod validator;

use crate::config::{types, EntityStore, Project};
use crate::generate::entity::EntityRegenerator;
use crate::prompt::Prompter;
use crate::{PointsmithError, Result};
use editor::FieldEditor;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Add,
    Remove,
    Exit,
}

const MODE_CHOICES: &[&str] = &["Yes, add more fields", "Yes, remove fields", "No, exit"];

/// Run the interactive wizard against a project. `preselected` skips the
/// entity prompt (used when the entity name is given on the command line).
pub fn run<R: BufRead, W: Write>(
    project: &Project,
    prompter: &mut Prompter<R, W>,
    preselected: Option<&str>,
) -> Result<()> {
    project.require_postgresql()?;
    let store = EntityStore::for_project(project);
    let entity = choose_entity(&store, prompter, preselected)?;
    let fields = store.load_fields(&entity)?;

    let mode = ask_update_mode(prompter)?;
    if mode == UpdateMode::Exit {
        prompter.say("Aborting entity update, no changes were made.")?;
        return Ok(());
    }

    let mut editor = FieldEditor::new(&entity, fields);
    if mode == UpdateMode::Add {
        editor.run_add_loop(prompter)?;
    } else {
        editor.run_remove_pass(prompter)?;
    }

    let fields = editor.into_fields();
    let source = store.descriptor_path(&entity).display().to_string();
    types::validate_field_set(&source, &fields)?;

    EntityRegenerator::new(project).regenerate(&store, &entity, &fields)?;
    prompter.say(&format!(
        "✅ Updated {entity}: {} point field(s) recorded.",
        fields.len()
    ))?;
    Ok(())
}

/// Regenerate an entity's point fields from its recorded list without any
/// prompting. Invoked by the scaffolder's post-entity hook.
pub fn regenerate_from_sidecar(project: &Project, entity: &str) -> Result<()> {
    project.require_postgresql()?;
    let store = EntityStore::for_project(project);
    require_known_entity(&store, entity)?;
    let fields = store.load_fields(entity)?;
    let source = store.descriptor_path(entity).display().to_string();
    types::validate_field_set(&source, &fields)?;
    EntityRegenerator::new(project).regenerate(&store, entity, &fields)?;
    Ok(())
}

fn choose_entity<R: BufRead, W: Write>(
    store: &EntityStore,
    prompter: &mut Prompter<R, W>,
    preselected: Option<&str>,
) -> Result<String> {
    if let Some(entity) = preselected {
        require_known_entity(store, entity)?;
        return Ok(entity.to_string());
    }
    let entities = store.list_entities()?;
    if entities.is_empty() {
        return Err(PointsmithError::Config(
            "Aborting entity update, no entities found.".to_string(),
        ));
    }
    let choices: Vec<&str> = entities.iter().map(String::as_str).collect();
    let index = prompter.select("Please choose the entity to update", &choices, 0)?;
    Ok(entities[index].clone())
}

fn require_known_entity(store: &EntityStore, entity: &str) -> Result<()> {
    if !store.list_entities()?.iter().any(|e| e == entity) {
        return Err(PointsmithError::Config(format!(
            "Unknown entity `{entity}`; no matching descriptor found"
        )));
    }
    Ok(())
}

fn ask_update_mode<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<UpdateMode> {
    let index = prompter.select(
        "Do you want to update point fields? This will regenerate the point regions \
         of the entity's files; custom code inside them will be overwritten",
        MODE_CHOICES,
        0,
    )?;
    Ok(match index {
        0 => UpdateMode::Add,
        1 => UpdateMode::Remove,
        _ => UpdateMode::Exit,
    })
}
