//! Interactive editing of one entity's field list.

use crate::config::types::{FieldDefinition, WIZARD_VALIDATION_RULES};
use crate::prompt::Prompter;
use crate::wizard::validator;
use crate::Result;
use std::io::{BufRead, Write};

/// Owns the in-memory field list and the used-name set for one wizard run.
/// The used set tracks snake_case keys so collisions are case-insensitive.
pub struct FieldEditor {
    entity: String,
    fields: Vec<FieldDefinition>,
    used_keys: Vec<String>,
}

impl FieldEditor {
    pub fn new(entity: &str, fields: Vec<FieldDefinition>) -> Self {
        let used_keys = fields.iter().map(|f| f.key.clone()).collect();
        Self {
            entity: entity.to_string(),
            fields,
            used_keys,
        }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldDefinition> {
        self.fields
    }

    /// Add fields one at a time until the user declines. Unbounded but
    /// user-driven: every iteration requires an explicit yes.
    pub fn run_add_loop<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        self.print_summary(prompter)?;
        loop {
            prompter.say(&format!("\nGenerating field #{}", self.fields.len() + 1))?;
            if !prompter.confirm("Do you want to add a field to your entity?", true)? {
                self.print_summary(prompter)?;
                return Ok(());
            }

            let used_keys = &self.used_keys;
            let name = prompter.input("What is the name of your field?", |input| {
                validator::validate_field_name(input, used_keys).map_err(|e| e.to_string())
            })?;

            let mut rules = Vec::new();
            if prompter.confirm("Do you want to add validation rules to your field?", false)? {
                let labels: Vec<String> = WIZARD_VALIDATION_RULES
                    .iter()
                    .map(|(label, _)| (*label).to_string())
                    .collect();
                let picked =
                    prompter.multi_select("Which validation rules do you want to add?", &labels)?;
                for index in picked {
                    rules.push(WIZARD_VALIDATION_RULES[index].1.to_string());
                }
            }

            let field = FieldDefinition::point(&name, rules);
            self.used_keys.push(field.key.clone());
            self.fields.push(field);
            self.print_summary(prompter)?;
        }
    }

    /// Multi-select fields to drop, confirm, then delete them in one pass.
    /// Iterates from the end so indices stay stable during deletion.
    pub fn run_remove_pass<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        if self.fields.is_empty() {
            prompter.say("There are no point fields to remove.")?;
            return Ok(());
        }

        let names: Vec<String> = self.fields.iter().map(|f| f.name.clone()).collect();
        let picked =
            prompter.multi_select("Please choose the fields you want to remove", &names)?;
        if picked.is_empty() {
            return Ok(());
        }
        if !prompter.confirm("Are you sure to remove these fields?", true)? {
            return Ok(());
        }

        let selected: Vec<String> = picked.iter().map(|i| names[*i].clone()).collect();
        prompter.say(&format!("\nRemoving fields: {}", selected.join(", ")))?;
        for index in (0..self.fields.len()).rev() {
            if selected.contains(&self.fields[index].name) {
                let removed = self.fields.remove(index);
                self.used_keys.retain(|key| key != &removed.key);
            }
        }
        self.print_summary(prompter)?;
        Ok(())
    }

    /// Human-readable recap of the current list, printed after every change.
    fn print_summary<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        if self.fields.is_empty() {
            return Ok(());
        }
        prompter.say(&format!("\n================= {} =================", self.entity))?;
        prompter.say("Fields")?;
        for field in &self.fields {
            let rules = if field.validation_rules.is_empty() {
                String::new()
            } else {
                format!(" {}", field.validation_rules.join(" "))
            };
            prompter.say(&format!("{} ({}){}", field.name, field.kind, rules))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_add_loop_appends_until_decline() {
        // add `location` without rules, add `dropZone` with `required`, stop.
        let mut p = prompter("y\nlocation\nn\ny\ndropZone\ny\n1\nn\n");
        let mut editor = FieldEditor::new("Delivery", Vec::new());
        editor.run_add_loop(&mut p).unwrap();

        let fields = editor.into_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "location");
        assert!(fields[0].validation_rules.is_empty());
        assert_eq!(fields[1].name, "dropZone");
        assert_eq!(fields[1].key, "drop_zone");
        assert_eq!(fields[1].validation_rules, vec!["required".to_string()]);
    }

    #[test]
    fn test_add_loop_rejects_duplicate_then_accepts_retry() {
        // `Location` (upper case), `location` (taken), then `pickupSpot`.
        let mut p = prompter("y\nLocation\nlocation\npickupSpot\nn\nn\n");
        let existing = vec![FieldDefinition::point("location", vec![])];
        let mut editor = FieldEditor::new("Delivery", existing);
        editor.run_add_loop(&mut p).unwrap();

        let fields = editor.into_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].name, "pickupSpot");
    }

    #[test]
    fn test_decline_first_prompt_leaves_list_unchanged() {
        let mut p = prompter("n\n");
        let existing = vec![FieldDefinition::point("location", vec![])];
        let mut editor = FieldEditor::new("Delivery", existing.clone());
        editor.run_add_loop(&mut p).unwrap();
        assert_eq!(editor.into_fields(), existing);
    }

    #[test]
    fn test_remove_pass_deletes_selected() {
        // select field 1 (`a`), confirm.
        let mut p = prompter("1\ny\n");
        let existing = vec![
            FieldDefinition::point("a", vec![]),
            FieldDefinition::point("b", vec![]),
        ];
        let mut editor = FieldEditor::new("Delivery", existing);
        editor.run_remove_pass(&mut p).unwrap();

        let fields = editor.into_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "b");
    }

    #[test]
    fn test_remove_pass_unconfirmed_keeps_fields() {
        let mut p = prompter("1,2\nn\n");
        let existing = vec![
            FieldDefinition::point("a", vec![]),
            FieldDefinition::point("b", vec![]),
        ];
        let mut editor = FieldEditor::new("Delivery", existing.clone());
        editor.run_remove_pass(&mut p).unwrap();
        assert_eq!(editor.into_fields(), existing);
    }

    #[test]
    fn test_removed_name_becomes_available_again() {
        let mut p = prompter("1\ny\n");
        let existing = vec![FieldDefinition::point("location", vec![])];
        let mut editor = FieldEditor::new("Delivery", existing);
        editor.run_remove_pass(&mut p).unwrap();

        let mut p = prompter("y\nlocation\nn\nn\n");
        editor.run_add_loop(&mut p).unwrap();
        assert_eq!(editor.into_fields().len(), 1);
    }
}
