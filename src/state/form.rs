//! Form editing state types.
//!
//! A form is a list of labelled text fields. Submitting it parses the text
//! into a store record or draft.

use super::error::StateError;
use super::navigation::View;
use crate::store::{
    AppState, Item, NewItem, NewProject, NewRawMaterial, Project, ProjectStage, RawMaterial, Unit,
};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a form creates or edits. Edit variants carry the record id.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormKind {
    NewProject,
    EditProject(String),
    NewRawMaterial,
    EditRawMaterial(String),
    NewItem,
    EditItem(String),
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::NewProject => "New project",
            FormKind::EditProject(_) => "Edit project",
            FormKind::NewRawMaterial => "New raw material",
            FormKind::EditRawMaterial(_) => "Edit raw material",
            FormKind::NewItem => "New item",
            FormKind::EditItem(_) => "Edit item",
        }
    }

    /// View the form's records are listed in.
    ///
    pub fn view(&self) -> View {
        match self {
            FormKind::NewProject | FormKind::EditProject(_) => View::Projects,
            FormKind::NewRawMaterial | FormKind::EditRawMaterial(_) => View::Materials,
            FormKind::NewItem | FormKind::EditItem(_) => View::Items,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        FormField {
            label,
            value: value.into(),
        }
    }
}

/// Parsed result of a submitted form.
///
#[derive(Clone, Debug, PartialEq)]
pub enum FormSubmission {
    NewProject(NewProject),
    Project(Project),
    NewRawMaterial(NewRawMaterial),
    RawMaterial(RawMaterial),
    NewItem(NewItem),
    Item(Item),
}

/// Form being edited.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub active: usize,
}

impl FormState {
    pub fn new_project() -> Self {
        Self::with_fields(
            FormKind::NewProject,
            vec![
                FormField::new("Type", ""),
                FormField::new("Name", ""),
                FormField::new("Remarks", ""),
                FormField::new("Deadline (YYYY-MM-DD)", ""),
                FormField::new("Stage", ProjectStage::Preparation.as_str()),
                FormField::new("Materials (comma separated)", ""),
            ],
        )
    }

    pub fn edit_project(project: &Project) -> Self {
        Self::with_fields(
            FormKind::EditProject(project.id.clone()),
            vec![
                FormField::new("Type", project.kind.as_str()),
                FormField::new("Name", project.name.as_str()),
                FormField::new("Remarks", project.remarks.as_str()),
                FormField::new(
                    "Deadline (YYYY-MM-DD)",
                    project.deadline.format(DATE_FORMAT).to_string(),
                ),
                FormField::new("Stage", project.current_stage.as_str()),
            ],
        )
    }

    pub fn new_raw_material() -> Self {
        Self::with_fields(
            FormKind::NewRawMaterial,
            vec![
                FormField::new("Name", ""),
                FormField::new("Quantity", ""),
                FormField::new("Unit (g, kg, m, pcs)", Unit::G.as_str()),
            ],
        )
    }

    pub fn edit_raw_material(material: &RawMaterial) -> Self {
        Self::with_fields(
            FormKind::EditRawMaterial(material.id.clone()),
            vec![
                FormField::new("Name", material.name.as_str()),
                FormField::new("Quantity", material.quantity.to_string()),
                FormField::new("Unit (g, kg, m, pcs)", material.unit.as_str()),
            ],
        )
    }

    pub fn new_item() -> Self {
        Self::with_fields(
            FormKind::NewItem,
            vec![
                FormField::new("Name", ""),
                FormField::new("Material", ""),
                FormField::new("Color", ""),
                FormField::new("Quantity", "1"),
                FormField::new("Total cost", ""),
            ],
        )
    }

    pub fn edit_item(item: &Item) -> Self {
        Self::with_fields(
            FormKind::EditItem(item.id.clone()),
            vec![
                FormField::new("Name", item.name.as_str()),
                FormField::new("Material", item.material.as_str()),
                FormField::new("Color", item.color.as_str()),
                FormField::new("Quantity", item.quantity.to_string()),
                FormField::new("Total cost", item.total_cost.to_string()),
            ],
        )
    }

    fn with_fields(kind: FormKind, fields: Vec<FormField>) -> Self {
        FormState {
            kind,
            fields,
            active: 0,
        }
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields.len();
    }

    pub fn previous_field(&mut self) {
        self.active = (self.active + self.fields.len() - 1) % self.fields.len();
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.value.pop();
        }
    }

    /// Parse the fields. Edit forms start from the stored record so fields
    /// the form does not show are preserved.
    ///
    pub fn submit(&self, state: &AppState) -> Result<FormSubmission, StateError> {
        match &self.kind {
            FormKind::NewProject => Ok(FormSubmission::NewProject(NewProject {
                kind: self.required(0)?,
                name: self.required(1)?,
                remarks: self.text(2),
                deadline: self.date(3)?,
                current_stage: self.stage(4)?,
                material_ids: self.material_ids(5, state)?,
            })),
            FormKind::EditProject(id) => {
                let existing = state
                    .project(id)
                    .ok_or_else(|| crate::store::StoreError::ProjectNotFound { id: id.clone() })?;
                Ok(FormSubmission::Project(Project {
                    kind: self.required(0)?,
                    name: self.required(1)?,
                    remarks: self.text(2),
                    deadline: self.date(3)?,
                    current_stage: self.stage(4)?,
                    ..existing.clone()
                }))
            }
            FormKind::NewRawMaterial => Ok(FormSubmission::NewRawMaterial(NewRawMaterial {
                name: self.required(0)?,
                quantity: self.quantity(1)?,
                unit: self.unit(2)?,
            })),
            FormKind::EditRawMaterial(id) => Ok(FormSubmission::RawMaterial(RawMaterial {
                id: id.clone(),
                name: self.required(0)?,
                quantity: self.quantity(1)?,
                unit: self.unit(2)?,
            })),
            FormKind::NewItem => Ok(FormSubmission::NewItem(NewItem {
                name: self.required(0)?,
                material: self.text(1),
                color: self.text(2),
                quantity: self.count(3)?,
                total_cost: self.quantity(4)?,
            })),
            FormKind::EditItem(id) => Ok(FormSubmission::Item(Item {
                id: id.clone(),
                name: self.required(0)?,
                material: self.text(1),
                color: self.text(2),
                quantity: self.count(3)?,
                total_cost: self.quantity(4)?,
            })),
        }
    }

    fn text(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|f| f.value.trim().to_owned())
            .unwrap_or_default()
    }

    fn invalid(&self, index: usize, message: impl Into<String>) -> StateError {
        StateError::InvalidInput {
            field: self
                .fields
                .get(index)
                .map(|f| f.label.to_owned())
                .unwrap_or_default(),
            message: message.into(),
        }
    }

    fn required(&self, index: usize) -> Result<String, StateError> {
        let value = self.text(index);
        if value.is_empty() {
            Err(self.invalid(index, "is required"))
        } else {
            Ok(value)
        }
    }

    fn date(&self, index: usize) -> Result<NaiveDate, StateError> {
        NaiveDate::parse_from_str(&self.required(index)?, DATE_FORMAT)
            .map_err(|_| self.invalid(index, "expected YYYY-MM-DD"))
    }

    fn stage(&self, index: usize) -> Result<ProjectStage, StateError> {
        self.required(index)?
            .parse::<ProjectStage>()
            .map_err(|e| self.invalid(index, e))
    }

    fn unit(&self, index: usize) -> Result<Unit, StateError> {
        self.required(index)?
            .parse::<Unit>()
            .map_err(|e| self.invalid(index, e))
    }

    fn quantity(&self, index: usize) -> Result<f64, StateError> {
        self.required(index)?
            .parse::<f64>()
            .map_err(|_| self.invalid(index, "expected a number"))
    }

    fn count(&self, index: usize) -> Result<u32, StateError> {
        self.required(index)?
            .parse::<u32>()
            .map_err(|_| self.invalid(index, "expected a whole number"))
    }

    /// Resolve comma separated inventory names to ids, case-insensitively.
    ///
    fn material_ids(&self, index: usize, state: &AppState) -> Result<Vec<String>, StateError> {
        self.text(index)
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                state
                    .raw_materials()
                    .iter()
                    .find(|m| m.name.eq_ignore_ascii_case(name))
                    .map(|m| m.id.clone())
                    .ok_or_else(|| self.invalid(index, format!("no material named '{}'", name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut FormState, values: &[&str]) {
        for (field, value) in form.fields.iter_mut().zip(values) {
            field.value = value.to_string();
        }
    }

    #[test]
    fn test_form_kind_view() {
        assert_eq!(FormKind::NewItem.view(), View::Items);
        assert_eq!(FormKind::EditProject("1".into()).view(), View::Projects);
    }

    #[test]
    fn test_typing_goes_to_active_field() {
        let mut form = FormState::new_raw_material();
        for c in "Silk".chars() {
            form.push_char(c);
        }
        form.next_field();
        form.push_char('5');
        form.push_char('0');
        form.pop_char();
        assert_eq!(form.fields[0].value, "Silk");
        assert_eq!(form.fields[1].value, "5");
        form.previous_field();
        form.previous_field();
        assert_eq!(form.active, 2);
    }

    #[test]
    fn test_new_project_resolves_material_names() {
        let state = AppState::seeded();
        let mut form = FormState::new_project();
        fill(
            &mut form,
            &["Saree", "Kanjivaram", "", "2025-03-01", "weaving", "emerald silk, Crimson Cotton"],
        );
        match form.submit(&state).unwrap() {
            FormSubmission::NewProject(draft) => {
                assert_eq!(draft.name, "Kanjivaram");
                assert_eq!(draft.current_stage, ProjectStage::Weaving);
                assert_eq!(draft.material_ids, vec!["3".to_string(), "4".to_string()]);
                assert_eq!(draft.deadline, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
            }
            other => panic!("unexpected submission: {:?}", other),
        }
    }

    #[test]
    fn test_new_project_rejects_unknown_material() {
        let state = AppState::seeded();
        let mut form = FormState::new_project();
        fill(&mut form, &["Saree", "X", "", "2025-03-01", "Weaving", "Gold Leaf"]);
        let error = form.submit(&state).unwrap_err();
        assert!(error.to_string().contains("Gold Leaf"));
    }

    #[test]
    fn test_bad_date_names_the_field() {
        let mut form = FormState::new_project();
        fill(&mut form, &["Shawl", "Pashmina", "", "next week", "Weaving", ""]);
        let error = form.submit(&AppState::default()).unwrap_err();
        assert!(matches!(error, StateError::InvalidInput { ref field, .. } if field.starts_with("Deadline")));
    }

    #[test]
    fn test_required_fields() {
        let form = FormState::new_item();
        let error = form.submit(&AppState::default()).unwrap_err();
        assert_eq!(error.to_string(), "Invalid Name: is required");
    }

    #[test]
    fn test_edit_project_preserves_hidden_fields() {
        let state = AppState::seeded();
        let project = state.project("1").unwrap();
        let mut form = FormState::edit_project(project);
        form.fields[1].value = "Banarasi Bridal Saree".to_string();
        match form.submit(&state).unwrap() {
            FormSubmission::Project(edited) => {
                assert_eq!(edited.name, "Banarasi Bridal Saree");
                assert_eq!(edited.total_time_logged, project.total_time_logged);
                assert_eq!(edited.raw_materials, project.raw_materials);
            }
            other => panic!("unexpected submission: {:?}", other),
        }
    }

    #[test]
    fn test_edit_material_round_trips_values() {
        let state = AppState::seeded();
        let material = state.raw_material("2").unwrap();
        let form = FormState::edit_raw_material(material);
        assert_eq!(
            form.submit(&state).unwrap(),
            FormSubmission::RawMaterial(material.clone())
        );
    }

    #[test]
    fn test_item_quantity_must_be_whole() {
        let mut form = FormState::new_item();
        fill(&mut form, &["Stole", "Cotton", "Indigo", "2.5", "800"]);
        let error = form.submit(&AppState::default()).unwrap_err();
        assert!(error.to_string().contains("whole number"));
    }
}
