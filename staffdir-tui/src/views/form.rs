//! Form view: create and edit modes
//!
//! Create mode starts from empty defaults; edit mode waits for the
//! employee to arrive before rendering. Submission validates every field
//! locally and only then hands the app a create or update intent.

use crossterm::event::{Event, KeyEvent};
use shared::Employee;
use std::collections::BTreeSet;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::utils::validation::{ErrorKind, FieldRules, MIN_TEXT_LEN};

/// Stable identifiers for the form's fields, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Id,
    Name,
    Email,
    JobTitle,
    Phone,
    ImageUrl,
    EmployeeCode,
}

/// One field: its live value, whether the user touched it, and the
/// validation failures currently standing against it
pub struct FieldState {
    pub id: FieldId,
    pub label: &'static str,
    pub input: Input,
    pub touched: bool,
    pub errors: BTreeSet<ErrorKind>,
    rules: FieldRules,
}

impl FieldState {
    fn new(id: FieldId, label: &'static str, rules: FieldRules, value: &str) -> Self {
        Self {
            id,
            label,
            input: Input::new(value.to_string()),
            touched: false,
            errors: BTreeSet::new(),
            rules,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    fn validate(&mut self) {
        self.errors = self.rules.check(self.value());
    }
}

/// What a valid submission asks the app to do
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    Create(Employee),
    Update(Employee),
}

pub struct FormView {
    /// Route parameter; `None` selects create mode
    pub route_id: Option<String>,
    pub fields: Vec<FieldState>,
    pub focus: usize,
    /// A submit attempt ran into invalid fields
    pub submitted: bool,
    /// Fields are populated and the form may render
    pub loaded: bool,
    /// A create/update call is in flight
    pub saving: bool,
    /// Transport failure banner (fatal when the edit load itself failed)
    pub error: Option<String>,
}

impl FormView {
    /// Create-mode form: empty defaults, immediately ready
    pub fn create() -> Self {
        Self {
            route_id: None,
            fields: Self::build_fields(&Employee::default()),
            focus: 0,
            submitted: false,
            loaded: true,
            saving: false,
            error: None,
        }
    }

    /// Edit-mode form: not ready until the employee arrives
    pub fn edit(route_id: String) -> Self {
        Self {
            route_id: Some(route_id),
            fields: Vec::new(),
            focus: 0,
            submitted: false,
            loaded: false,
            saving: false,
            error: None,
        }
    }

    fn build_fields(employee: &Employee) -> Vec<FieldState> {
        vec![
            FieldState::new(
                FieldId::Id,
                "Id",
                FieldRules::none(),
                employee.id.as_deref().unwrap_or(""),
            ),
            FieldState::new(
                FieldId::Name,
                "Name",
                FieldRules::required_min(MIN_TEXT_LEN),
                &employee.name,
            ),
            FieldState::new(
                FieldId::Email,
                "Email",
                FieldRules::required_email(),
                &employee.email,
            ),
            FieldState::new(
                FieldId::JobTitle,
                "Job title",
                FieldRules::required_min(MIN_TEXT_LEN),
                &employee.job_title,
            ),
            FieldState::new(FieldId::Phone, "Phone", FieldRules::required(), &employee.phone),
            FieldState::new(
                FieldId::ImageUrl,
                "Image URL",
                FieldRules::required(),
                &employee.image_url,
            ),
            FieldState::new(
                FieldId::EmployeeCode,
                "Employee code",
                FieldRules::none(),
                &employee.employee_code,
            ),
        ]
    }

    /// Pre-fill every field from the backend record and become ready
    pub fn employee_loaded(&mut self, employee: &Employee) {
        self.fields = Self::build_fields(employee);
        self.loaded = true;
    }

    /// The edit load failed; the form cannot recover
    pub fn load_failed(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Whether the view is stuck on a failed edit load
    pub fn is_fatal(&self) -> bool {
        !self.loaded && self.error.is_some()
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Feed a key into the focused field
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !self.loaded || self.saving {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.focus) {
            let changed = field
                .input
                .handle_event(&Event::Key(key))
                .is_some_and(|change| change.value);
            if changed {
                field.touched = true;
                field.validate();
            }
        }
    }

    /// Validate everything; return the call to make when the form is valid.
    ///
    /// With any rule failing, the submitted flag is raised and no intent is
    /// produced, so nothing reaches the backend.
    pub fn submit(&mut self) -> Option<SubmitAction> {
        if !self.loaded || self.saving {
            return None;
        }

        for field in &mut self.fields {
            field.validate();
        }
        if self.fields.iter().any(|f| !f.errors.is_empty()) {
            self.submitted = true;
            return None;
        }

        let employee = self.collect();
        // Edit identity comes from the route; the payload id stays whatever
        // the id field holds.
        Some(if self.route_id.is_some() {
            SubmitAction::Update(employee)
        } else {
            SubmitAction::Create(employee)
        })
    }

    /// The create/update call failed; stay put and show it
    pub fn save_failed(&mut self, message: String) {
        self.saving = false;
        self.error = Some(message);
    }

    fn collect(&self) -> Employee {
        let value = |id: FieldId| {
            self.field(id)
                .map(|f| f.value().to_string())
                .unwrap_or_default()
        };

        let id = value(FieldId::Id);
        Employee {
            id: if id.is_empty() { None } else { Some(id) },
            name: value(FieldId::Name),
            email: value(FieldId::Email),
            job_title: value(FieldId::JobTitle),
            phone: value(FieldId::Phone),
            image_url: value(FieldId::ImageUrl),
            employee_code: value(FieldId::EmployeeCode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn type_str(form: &mut FormView, text: &str) {
        for ch in text.chars() {
            form.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
    }

    fn fill_valid(form: &mut FormView) {
        // focus starts on Id; leave it alone
        form.focus_next();
        type_str(form, "Ann");
        form.focus_next();
        type_str(form, "ann@corp.com");
        form.focus_next();
        type_str(form, "Engineer");
        form.focus_next();
        type_str(form, "555-0101");
        form.focus_next();
        type_str(form, "https://img.example/ann.png");
    }

    #[test]
    fn create_mode_is_ready_immediately() {
        let form = FormView::create();
        assert!(form.loaded);
        assert!(form.route_id.is_none());
        assert_eq!(form.fields.len(), 7);
        assert!(form.fields.iter().all(|f| f.value().is_empty()));
    }

    #[test]
    fn invalid_submit_raises_flag_and_produces_no_intent() {
        let mut form = FormView::create();
        form.focus_next();
        type_str(&mut form, "Al"); // two chars, below the minimum

        assert!(form.submit().is_none());
        assert!(form.submitted);
        let name = form.field(FieldId::Name).unwrap();
        assert!(name.errors.contains(&ErrorKind::MinLength));
        let email = form.field(FieldId::Email).unwrap();
        assert!(email.errors.contains(&ErrorKind::Required));
    }

    #[test]
    fn valid_create_submit_carries_entered_values() {
        let mut form = FormView::create();
        fill_valid(&mut form);

        match form.submit() {
            Some(SubmitAction::Create(emp)) => {
                assert_eq!(emp.id, None);
                assert_eq!(emp.name, "Ann");
                assert_eq!(emp.email, "ann@corp.com");
                assert_eq!(emp.job_title, "Engineer");
                assert_eq!(emp.employee_code, "");
            }
            other => panic!("expected create intent, got {other:?}"),
        }
        assert!(!form.submitted);
    }

    #[test]
    fn edit_submit_uses_the_id_field_not_the_route() {
        let mut form = FormView::edit("9".into());
        assert!(!form.loaded);

        // Backend record carries a different id than the route segment
        form.employee_loaded(&Employee {
            id: Some("7".into()),
            name: "Ann".into(),
            email: "ann@corp.com".into(),
            job_title: "Engineer".into(),
            phone: "555-0101".into(),
            image_url: "img".into(),
            employee_code: String::new(),
        });
        assert!(form.loaded);

        match form.submit() {
            Some(SubmitAction::Update(emp)) => assert_eq!(emp.id.as_deref(), Some("7")),
            other => panic!("expected update intent, got {other:?}"),
        }
    }

    #[test]
    fn edit_load_populates_every_field_including_empty_ones() {
        let mut form = FormView::edit("7".into());
        form.employee_loaded(&Employee {
            id: Some("7".into()),
            name: "Ann".into(),
            email: "ann@corp.com".into(),
            job_title: "Engineer".into(),
            phone: String::new(),
            image_url: String::new(),
            employee_code: "EMP-001".into(),
        });

        assert_eq!(form.field(FieldId::Id).unwrap().value(), "7");
        assert_eq!(form.field(FieldId::Phone).unwrap().value(), "");
        assert_eq!(form.field(FieldId::ImageUrl).unwrap().value(), "");
        assert_eq!(form.field(FieldId::EmployeeCode).unwrap().value(), "EMP-001");
    }

    #[test]
    fn typing_marks_the_field_touched_and_revalidates() {
        let mut form = FormView::create();
        form.focus_next(); // Name
        assert!(!form.field(FieldId::Name).unwrap().touched);

        type_str(&mut form, "Jo");
        let name = form.field(FieldId::Name).unwrap();
        assert!(name.touched);
        assert!(name.errors.contains(&ErrorKind::MinLength));

        type_str(&mut form, "e");
        assert!(form.field(FieldId::Name).unwrap().errors.is_empty());
    }

    #[test]
    fn failed_save_keeps_values_and_shows_the_error() {
        let mut form = FormView::create();
        fill_valid(&mut form);
        assert!(form.submit().is_some());

        form.saving = true;
        form.save_failed("server returned 500: boom".into());

        assert!(!form.saving);
        assert!(!form.is_fatal());
        assert_eq!(form.error.as_deref(), Some("server returned 500: boom"));
        assert_eq!(form.field(FieldId::Name).unwrap().value(), "Ann");
    }

    #[test]
    fn failed_edit_load_is_fatal() {
        let mut form = FormView::edit("404".into());
        form.load_failed("employee not found: 404".into());
        assert!(form.is_fatal());
        assert!(form.submit().is_none());
    }

    #[test]
    fn no_double_submit_while_saving() {
        let mut form = FormView::create();
        fill_valid(&mut form);
        assert!(form.submit().is_some());
        form.saving = true;
        assert!(form.submit().is_none());
    }
}
