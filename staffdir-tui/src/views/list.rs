//! List view: the employee directory table
//!
//! The backend is the sole source of truth: every load replaces the whole
//! list, and a delete triggers a re-fetch instead of splicing rows out.

use ratatui::widgets::TableState;
use shared::Employee;

pub struct ListView {
    /// Absent until the first load completes
    pub employees: Option<Vec<Employee>>,
    pub table: TableState,
    /// Visible banner for a failed load or delete
    pub error: Option<String>,
    /// A list fetch or delete is in flight
    pub busy: bool,
}

impl ListView {
    /// New view; the app issues the initial list fetch on activation
    pub fn new() -> Self {
        Self {
            employees: None,
            table: TableState::default(),
            error: None,
            busy: true,
        }
    }

    /// Replace the list wholesale with freshly fetched data
    pub fn loaded(&mut self, employees: Vec<Employee>) {
        self.busy = false;
        self.error = None;

        let selected = if employees.is_empty() {
            None
        } else {
            // Keep the cursor near where it was, clamped to the new length
            Some(self.table.selected().unwrap_or(0).min(employees.len() - 1))
        };
        self.table.select(selected);
        self.employees = Some(employees);
    }

    /// Keep whatever is on screen and show the failure
    pub fn load_failed(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }

    pub fn select_next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let next = match self.table.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.table.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.len() == 0 {
            return;
        }
        let prev = self.table.selected().unwrap_or(0).saturating_sub(1);
        self.table.select(Some(prev));
    }

    /// Id of the employee under the cursor, if any
    pub fn selected_id(&self) -> Option<String> {
        let employees = self.employees.as_ref()?;
        let index = self.table.selected()?;
        employees.get(index)?.id.clone()
    }

    pub fn len(&self) -> usize {
        self.employees.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}
