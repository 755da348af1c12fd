//! Route table
//!
//! Three navigable paths; everything else (including the root) redirects
//! to the employee list.

/// A navigable screen address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/employee/all` - the directory list
    EmployeeAll,
    /// `/employee/add` - create form
    EmployeeAdd,
    /// `/employee/update/{id}` - edit form
    EmployeeUpdate(String),
}

impl Route {
    /// Parse a path into a route. Unknown paths redirect to the list.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["employee", "all"] => Route::EmployeeAll,
            ["employee", "add"] => Route::EmployeeAdd,
            ["employee", "update", id] => Route::EmployeeUpdate((*id).to_string()),
            _ => Route::EmployeeAll,
        }
    }

    /// The canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::EmployeeAll => "/employee/all".into(),
            Route::EmployeeAdd => "/employee/add".into(),
            Route::EmployeeUpdate(id) => format!("/employee/update/{id}"),
        }
    }
}
