//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee record as exchanged with the directory backend.
///
/// `id` is assigned and owned by the backend; a draft record (form state
/// before creation) has no id yet. Ids are opaque strings end to end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub phone: String,
    pub image_url: String,
    /// Optional internal code, not validated anywhere.
    #[serde(default)]
    pub employee_code: String,
}

impl Employee {
    /// Whether this record exists on the backend.
    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
