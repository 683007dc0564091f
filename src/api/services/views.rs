//! Template-facing shapes

use serde::Serialize;

use crate::storage::Bug;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A bug flattened for templates, timestamps pre-formatted
#[derive(Debug, Clone, Serialize)]
pub struct BugView {
    pub id: i32,
    pub title: String,
    pub state: String,
    pub state_label: &'static str,
    pub owner: String,
    pub text: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Bug> for BugView {
    fn from(bug: &Bug) -> Self {
        Self {
            id: bug.id,
            title: bug.title.clone(),
            state: bug.state.to_string(),
            state_label: bug.state.label(),
            owner: bug.owner.clone(),
            text: bug.text.clone(),
            created_at: bug.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: bug.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
