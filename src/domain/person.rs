use serde::{Deserialize, Serialize};

use super::sanitize_amount;

/// A trip participant and the money they have pooled in. The name is the
/// natural key, unique within the owning trek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub contribution_amount: f64,
    pub is_active: bool,
}

impl Person {
    pub fn new(name: impl Into<String>, contribution_amount: f64) -> Self {
        Self {
            name: name.into(),
            contribution_amount: sanitize_amount(contribution_amount),
            is_active: true,
        }
    }
}
