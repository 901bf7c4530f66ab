use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{sanitize_amount, slugify};

/// A recorded cost against a trek. Archived expenses (`is_active == false`)
/// stay in the ledger but stop counting toward the current spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub name: String,
    pub slug: String,
    pub amount: f64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub is_active: bool,
}

impl Expense {
    /// Creates an active expense stamped with the current time. The slug is
    /// derived from the name once and is the lookup key ever after.
    pub fn new(name: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            amount: sanitize_amount(amount),
            description: description.into(),
            timestamp: Utc::now(),
            is_active: true,
        }
    }
}
