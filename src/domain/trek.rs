use serde::{Deserialize, Serialize};

use super::{expense::Expense, person::Person, slug::slugify};

/// Participants and expenses owned by a single trek, in insertion order.
///
/// The `expense` field stays singular to match the persisted snapshot
/// layout of existing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrekExpenseData {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub expense: Vec<Expense>,
}

/// A named group trip. The slug is unique across the whole ledger and is
/// the key every trek-scoped operation addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trek {
    pub trek_name: String,
    pub trek_slug: String,
    #[serde(default)]
    pub trek_expense_data: TrekExpenseData,
}

impl Trek {
    /// Creates an empty trek, deriving the slug from the display name.
    pub fn new(name: impl Into<String>) -> Self {
        let trek_name = name.into();
        Self {
            trek_slug: slugify(&trek_name),
            trek_name,
            trek_expense_data: TrekExpenseData::default(),
        }
    }

    /// Creates an empty trek with an explicit slug.
    pub fn with_slug(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            trek_name: name.into(),
            trek_slug: slug.into(),
            trek_expense_data: TrekExpenseData::default(),
        }
    }

    pub fn person(&self, name: &str) -> Option<&Person> {
        self.trek_expense_data
            .persons
            .iter()
            .find(|person| person.name == name)
    }

    pub fn expense(&self, slug: &str) -> Option<&Expense> {
        self.trek_expense_data
            .expense
            .iter()
            .find(|expense| expense.slug == slug)
    }

    pub fn balance(&self) -> BalanceSummary {
        BalanceSummary::from_trek(self)
    }
}

/// Derived contributed/spent/remaining totals for one trek. Never
/// persisted; always recomputed from the current collections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub contributed: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl BalanceSummary {
    /// Sums contributions against active expenses; archived expenses are
    /// retained in the model but excluded here.
    pub fn from_trek(trek: &Trek) -> Self {
        let contributed: f64 = trek
            .trek_expense_data
            .persons
            .iter()
            .map(|person| person.contribution_amount)
            .sum();
        let spent: f64 = trek
            .trek_expense_data
            .expense
            .iter()
            .filter(|expense| expense.is_active)
            .map(|expense| expense.amount)
            .sum();
        Self {
            contributed,
            spent,
            remaining: contributed - spent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_derived_from_name() {
        let trek = Trek::new("Everest Base Camp");
        assert_eq!(trek.trek_slug, "everest-base-camp");
        assert!(trek.trek_expense_data.persons.is_empty());
    }

    #[test]
    fn balance_ignores_archived_expenses() {
        let mut trek = Trek::new("ABC");
        trek.trek_expense_data
            .persons
            .push(Person::new("A", 1000.0));
        trek.trek_expense_data
            .expense
            .push(Expense::new("food", 300.0, ""));
        let mut archived = Expense::new("tents", 250.0, "");
        archived.is_active = false;
        trek.trek_expense_data.expense.push(archived);

        let balance = trek.balance();
        assert_eq!(balance.contributed, 1000.0);
        assert_eq!(balance.spent, 300.0);
        assert_eq!(balance.remaining, 700.0);
    }

    #[test]
    fn snapshot_layout_uses_camel_case_keys() {
        let trek = Trek::new("ABC");
        let json = serde_json::to_string(&trek).expect("serialize trek");
        assert!(json.contains("\"trekName\""));
        assert!(json.contains("\"trekSlug\""));
        assert!(json.contains("\"trekExpenseData\""));
    }
}
