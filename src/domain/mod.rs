//! Trek domain models and helpers, shaped for JSON persistence.

pub mod expense;
pub mod person;
pub mod trek;

mod slug;

pub use expense::Expense;
pub use person::Person;
pub use slug::slugify;
pub use trek::{BalanceSummary, Trek, TrekExpenseData};

/// Amounts are always finite; anything else collapses to zero.
pub(crate) fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
