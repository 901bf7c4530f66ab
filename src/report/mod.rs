//! Expense report rendering.
//!
//! Produces the HTML table document the sharing/printing collaborator
//! consumes: one row per active expense, insertion order, with the trek's
//! display name as the heading. Archived expenses never appear.

use std::{fs, path::Path};

use crate::domain::Trek;
use crate::errors::Result;
use crate::utils::{ensure_dir, format_amount};

pub struct ExpenseReport {
    title: String,
    rows: Vec<ReportRow>,
}

struct ReportRow {
    when: String,
    name: String,
    amount: String,
}

impl ExpenseReport {
    /// Collects the trek's active expenses into report rows.
    pub fn from_trek(trek: &Trek, currency: &str) -> Self {
        let rows = trek
            .trek_expense_data
            .expense
            .iter()
            .filter(|expense| expense.is_active)
            .map(|expense| ReportRow {
                when: expense.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                name: expense.name.clone(),
                amount: format!("{} {}", currency, format_amount(expense.amount)),
            })
            .collect();
        Self {
            title: trek.trek_name.clone(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the full document.
    pub fn to_html(&self) -> String {
        let mut doc = String::new();
        doc.push_str("<html>\n<head>\n<style>\n");
        doc.push_str("body { font-family: sans-serif; padding: 24px }\n");
        doc.push_str("table { border-collapse: collapse; width: 100% }\n");
        doc.push_str("th, td { text-align: left; padding: 8px; border: 1px solid #ddd }\n");
        doc.push_str("th { background: #f3f4f6 }\n");
        doc.push_str("</style>\n</head>\n<body>\n");
        doc.push_str(&format!("<h2>{} - Expenses</h2>\n", escape(&self.title)));
        doc.push_str("<table>\n<thead>\n");
        doc.push_str("<tr><th>Date</th><th>Name</th><th>Amount</th></tr>\n");
        doc.push_str("</thead>\n<tbody>\n");
        for row in &self.rows {
            doc.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&row.when),
                escape(&row.name),
                escape(&row.amount),
            ));
        }
        doc.push_str("</tbody>\n</table>\n</body>\n</html>\n");
        doc
    }

    /// Writes the document to `path`, creating parent directories as
    /// needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }
        fs::write(path, self.to_html())?;
        Ok(())
    }

    /// Default file name: the trek name with whitespace collapsed to
    /// underscores, matching the exported-document naming users already
    /// have on disk.
    pub fn default_file_name(&self) -> String {
        let stem = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        if stem.is_empty() {
            "trek_expenses.html".into()
        } else {
            format!("{stem}_expenses.html")
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Expense, Person, Trek};

    fn sample_trek() -> Trek {
        let mut trek = Trek::new("Annapurna Circuit");
        trek.trek_expense_data
            .persons
            .push(Person::new("A", 1000.0));
        trek.trek_expense_data
            .expense
            .push(Expense::new("food", 300.0, ""));
        let mut archived = Expense::new("porter fees", 450.0, "split later");
        archived.is_active = false;
        trek.trek_expense_data.expense.push(archived);
        trek
    }

    #[test]
    fn report_lists_active_expenses_only() {
        let report = ExpenseReport::from_trek(&sample_trek(), "Rs");
        assert_eq!(report.row_count(), 1);
        let html = report.to_html();
        assert!(html.contains("Annapurna Circuit - Expenses"));
        assert!(html.contains("<td>food</td>"));
        assert!(html.contains("Rs 300"));
        assert!(!html.contains("porter fees"));
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let mut trek = Trek::new("ABC");
        trek.trek_expense_data
            .expense
            .push(Expense::new("<script>", 10.0, ""));
        let html = ExpenseReport::from_trek(&trek, "Rs").to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn default_file_name_collapses_whitespace() {
        let report = ExpenseReport::from_trek(&sample_trek(), "Rs");
        assert_eq!(report.default_file_name(), "Annapurna_Circuit_expenses.html");
    }

    #[test]
    fn write_to_creates_the_file() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let path = temp.path().join("reports").join("out.html");
        let report = ExpenseReport::from_trek(&sample_trek(), "Rs");
        report.write_to(&path).expect("write report");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("<td>food</td>"));
    }
}
