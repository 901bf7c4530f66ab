use crossterm::terminal;

/// Describes how a column aligns its contents.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

pub struct TableColumn {
    pub header: String,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Right,
        }
    }
}

/// Plain-text table sized to the terminal. Columns grow to their widest
/// cell, then the widest column shrinks until the table fits.
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let mut out = String::new();
        out.push_str(&self.render_row(&headers, &widths));
        out.push('\n');
        out.push_str(&rule(&widths));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&self.render_row(row, &widths));
        }
        out
    }

    fn compute_widths(&self) -> Vec<usize> {
        let max_total = terminal_width();
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|column| column.header.chars().count())
            .collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        loop {
            let total: usize =
                widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
            if total <= max_total {
                break;
            }
            let Some(widest) = widths.iter_mut().max() else {
                break;
            };
            if *widest <= 8 {
                break;
            }
            *widest -= 1;
        }
        widths
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                let width = widths[idx];
                let truncated = truncate(text, width);
                match column.alignment {
                    Alignment::Left => format!("{truncated:<width$}"),
                    Alignment::Right => format!("{truncated:>width$}"),
                }
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    }
}

fn rule(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut kept: String = text.chars().take(width.saturating_sub(1)).collect();
    kept.push('…');
    kept
}

fn terminal_width() -> usize {
    terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(100)
        .max(40)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_rule_and_rows() {
        let mut table = Table::new(vec![TableColumn::new("Name"), TableColumn::right("Amount")]);
        table.push_row(vec!["food".into(), "300".into()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].contains("food"));
        assert!(lines[2].trim_end().ends_with("300"));
    }

    #[test]
    fn right_alignment_pads_left() {
        let mut table = Table::new(vec![TableColumn::right("Amount")]);
        table.push_row(vec!["7".into()]);
        let rendered = table.render();
        assert!(rendered.lines().last().unwrap().ends_with('7'));
    }
}
