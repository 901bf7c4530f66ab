use std::path::PathBuf;
use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;
use tracing::warn;

use crate::cli::output::ConsoleSink;
use crate::cli::table::{Table, TableColumn};
use crate::cli::{io, output};
use crate::config::{Config, ConfigManager};
use crate::domain::{Expense, Person, Trek};
use crate::errors::TrekError;
use crate::report::ExpenseReport;
use crate::storage::JsonFileStore;
use crate::store::TrekStore;
use crate::utils::format_amount;

/// Flow decisions returned by command handlers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Failure while executing a single command; reported inline, the shell
/// keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] TrekError),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}

/// Fatal shell errors; everything command-level stays a [`CommandError`].
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrekError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(TrekError::Io(err))
    }
}

const COMMAND_HELP: &[(&str, &str)] = &[
    ("treks", "List all treks with their running balances"),
    ("trek add <name>", "Create a trek (slug derived from the name)"),
    ("trek remove <slug>", "Delete a trek and everything it owns"),
    (
        "person add <trek-slug> <name> <amount>",
        "Add a trekker and their contribution",
    ),
    ("person remove <trek-slug> <name>", "Remove a trekker"),
    (
        "expense add <trek-slug> <name> <amount> [note]",
        "Record a shared expense",
    ),
    (
        "expense remove <trek-slug> <expense-slug>",
        "Delete an expense",
    ),
    (
        "expense toggle <trek-slug> <expense-slug>",
        "Archive or restore an expense",
    ),
    (
        "expenses <trek-slug> [--archived]",
        "List active (or archived) expenses",
    ),
    ("balance <trek-slug>", "Show contributed / spent / remaining"),
    ("export <trek-slug> [path]", "Write the HTML expense report"),
    ("clear", "Remove every trek"),
    ("quit", "Leave the shell"),
];

/// Shared CLI runtime state: the store, user preferences, and the
/// interaction mode.
pub struct ShellContext {
    store: TrekStore,
    config: Config,
    config_manager: ConfigManager,
    theme: ColorfulTheme,
    mode: CliMode,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let snapshots = Arc::new(JsonFileStore::new_default()?);
        let store = TrekStore::open(snapshots, Arc::new(ConsoleSink));
        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!("falling back to default configuration: {err}");
                Config::default()
            }
        };
        Ok(Self {
            store,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            mode,
            running: true,
        })
    }

    pub fn command_names() -> Vec<&'static str> {
        vec![
            "treks", "trek", "person", "expense", "expenses", "balance", "export", "clear",
            "help", "quit", "exit",
        ]
    }

    pub fn prompt(&self) -> String {
        match self.config.last_opened_trek.as_deref() {
            Some(slug) => format!("trek ({slug})> "),
            None => "trek> ".into(),
        }
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(err);
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(io::confirm_action(&self.theme, "Exit the shell?", true)?)
    }

    /// Joins outstanding snapshot writes before the process exits.
    pub fn shutdown(&mut self) {
        self.store.flush();
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "treks" => self.cmd_treks(),
            "trek" => self.cmd_trek(args),
            "person" => self.cmd_person(args),
            "expense" => self.cmd_expense(args),
            "expenses" => self.cmd_expenses(args),
            "balance" => self.cmd_balance(args),
            "export" => self.cmd_export(args),
            "clear" => self.cmd_clear(),
            "help" => self.cmd_help(),
            "quit" | "exit" => return Ok(LoopControl::Exit),
            other => self.unknown_command(other),
        }?;
        Ok(LoopControl::Continue)
    }

    fn cmd_treks(&self) -> Result<(), CommandError> {
        if self.store.is_empty() {
            output::info("No treks yet. Create one with `trek add <name>`.");
            return Ok(());
        }
        let mut table = Table::new(vec![
            TableColumn::new("Trek"),
            TableColumn::new("Slug"),
            TableColumn::right("Trekkers"),
            TableColumn::right("Expenses"),
            TableColumn::right("Remaining"),
        ]);
        for trek in self.store.treks() {
            let balance = trek.balance();
            table.push_row(vec![
                trek.trek_name.clone(),
                trek.trek_slug.clone(),
                trek.trek_expense_data.persons.len().to_string(),
                trek.trek_expense_data.expense.len().to_string(),
                self.money(balance.remaining),
            ]);
        }
        println!("{}", table.render());
        Ok(())
    }

    fn cmd_trek(&mut self, args: &[&str]) -> Result<(), CommandError> {
        match args.first().copied() {
            Some("add") => {
                let joined = args[1..].join(" ");
                let name = if joined.trim().is_empty() {
                    if self.mode == CliMode::Script {
                        return Err(CommandError::Input("usage: trek add <name>".into()));
                    }
                    io::prompt_text(&self.theme, "Trek name")?
                } else {
                    joined
                };
                self.store.add_trek(Trek::new(name.trim()));
                Ok(())
            }
            Some("remove") => {
                let slug = args.get(1).copied().ok_or_else(|| {
                    CommandError::Input("usage: trek remove <slug>".into())
                })?;
                if !self.confirm(&format!("Remove trek `{slug}` and everything it owns?"))? {
                    return Ok(());
                }
                self.store.remove_trek(slug);
                Ok(())
            }
            _ => Err(CommandError::Input(
                "usage: trek add <name> | trek remove <slug>".into(),
            )),
        }
    }

    fn cmd_person(&mut self, args: &[&str]) -> Result<(), CommandError> {
        match args.first().copied() {
            Some("add") => {
                let (slug, name, raw_amount) = match (args.get(1), args.get(2), args.get(3)) {
                    (Some(slug), Some(name), Some(amount)) => (*slug, *name, *amount),
                    _ => {
                        return Err(CommandError::Input(
                            "usage: person add <trek-slug> <name> <amount>".into(),
                        ))
                    }
                };
                self.store
                    .add_person(slug, Person::new(name, parse_contribution(raw_amount)));
                Ok(())
            }
            Some("remove") => {
                let (slug, name) = match (args.get(1), args.get(2)) {
                    (Some(slug), Some(name)) => (*slug, *name),
                    _ => {
                        return Err(CommandError::Input(
                            "usage: person remove <trek-slug> <name>".into(),
                        ))
                    }
                };
                self.store.remove_person(slug, name);
                Ok(())
            }
            _ => Err(CommandError::Input(
                "usage: person add <trek-slug> <name> <amount> | person remove <trek-slug> <name>"
                    .into(),
            )),
        }
    }

    fn cmd_expense(&mut self, args: &[&str]) -> Result<(), CommandError> {
        match args.first().copied() {
            Some("add") => {
                let (slug, name, raw_amount) = match (args.get(1), args.get(2), args.get(3)) {
                    (Some(slug), Some(name), Some(amount)) => (*slug, *name, *amount),
                    _ => {
                        return Err(CommandError::Input(
                            "usage: expense add <trek-slug> <name> <amount> [note]".into(),
                        ))
                    }
                };
                let description = args[4..].join(" ");
                self.store.add_expense(
                    slug,
                    Expense::new(name, parse_amount(raw_amount), description),
                );
                Ok(())
            }
            Some("remove") => {
                let (slug, expense_slug) = two_args(args, "expense remove")?;
                self.store.remove_expense(slug, expense_slug);
                Ok(())
            }
            Some("toggle") => {
                let (slug, expense_slug) = two_args(args, "expense toggle")?;
                self.store.toggle_expense_active(slug, expense_slug);
                Ok(())
            }
            _ => Err(CommandError::Input(
                "usage: expense add|remove|toggle ...".into(),
            )),
        }
    }

    fn cmd_expenses(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let slug = args.first().copied().ok_or_else(|| {
            CommandError::Input("usage: expenses <trek-slug> [--archived]".into())
        })?;
        let archived = args.contains(&"--archived");
        let Some(trek) = self.store.trek(slug) else {
            output::error(format!("Trek `{slug}` not found"));
            return Ok(());
        };
        let mut table = Table::new(vec![
            TableColumn::new("Date"),
            TableColumn::new("Name"),
            TableColumn::new("Slug"),
            TableColumn::right("Amount"),
        ]);
        let mut rows = 0;
        for expense in trek
            .trek_expense_data
            .expense
            .iter()
            .filter(|expense| expense.is_active != archived)
        {
            table.push_row(vec![
                expense.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                expense.name.clone(),
                expense.slug.clone(),
                self.money(expense.amount),
            ]);
            rows += 1;
        }
        if rows == 0 {
            output::info(if archived {
                "No archived expenses"
            } else {
                "No active expenses"
            });
        } else {
            println!("{}", table.render());
        }
        self.remember_trek(slug);
        Ok(())
    }

    fn cmd_balance(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let slug = args
            .first()
            .copied()
            .ok_or_else(|| CommandError::Input("usage: balance <trek-slug>".into()))?;
        let Some(summary) = self.store.balance(slug) else {
            output::error(format!("Trek `{slug}` not found"));
            return Ok(());
        };
        output::section("Balance");
        println!("Total contributed: {}", self.money(summary.contributed));
        println!("Total expenses: {}", self.money(summary.spent));
        println!("Remaining: {}", self.money(summary.remaining));
        self.remember_trek(slug);
        Ok(())
    }

    fn cmd_export(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let slug = args
            .first()
            .copied()
            .ok_or_else(|| CommandError::Input("usage: export <trek-slug> [path]".into()))?;
        let Some(trek) = self.store.trek(slug) else {
            output::error(format!("Trek `{slug}` not found"));
            return Ok(());
        };
        let report = ExpenseReport::from_trek(trek, &self.config.currency);
        let path = match args.get(1) {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(report.default_file_name()),
        };
        report.write_to(&path)?;
        output::success(format!(
            "Report with {} expense(s) written to {}",
            report.row_count(),
            path.display()
        ));
        self.remember_trek(slug);
        Ok(())
    }

    fn cmd_clear(&mut self) -> Result<(), CommandError> {
        if !self.confirm("Remove every trek?")? {
            return Ok(());
        }
        self.store.clear_all();
        Ok(())
    }

    fn cmd_help(&self) -> Result<(), CommandError> {
        output::section("Commands");
        for (usage, blurb) in COMMAND_HELP {
            println!("  {usage:<48} {blurb}");
        }
        Ok(())
    }

    fn unknown_command(&self, raw: &str) -> Result<(), CommandError> {
        let suggestion = Self::command_names()
            .into_iter()
            .map(|name| (levenshtein(raw, name), name))
            .min()
            .filter(|(distance, _)| *distance <= 2)
            .map(|(_, name)| name);
        match suggestion {
            Some(name) => {
                output::warning(format!("Unknown command `{raw}`. Did you mean `{name}`?"))
            }
            None => output::warning(format!(
                "Unknown command `{raw}`. Type `help` to list commands."
            )),
        }
        Ok(())
    }

    fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(io::confirm_action(&self.theme, prompt, false)?)
    }

    fn money(&self, value: f64) -> String {
        format!("{} {}", self.config.currency, format_amount(value))
    }

    fn remember_trek(&mut self, slug: &str) {
        if self.config.last_opened_trek.as_deref() == Some(slug) {
            return;
        }
        self.config.last_opened_trek = Some(slug.to_string());
        if let Err(err) = self.config_manager.save(&self.config) {
            warn!("failed to save configuration: {err}");
        }
    }
}

fn two_args<'a>(args: &[&'a str], usage: &str) -> Result<(&'a str, &'a str), CommandError> {
    match (args.get(1), args.get(2)) {
        (Some(first), Some(second)) => Ok((*first, *second)),
        _ => Err(CommandError::Input(format!(
            "usage: {usage} <trek-slug> <expense-slug>"
        ))),
    }
}

/// Numeric form input: unparseable or non-finite text coerces to zero.
fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Contributions are additionally clamped to be non-negative.
fn parse_contribution(raw: &str) -> f64 {
    parse_amount(raw).max(0.0)
}
