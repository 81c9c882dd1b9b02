use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;

use crate::chart::{self, Projection};
use crate::config::AppConfig;
use crate::db::Database;
use crate::filter::{self, DateRange};
use crate::models::{parse_date, Currency, ExpenseForm, ExpenseId};
use crate::store::{DeleteOutcome, ExpenseStore};
use crate::ui::util::truncate;
use crate::view::DashboardView;

const BAR_WIDTH: usize = 40;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Record a new expense
    Add {
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        amount: String,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Debit or Credit (default: Debit)
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// List expenses, newest first (default: current month)
    List {
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Replace an expense, keeping any field not given
    Edit {
        id: i64,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Delete an expense
    Delete { id: i64 },
    /// Plot amounts over time as text bars
    Chart {
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Export expenses to CSV
    Export {
        path: Option<String>,
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
}

pub(crate) fn as_cli(
    command: CliCommand,
    mut store: ExpenseStore<Database>,
    config: &AppConfig,
) -> Result<()> {
    store.load().context("Failed to load expenses")?;
    let mut stdout = std::io::stdout().lock();
    let currency = Currency::new(config.currency_symbol.as_str());
    run_command(command, &mut store, &currency, &mut stdout)
}

fn run_command(
    command: CliCommand,
    store: &mut ExpenseStore<Database>,
    currency: &Currency,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        CliCommand::Add {
            description,
            amount,
            date,
            category,
            kind,
        } => {
            let form = ExpenseForm {
                description,
                amount,
                date: date.unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
                category: category.unwrap_or_default(),
                kind: kind.unwrap_or_default(),
            };
            cli_add(store, form, out)
        }
        CliCommand::List { from, to } => cli_list(store, DateRange::new(from, to), currency, out),
        CliCommand::Edit {
            id,
            description,
            amount,
            date,
            category,
            kind,
        } => {
            let overrides = ExpenseForm {
                description: description.unwrap_or_default(),
                amount: amount.unwrap_or_default(),
                date: date.unwrap_or_default(),
                category: category.unwrap_or_default(),
                kind: kind.unwrap_or_default(),
            };
            cli_edit(store, ExpenseId(id), overrides, out)
        }
        CliCommand::Delete { id } => cli_delete(store, ExpenseId(id), out),
        CliCommand::Chart { from, to } => cli_chart(store, DateRange::new(from, to), currency, out),
        CliCommand::Export { path, from, to } => {
            cli_export(store, path, DateRange::new(from, to), out)
        }
    }
}

fn cli_add(
    store: &mut ExpenseStore<Database>,
    form: ExpenseForm,
    out: &mut impl Write,
) -> Result<()> {
    let draft = form.validate()?;
    let id = store.create(draft)?;
    writeln!(out, "Added expense {id}")?;
    Ok(())
}

fn cli_list(
    store: &ExpenseStore<Database>,
    range: DateRange,
    currency: &Currency,
    out: &mut impl Write,
) -> Result<()> {
    let today = Local::now().date_naive();
    let view = DashboardView::compute(store.expenses(), range, today, store.revision());

    writeln!(out, "Spendboard: {}", range.describe(today))?;
    writeln!(out, "{}", "─".repeat(78))?;
    if view.visible.is_empty() {
        writeln!(out, "No expenses")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<6} {:<10} {:<30} {:<18} {:>10}",
        "ID", "Date", "Description", "Category", "Amount"
    )?;
    for e in &view.visible {
        writeln!(
            out,
            "{:<6} {:<10} {:<30} {:<18} {:>10}",
            e.id.0,
            e.date.format("%Y-%m-%d"),
            truncate(&e.description, 30),
            e.category.as_str(),
            currency.entry(e),
        )?;
    }
    writeln!(out, "{}", "─".repeat(78))?;
    writeln!(
        out,
        "{} expenses, total {}",
        view.visible.len(),
        currency.format(view.total)
    )?;
    Ok(())
}

/// Full-record replace: start from the stored record and overlay whatever
/// fields were given.
fn cli_edit(
    store: &mut ExpenseStore<Database>,
    id: ExpenseId,
    overrides: ExpenseForm,
    out: &mut impl Write,
) -> Result<()> {
    let current = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Expense {id} not found"))?;

    let mut form = ExpenseForm::from_expense(current);
    let pick = |value: String, slot: &mut String| {
        if !value.is_empty() {
            *slot = value;
        }
    };
    pick(overrides.description, &mut form.description);
    pick(overrides.amount, &mut form.amount);
    pick(overrides.date, &mut form.date);
    pick(overrides.category, &mut form.category);
    pick(overrides.kind, &mut form.kind);

    let draft = form.validate()?;
    store.update(id, draft)?;
    writeln!(out, "Updated expense {id}")?;
    Ok(())
}

fn cli_delete(
    store: &mut ExpenseStore<Database>,
    id: ExpenseId,
    out: &mut impl Write,
) -> Result<()> {
    match store.delete(id)? {
        DeleteOutcome::Deleted => writeln!(out, "Deleted expense {id}")?,
        DeleteOutcome::AlreadyAbsent => writeln!(out, "Expense {id} does not exist, nothing to do")?,
    }
    Ok(())
}

fn cli_chart(
    store: &ExpenseStore<Database>,
    range: DateRange,
    currency: &Currency,
    out: &mut impl Write,
) -> Result<()> {
    let visible = filter::filter_now(store.expenses(), &range);
    let series = match chart::project(&visible) {
        Projection::NoData => {
            writeln!(out, "No data to visualize")?;
            return Ok(());
        }
        Projection::Series(series) => series,
    };

    let max = series.max_amount();
    for (label, amount) in series.iter() {
        writeln!(
            out,
            "{label:>12} │{:<width$} {}",
            "█".repeat(bar_len(amount, max)),
            currency.format(amount),
            width = BAR_WIDTH,
        )?;
    }
    Ok(())
}

fn bar_len(amount: Decimal, max: Decimal) -> usize {
    if max <= Decimal::ZERO {
        return 0;
    }
    (amount / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH)
}

fn cli_export(
    store: &ExpenseStore<Database>,
    path: Option<String>,
    range: DateRange,
    out: &mut impl Write,
) -> Result<()> {
    let today = Local::now().date_naive();
    let output_path = path
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(super::shellexpand(&a)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(format!("{home}/spendboard-export-{}.csv", today.format("%Y-%m-%d")))
        });

    let visible = filter::filter_expenses(store.expenses(), &range, today);
    let count = crate::export::export_to_path(&output_path, &visible)?;
    if count == 0 {
        writeln!(out, "No expenses for {}", range.describe(today))?;
    } else {
        writeln!(out, "Exported {count} expenses to {}", output_path.display())?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
