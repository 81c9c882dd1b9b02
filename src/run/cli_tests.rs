#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Currency, ExpenseKind};

fn store() -> ExpenseStore<Database> {
    let mut store = ExpenseStore::new(Database::open_in_memory().unwrap());
    store.load().unwrap();
    store
}

fn run(store: &mut ExpenseStore<Database>, command: CliCommand) -> Result<String> {
    let mut out = Vec::new();
    run_command(command, store, &Currency::new("$"), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn add(store: &mut ExpenseStore<Database>, description: &str, amount: &str, date: &str) {
    run(
        store,
        CliCommand::Add {
            description: description.into(),
            amount: amount.into(),
            date: Some(date.into()),
            category: None,
            kind: None,
        },
    )
    .unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Add ───────────────────────────────────────────────────────

#[test]
fn test_add_defaults_category_and_kind() {
    let mut store = store();
    let out = run(
        &mut store,
        CliCommand::Add {
            description: "Lunch".into(),
            amount: "12.50".into(),
            date: Some("2024-01-05".into()),
            category: Some("food".into()),
            kind: None,
        },
    )
    .unwrap();

    assert_eq!(out, "Added expense #1\n");
    let e = &store.expenses()[0];
    assert_eq!(e.amount, dec!(12.50));
    assert_eq!(e.category, Category::Food);
    assert_eq!(e.kind, ExpenseKind::Debit);
}

#[test]
fn test_add_rejects_bad_amount() {
    let mut store = store();
    let err = run(
        &mut store,
        CliCommand::Add {
            description: "Lunch".into(),
            amount: "twelve".into(),
            date: None,
            category: None,
            kind: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "invalid amount: twelve");
    assert!(store.expenses().is_empty());
}

// ── List / chart ──────────────────────────────────────────────

#[test]
fn test_list_range_newest_first_with_total() {
    let mut store = store();
    add(&mut store, "Groceries", "100", "2024-01-05");
    add(&mut store, "Taxi", "50", "2024-01-20");
    add(&mut store, "Cinema", "75", "2024-02-01");

    let out = run(
        &mut store,
        CliCommand::List {
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 1, 31)),
        },
    )
    .unwrap();

    let taxi = out.find("Taxi").unwrap();
    let groceries = out.find("Groceries").unwrap();
    assert!(taxi < groceries);
    assert!(!out.contains("Cinema"));
    assert!(out.ends_with("2 expenses, total $150.00\n"));
}

#[test]
fn test_list_empty() {
    let mut store = store();
    let out = run(
        &mut store,
        CliCommand::List {
            from: Some(date(2024, 1, 1)),
            to: None,
        },
    )
    .unwrap();
    assert!(out.contains("from 2024-01-01"));
    assert!(out.ends_with("No expenses\n"));
}

#[test]
fn test_chart_bars_scale_to_max() {
    let mut store = store();
    add(&mut store, "Groceries", "100", "2024-01-05");
    add(&mut store, "Taxi", "50", "2024-01-20");

    let out = run(
        &mut store,
        CliCommand::Chart {
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 1, 31)),
        },
    )
    .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("5 Jan 2024"));
    assert_eq!(lines[0].matches('█').count(), 40);
    assert!(lines[1].contains("20 Jan 2024"));
    assert_eq!(lines[1].matches('█').count(), 20);
}

#[test]
fn test_chart_no_data() {
    let mut store = store();
    let out = run(
        &mut store,
        CliCommand::Chart {
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 1, 31)),
        },
    )
    .unwrap();
    assert_eq!(out, "No data to visualize\n");
}

#[test]
fn test_bar_len() {
    assert_eq!(bar_len(dec!(0), dec!(0)), 0);
    assert_eq!(bar_len(dec!(1), dec!(4)), 10);
    assert_eq!(bar_len(dec!(4), dec!(4)), 40);
}

// ── Edit / delete ─────────────────────────────────────────────

#[test]
fn test_edit_overlays_given_fields() {
    let mut store = store();
    add(&mut store, "Groceries", "100", "2024-01-05");

    let out = run(
        &mut store,
        CliCommand::Edit {
            id: 1,
            description: None,
            amount: Some("80".into()),
            date: None,
            category: Some("Food".into()),
            kind: None,
        },
    )
    .unwrap();
    assert_eq!(out, "Updated expense #1\n");

    store.load().unwrap();
    let e = &store.expenses()[0];
    assert_eq!(e.description, "Groceries");
    assert_eq!(e.amount, dec!(80));
    assert_eq!(e.date, date(2024, 1, 5));
    assert_eq!(e.category, Category::Food);
}

#[test]
fn test_edit_missing_id() {
    let mut store = store();
    let err = run(
        &mut store,
        CliCommand::Edit {
            id: 42,
            description: Some("x".into()),
            amount: None,
            date: None,
            category: None,
            kind: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Expense #42 not found");
}

#[test]
fn test_delete_is_idempotent() {
    let mut store = store();
    add(&mut store, "Groceries", "100", "2024-01-05");

    let out = run(&mut store, CliCommand::Delete { id: 1 }).unwrap();
    assert_eq!(out, "Deleted expense #1\n");
    let out = run(&mut store, CliCommand::Delete { id: 1 }).unwrap();
    assert_eq!(out, "Expense #1 does not exist, nothing to do\n");
    assert!(store.expenses().is_empty());
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_range_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jan.csv");
    let mut store = store();
    add(&mut store, "Groceries", "100", "2024-01-05");
    add(&mut store, "Cinema", "75", "2024-02-01");

    let out = run(
        &mut store,
        CliCommand::Export {
            path: Some(path.display().to_string()),
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 1, 31)),
        },
    )
    .unwrap();
    assert!(out.starts_with("Exported 1 expenses"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Groceries"));
    assert!(!text.contains("Cinema"));
}

// ── Argument parsing ──────────────────────────────────────────

#[derive(clap::Parser, Debug)]
struct TestCli {
    #[command(subcommand)]
    command: CliCommand,
}

#[test]
fn test_parse_list_dates() {
    use clap::Parser;
    let cli = TestCli::try_parse_from(["spendboard", "list", "--from", "2024-01-01"]).unwrap();
    assert_eq!(
        cli.command,
        CliCommand::List {
            from: Some(date(2024, 1, 1)),
            to: None
        }
    );
    assert!(TestCli::try_parse_from(["spendboard", "list", "--from", "01/01/2024"]).is_err());
}
