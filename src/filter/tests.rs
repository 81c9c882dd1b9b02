#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{ExpenseDraft, ExpenseId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(id: i64, amount: Decimal, day: NaiveDate) -> Expense {
    Expense::from_draft(ExpenseId(id), ExpenseDraft::new(format!("e{id}"), amount, day))
}

fn scenario() -> Vec<Expense> {
    vec![
        expense(1, dec!(100), date(2024, 1, 5)),
        expense(2, dec!(50), date(2024, 1, 20)),
        expense(3, dec!(75), date(2024, 2, 1)),
    ]
}

fn ids(rows: &[&Expense]) -> Vec<i64> {
    rows.iter().map(|e| e.id.0).collect()
}

// ── Default view ──────────────────────────────────────────────

#[test]
fn test_unbounded_defaults_to_current_month() {
    let rows = scenario();
    let visible = filter_expenses(&rows, &DateRange::default(), date(2024, 1, 15));
    assert_eq!(ids(&visible), vec![1, 2]);
    assert_eq!(total_amount(&visible), dec!(150));
}

#[test]
fn test_unbounded_uses_year_too() {
    let rows = vec![
        expense(1, dec!(1), date(2023, 1, 10)),
        expense(2, dec!(2), date(2024, 1, 10)),
    ];
    let visible = filter_expenses(&rows, &DateRange::default(), date(2024, 1, 31));
    assert_eq!(ids(&visible), vec![2]);
}

#[test]
fn test_unbounded_follows_evaluation_date() {
    let rows = scenario();
    let jan = filter_expenses(&rows, &DateRange::default(), date(2024, 1, 31));
    let feb = filter_expenses(&rows, &DateRange::default(), date(2024, 2, 1));
    assert_eq!(ids(&jan), vec![1, 2]);
    assert_eq!(ids(&feb), vec![3]);
}

#[test]
fn test_unbounded_matches_in_month_predicate() {
    let rows: Vec<Expense> = (1..=60)
        .map(|i| expense(i, dec!(1), date(2024, 1, 1) + chrono::Days::new(i as u64 * 3)))
        .collect();
    let today = date(2024, 3, 10);
    let visible = filter_expenses(&rows, &DateRange::default(), today);
    let expected: Vec<&Expense> = rows.iter().filter(|e| in_month(e.date, today)).collect();
    assert_eq!(visible, expected);
}

// ── Explicit bounds ───────────────────────────────────────────

#[test]
fn test_bounds_are_inclusive() {
    let rows = scenario();
    let range = DateRange::new(Some(date(2024, 1, 5)), Some(date(2024, 1, 20)));
    let visible = filter_expenses(&rows, &range, date(2030, 6, 1));
    assert_eq!(ids(&visible), vec![1, 2]);
}

#[test]
fn test_outside_bounds_excluded() {
    let rows = scenario();
    let range = DateRange::new(Some(date(2024, 1, 6)), Some(date(2024, 1, 31)));
    let visible = filter_expenses(&rows, &range, date(2024, 1, 15));
    assert_eq!(ids(&visible), vec![2]);
}

#[test]
fn test_single_bound_bypasses_month_default() {
    let rows = scenario();
    let today = date(2024, 1, 15);

    let from = DateRange::new(Some(date(2024, 1, 10)), None);
    assert_eq!(ids(&filter_expenses(&rows, &from, today)), vec![2, 3]);

    let until = DateRange::new(None, Some(date(2024, 12, 31)));
    assert_eq!(ids(&filter_expenses(&rows, &until, today)), vec![1, 2, 3]);
}

#[test]
fn test_inverted_bounds_are_empty() {
    let rows = scenario();
    let range = DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
    assert!(filter_expenses(&rows, &range, date(2024, 1, 15)).is_empty());
}

#[test]
fn test_filter_keeps_input_order() {
    let rows = vec![
        expense(5, dec!(1), date(2024, 1, 20)),
        expense(4, dec!(1), date(2024, 1, 2)),
        expense(6, dec!(1), date(2024, 1, 9)),
    ];
    let visible = filter_expenses(&rows, &DateRange::default(), date(2024, 1, 1));
    assert_eq!(ids(&visible), vec![5, 4, 6]);
}

// ── DateRange helpers ─────────────────────────────────────────

#[test]
fn test_month_range() {
    let feb = DateRange::month(2024, 2).unwrap();
    assert_eq!(feb.start, Some(date(2024, 2, 1)));
    assert_eq!(feb.end, Some(date(2024, 2, 29)));

    let dec = DateRange::month(2023, 12).unwrap();
    assert_eq!(dec.end, Some(date(2023, 12, 31)));

    assert!(DateRange::month(2024, 13).is_none());
}

#[test]
fn test_effective_range() {
    let today = date(2024, 4, 18);
    assert_eq!(
        DateRange::default().effective(today),
        DateRange::month(2024, 4).unwrap()
    );
    let custom = DateRange::new(Some(date(2024, 1, 1)), None);
    assert_eq!(custom.effective(today), custom);
}

#[test]
fn test_describe() {
    let today = date(2024, 4, 18);
    assert_eq!(DateRange::default().describe(today), "April 2024 (current month)");
    assert_eq!(
        DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31))).describe(today),
        "2024-01-01 to 2024-01-31"
    );
    assert_eq!(
        DateRange::new(None, Some(date(2024, 1, 31))).describe(today),
        "until 2024-01-31"
    );
}

// ── Aggregates ────────────────────────────────────────────────

#[test]
fn test_total_amount_empty() {
    assert_eq!(total_amount(&[]), Decimal::ZERO);
}

#[test]
fn test_category_totals() {
    let mut rows = scenario();
    rows[0].category = Category::Food;
    rows[1].category = Category::Transport;
    rows[2].category = Category::Food;
    let refs: Vec<&Expense> = rows.iter().collect();

    assert_eq!(
        category_totals(&refs),
        vec![(Category::Food, dec!(175)), (Category::Transport, dec!(50))]
    );
}
