#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;

fn form(description: &str, amount: &str, date: &str) -> ExpenseForm {
    ExpenseForm {
        description: description.into(),
        amount: amount.into(),
        date: date.into(),
        category: String::new(),
        kind: String::new(),
    }
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse_known_labels() {
    assert_eq!(Category::parse("Food"), Category::Food);
    assert_eq!(Category::parse("shopping"), Category::Shopping);
    assert_eq!(Category::parse("Health & Fitness"), Category::HealthFitness);
    assert_eq!(Category::parse("  TRANSPORT "), Category::Transport);
    assert_eq!(Category::parse("education"), Category::Education);
    assert_eq!(Category::parse("Entertainment"), Category::Entertainment);
}

#[test]
fn test_category_unknown_normalizes_to_other() {
    assert_eq!(Category::parse(""), Category::Other);
    assert_eq!(Category::parse("Groceries"), Category::Other);
    assert_eq!(Category::default(), Category::Other);
}

#[test]
fn test_category_round_trips_through_label() {
    for cat in Category::all() {
        assert_eq!(Category::parse(cat.as_str()), *cat);
    }
}

#[test]
fn test_category_icons_are_distinct() {
    let mut icons: Vec<&str> = Category::all().iter().map(|c| c.icon()).collect();
    icons.sort();
    icons.dedup();
    assert_eq!(icons.len(), Category::all().len());
}

// ── ExpenseKind ───────────────────────────────────────────────

#[test]
fn test_kind_defaults_to_debit() {
    assert_eq!(ExpenseKind::parse(""), Some(ExpenseKind::Debit));
    assert_eq!(ExpenseKind::default(), ExpenseKind::Debit);
}

#[test]
fn test_kind_parse() {
    assert_eq!(ExpenseKind::parse("Credit"), Some(ExpenseKind::Credit));
    assert_eq!(ExpenseKind::parse("DEBIT"), Some(ExpenseKind::Debit));
    assert_eq!(ExpenseKind::parse("refund"), None);
    assert!(ExpenseKind::Credit.is_credit());
}

// ── ExpenseForm ───────────────────────────────────────────────

#[test]
fn test_form_valid() {
    let mut f = form("  Lunch ", "12.50", "2024-01-15");
    f.category = "food".into();
    f.kind = "credit".into();
    let draft = f.validate().unwrap();
    assert_eq!(draft.description, "Lunch");
    assert_eq!(draft.amount, dec!(12.50));
    assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(draft.category, Category::Food);
    assert_eq!(draft.kind, ExpenseKind::Credit);
}

#[test]
fn test_form_defaults() {
    let draft = form("Bus", "2", "2024-03-01").validate().unwrap();
    assert_eq!(draft.category, Category::Other);
    assert_eq!(draft.kind, ExpenseKind::Debit);
}

#[test]
fn test_form_zero_amount_allowed() {
    let draft = form("Free sample", "0", "2024-03-01").validate().unwrap();
    assert_eq!(draft.amount, Decimal::ZERO);
}

#[test]
fn test_form_missing_fields() {
    assert_eq!(
        form("   ", "1", "2024-01-01").validate(),
        Err(ValidationError::MissingDescription)
    );
    assert_eq!(
        form("x", "", "2024-01-01").validate(),
        Err(ValidationError::MissingAmount)
    );
    assert_eq!(
        form("x", "1", "").validate(),
        Err(ValidationError::MissingDate)
    );
}

#[test]
fn test_form_bad_values() {
    assert_eq!(
        form("x", "abc", "2024-01-01").validate(),
        Err(ValidationError::InvalidAmount("abc".into()))
    );
    assert_eq!(
        form("x", "-5", "2024-01-01").validate(),
        Err(ValidationError::NegativeAmount("-5".into()))
    );
    assert_eq!(
        form("x", "5", "15/01/2024").validate(),
        Err(ValidationError::InvalidDate("15/01/2024".into()))
    );
    let mut f = form("x", "5", "2024-01-01");
    f.kind = "refund".into();
    assert_eq!(f.validate(), Err(ValidationError::InvalidKind("refund".into())));
}

#[test]
fn test_form_from_expense_round_trip() {
    let expense = Expense {
        id: ExpenseId(7),
        description: "Gym".into(),
        amount: dec!(30.00),
        date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        category: Category::HealthFitness,
        kind: ExpenseKind::Debit,
    };
    let draft = ExpenseForm::from_expense(&expense).validate().unwrap();
    assert_eq!(draft, expense.to_draft());
}

// ── ExpenseDraft ──────────────────────────────────────────────

#[test]
fn test_draft_validate() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert!(ExpenseDraft::new("ok", dec!(1), date).validate().is_ok());
    assert_eq!(
        ExpenseDraft::new("", dec!(1), date).validate(),
        Err(ValidationError::MissingDescription)
    );
    assert_eq!(
        ExpenseDraft::new("neg", dec!(-0.01), date).validate(),
        Err(ValidationError::NegativeAmount("-0.01".into()))
    );
}

#[test]
fn test_expense_id_display() {
    assert_eq!(ExpenseId(42).to_string(), "#42");
}

// ── Currency ──────────────────────────────────────────────────

#[test]
fn test_currency_groups_thousands() {
    let usd = Currency::new("$");
    assert_eq!(usd.format(dec!(5)), "$5.00");
    assert_eq!(usd.format(dec!(999.99)), "$999.99");
    assert_eq!(usd.format(dec!(1234.56)), "$1,234.56");
    assert_eq!(usd.format(dec!(10000000)), "$10,000,000.00");
}

#[test]
fn test_currency_negative_and_rounding() {
    let usd = Currency::new("$");
    assert_eq!(usd.format(dec!(-42.50)), "-$42.50");
    assert_eq!(usd.format(dec!(-99999.01)), "-$99,999.01");
    assert_eq!(usd.format(dec!(1.5)), "$1.50");
    assert_eq!(usd.format(dec!(-0.001)), "$0.00");
}

#[test]
fn test_currency_default_symbol() {
    assert_eq!(Currency::new("₹").format(dec!(1500)), "₹1,500.00");
}

#[test]
fn test_currency_entry_marks_credits() {
    let rupee = Currency::new("₹");
    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    let debit = Expense::from_draft(ExpenseId(1), ExpenseDraft::new("Lunch", dec!(120), day));
    let credit = Expense::from_draft(
        ExpenseId(2),
        ExpenseDraft::new("Refund", dec!(1200), day).with_kind(ExpenseKind::Credit),
    );
    assert_eq!(rupee.entry(&debit), "₹120.00");
    assert_eq!(rupee.entry(&credit), "+₹1,200.00");
}
