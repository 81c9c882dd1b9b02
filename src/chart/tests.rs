#![allow(clippy::unwrap_used, clippy::panic)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{ExpenseDraft, ExpenseId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(id: i64, amount: Decimal, day: NaiveDate) -> Expense {
    Expense::from_draft(ExpenseId(id), ExpenseDraft::new(format!("e{id}"), amount, day))
}

fn series(p: Projection) -> Series {
    match p {
        Projection::Series(s) => s,
        Projection::NoData => panic!("expected a series"),
    }
}

#[test]
fn test_empty_input_is_no_data() {
    assert_eq!(project(&[]), Projection::NoData);
}

#[test]
fn test_all_zero_amounts_still_a_series() {
    let rows = [expense(1, Decimal::ZERO, date(2024, 1, 1))];
    let refs: Vec<&Expense> = rows.iter().collect();
    let s = series(project(&refs));
    assert_eq!(s.amounts, vec![Decimal::ZERO]);
}

#[test]
fn test_scenario_labels_and_amounts() {
    let rows = [
        expense(2, dec!(50), date(2024, 1, 20)),
        expense(1, dec!(100), date(2024, 1, 5)),
    ];
    let refs: Vec<&Expense> = rows.iter().collect();
    let s = series(project(&refs));
    assert_eq!(s.labels, vec!["5 Jan 2024", "20 Jan 2024"]);
    assert_eq!(s.amounts, vec![dec!(100), dec!(50)]);
}

#[test]
fn test_sorted_ascending_and_aligned() {
    let rows = [
        expense(1, dec!(3), date(2024, 3, 1)),
        expense(2, dec!(1), date(2023, 12, 31)),
        expense(3, dec!(2), date(2024, 1, 15)),
    ];
    let refs: Vec<&Expense> = rows.iter().collect();
    let s = series(project(&refs));
    assert_eq!(s.len(), 3);
    assert_eq!(s.labels.len(), s.amounts.len());
    assert_eq!(s.labels, vec!["31 Dec 2023", "15 Jan 2024", "1 Mar 2024"]);
    assert_eq!(s.amounts, vec![dec!(1), dec!(2), dec!(3)]);
}

#[test]
fn test_same_day_keeps_input_order() {
    let day = date(2024, 6, 1);
    let rows = [
        expense(1, dec!(30), day),
        expense(2, dec!(10), date(2024, 5, 31)),
        expense(3, dec!(20), day),
        expense(4, dec!(5), day),
    ];
    let refs: Vec<&Expense> = rows.iter().collect();
    let s = series(project(&refs));
    assert_eq!(s.amounts, vec![dec!(10), dec!(30), dec!(20), dec!(5)]);

    // Same input order, same output.
    assert_eq!(project(&refs), Projection::Series(s));
}

#[test]
fn test_amounts_pass_through_at_source_precision() {
    let rows = [expense(1, dec!(10.005), date(2024, 1, 1))];
    let refs: Vec<&Expense> = rows.iter().collect();
    assert_eq!(series(project(&refs)).amounts, vec![dec!(10.005)]);
}

#[test]
fn test_points_and_max() {
    let s = Series {
        labels: vec!["a".into(), "b".into()],
        amounts: vec![dec!(1.5), dec!(4)],
    };
    assert_eq!(s.points(), vec![(0.0, 1.5), (1.0, 4.0)]);
    assert_eq!(s.max_amount(), dec!(4));
    assert_eq!(Series::default().max_amount(), Decimal::ZERO);
    let pairs: Vec<(&str, Decimal)> = s.iter().collect();
    assert_eq!(pairs, vec![("a", dec!(1.5)), ("b", dec!(4))]);
}

#[test]
fn test_format_label_single_digit_day() {
    assert_eq!(format_label(date(2024, 2, 9)), "9 Feb 2024");
}
