//! Visible-subset selection over canonical state.
//!
//! With no bounds set the view is the calendar month containing `today`.
//! Setting either bound switches that default off entirely and the range is
//! applied as given, bounds inclusive. Everything here is a pure function of
//! its inputs.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Category, Expense};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
}

impl DateRange {
    pub(crate) fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// First through last day of the given month. `None` for an invalid month.
    pub(crate) fn month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self {
            start: Some(first),
            end: Some(last),
        })
    }

    pub(crate) fn is_unset(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// The range actually applied: the current month when nothing is set.
    pub(crate) fn effective(&self, today: NaiveDate) -> DateRange {
        if self.is_unset() {
            Self::month(today.year(), today.month()).unwrap_or_default()
        } else {
            *self
        }
    }

    /// Human-readable label for headers and the status bar.
    pub(crate) fn describe(&self, today: NaiveDate) -> String {
        match (self.start, self.end) {
            (None, None) => format!("{} (current month)", today.format("%B %Y")),
            (Some(s), None) => format!("from {}", s.format("%Y-%m-%d")),
            (None, Some(e)) => format!("until {}", e.format("%Y-%m-%d")),
            (Some(s), Some(e)) => {
                format!("{} to {}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d"))
            }
        }
    }
}

pub(crate) fn in_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// Select the expenses visible under `range` as of `today`. Input order is kept.
pub(crate) fn filter_expenses<'a>(
    expenses: &'a [Expense],
    range: &DateRange,
    today: NaiveDate,
) -> Vec<&'a Expense> {
    if range.is_unset() {
        expenses.iter().filter(|e| in_month(e.date, today)).collect()
    } else {
        expenses.iter().filter(|e| range.contains(e.date)).collect()
    }
}

/// Same as [`filter_expenses`] evaluated against the local clock.
pub(crate) fn filter_now<'a>(expenses: &'a [Expense], range: &DateRange) -> Vec<&'a Expense> {
    filter_expenses(expenses, range, chrono::Local::now().date_naive())
}

pub(crate) fn total_amount(expenses: &[&Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Totals per category, largest first. Ties keep category declaration order.
pub(crate) fn category_totals(expenses: &[&Expense]) -> Vec<(Category, Decimal)> {
    let mut totals: HashMap<Category, Decimal> = HashMap::new();
    for e in expenses {
        *totals.entry(e.category).or_insert(Decimal::ZERO) += e.amount;
    }

    let mut result: Vec<(Category, Decimal)> = Category::all()
        .iter()
        .filter_map(|c| totals.get(c).map(|amt| (*c, *amt)))
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

#[cfg(test)]
mod tests;
