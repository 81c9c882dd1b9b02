//! Time-series projection of a set of expenses for charting.
//!
//! The projector sorts by date (stable, so same-day expenses keep the order
//! they came in) and emits labels and amounts index-aligned with that order.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Expense;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Projection {
    /// Nothing to plot. Distinct from a series whose amounts are all zero.
    NoData,
    Series(Series),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Series {
    pub(crate) labels: Vec<String>,
    pub(crate) amounts: Vec<Decimal>,
}

impl Series {
    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    /// `(index, amount)` pairs for plotting.
    pub(crate) fn points(&self) -> Vec<(f64, f64)> {
        self.amounts
            .iter()
            .enumerate()
            .map(|(i, amt)| (i as f64, amt.to_f64().unwrap_or(0.0)))
            .collect()
    }

    pub(crate) fn max_amount(&self) -> Decimal {
        self.amounts.iter().copied().max().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.amounts.iter().copied())
    }
}

/// Chart label for a date, e.g. `5 Jan 2024`.
pub(crate) fn format_label(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

pub(crate) fn project(expenses: &[&Expense]) -> Projection {
    if expenses.is_empty() {
        return Projection::NoData;
    }

    let mut sorted: Vec<&Expense> = expenses.to_vec();
    sorted.sort_by_key(|e| e.date);

    let labels = sorted.iter().map(|e| format_label(e.date)).collect();
    let amounts = sorted.iter().map(|e| e.amount).collect();
    Projection::Series(Series { labels, amounts })
}

#[cfg(test)]
mod tests;
