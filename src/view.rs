//! Derived dashboard state: visible subset, totals and chart series.
//!
//! Recomputed from canonical state whenever the store revision, the filter
//! range or the calendar day changes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::chart::{self, Projection};
use crate::filter::{self, DateRange};
use crate::models::{Category, Expense};

#[derive(Debug, Clone)]
pub(crate) struct DashboardView {
    /// Visible subset, newest first.
    pub(crate) visible: Vec<Expense>,
    pub(crate) total: Decimal,
    pub(crate) debit_total: Decimal,
    pub(crate) credit_total: Decimal,
    pub(crate) by_category: Vec<(Category, Decimal)>,
    pub(crate) projection: Projection,
    revision: u64,
    range: DateRange,
    today: NaiveDate,
}

impl DashboardView {
    pub(crate) fn compute(
        expenses: &[Expense],
        range: DateRange,
        today: NaiveDate,
        revision: u64,
    ) -> Self {
        let subset = filter::filter_expenses(expenses, &range, today);

        let total = filter::total_amount(&subset);
        let credit_total: Decimal = subset
            .iter()
            .filter(|e| e.kind.is_credit())
            .map(|e| e.amount)
            .sum();
        let by_category = filter::category_totals(&subset);
        let projection = chart::project(&subset);

        let mut visible: Vec<Expense> = subset.into_iter().cloned().collect();
        visible.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            visible,
            total,
            debit_total: total - credit_total,
            credit_total,
            by_category,
            projection,
            revision,
            range,
            today,
        }
    }

    pub(crate) fn is_stale(&self, revision: u64, range: &DateRange, today: NaiveDate) -> bool {
        self.revision != revision || self.range != *range || self.today != today
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{ExpenseDraft, ExpenseId, ExpenseKind};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rows() -> Vec<Expense> {
        vec![
            Expense::from_draft(
                ExpenseId(1),
                ExpenseDraft::new("Groceries", dec!(100), date(2024, 1, 5))
                    .with_category(Category::Food),
            ),
            Expense::from_draft(
                ExpenseId(2),
                ExpenseDraft::new("Refund", dec!(50), date(2024, 1, 20))
                    .with_kind(ExpenseKind::Credit),
            ),
            Expense::from_draft(
                ExpenseId(3),
                ExpenseDraft::new("Cinema", dec!(75), date(2024, 2, 1)),
            ),
        ]
    }

    #[test]
    fn test_compute_current_month_view() {
        let view = DashboardView::compute(&rows(), DateRange::default(), date(2024, 1, 15), 1);
        let ids: Vec<i64> = view.visible.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(view.total, dec!(150));
        assert_eq!(view.credit_total, dec!(50));
        assert_eq!(view.debit_total, dec!(100));
        assert_eq!(view.by_category[0], (Category::Food, dec!(100)));
        match &view.projection {
            Projection::Series(s) => assert_eq!(s.labels, vec!["5 Jan 2024", "20 Jan 2024"]),
            Projection::NoData => unreachable!(),
        }
    }

    #[test]
    fn test_empty_view_has_no_data() {
        let view = DashboardView::compute(&rows(), DateRange::default(), date(2025, 1, 1), 1);
        assert!(view.visible.is_empty());
        assert_eq!(view.total, Decimal::ZERO);
        assert_eq!(view.projection, Projection::NoData);
    }

    #[test]
    fn test_staleness() {
        let today = date(2024, 1, 15);
        let view = DashboardView::compute(&rows(), DateRange::default(), today, 3);
        assert!(!view.is_stale(3, &DateRange::default(), today));
        assert!(view.is_stale(4, &DateRange::default(), today));
        assert!(view.is_stale(3, &DateRange::month(2024, 2).unwrap(), today));
        assert!(view.is_stale(3, &DateRange::default(), date(2024, 1, 16)));
    }
}
