use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{Category, ExpenseKind};
use crate::error::ValidationError;

/// Identifier assigned by the persistence adapter when an expense is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ExpenseId(pub(crate) i64);

impl std::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expense {
    pub(crate) id: ExpenseId,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) date: NaiveDate,
    pub(crate) category: Category,
    pub(crate) kind: ExpenseKind,
}

impl Expense {
    pub(crate) fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
            kind: draft.kind,
        }
    }

    #[cfg(test)]
    pub(crate) fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            description: self.description.clone(),
            amount: self.amount,
            date: self.date,
            category: self.category,
            kind: self.kind,
        }
    }
}

/// A complete expense without an identity yet. Used for create and for
/// full-record replace on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpenseDraft {
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) date: NaiveDate,
    pub(crate) category: Category,
    pub(crate) kind: ExpenseKind,
}

impl ExpenseDraft {
    pub(crate) fn new(description: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            category: Category::Other,
            kind: ExpenseKind::Debit,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_kind(mut self, kind: ExpenseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Re-check the invariants a draft built by hand could violate.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(ValidationError::NegativeAmount(self.amount.to_string()));
        }
        Ok(())
    }
}

/// Raw, string-typed form input as it comes from the TUI form or the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExpenseForm {
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) kind: String,
}

impl ExpenseForm {
    pub(crate) fn from_expense(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.as_str().to_string(),
            kind: expense.kind.as_str().to_string(),
        }
    }

    pub(crate) fn validate(&self) -> Result<ExpenseDraft, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let amount_str = self.amount.trim();
        if amount_str.is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        let amount = Decimal::from_str(amount_str)
            .map_err(|_| ValidationError::InvalidAmount(amount_str.to_string()))?;
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(amount_str.to_string()));
        }

        let date_str = self.date.trim();
        if date_str.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        let date = parse_date(date_str)?;

        let kind = ExpenseKind::parse(&self.kind)
            .ok_or_else(|| ValidationError::InvalidKind(self.kind.trim().to_string()))?;

        Ok(ExpenseDraft {
            description: description.to_string(),
            amount,
            date,
            category: Category::parse(&self.category),
            kind,
        })
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.trim().to_string()))
}
