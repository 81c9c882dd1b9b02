//! Error types shared by the expense store and its persistence adapter.
//!
//! - [`ValidationError`] is raised while turning raw form input into a draft,
//!   before anything reaches the store or the adapter.
//! - [`RepoError`] is what a persistence adapter reports.
//! - [`StoreError`] is what callers of the store see. Adapter failures are
//!   mapped onto it with their message intact.

use thiserror::Error;

use crate::models::ExpenseId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("description is required")]
    MissingDescription,
    #[error("amount is required")]
    MissingAmount,
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("amount must not be negative: {0}")]
    NegativeAmount(String),
    #[error("date is required")]
    MissingDate,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid type '{0}', expected Debit or Credit")]
    InvalidKind(String),
}

#[derive(Debug, Error)]
pub(crate) enum RepoError {
    #[error("expense {0} not found")]
    NotFound(ExpenseId),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to fetch expenses: {0}")]
    Fetch(String),
    #[error("failed to save expense: {0}")]
    Persistence(String),
    #[error("expense {0} not found")]
    NotFound(ExpenseId),
    #[error("expense {0} is already being modified")]
    Conflict(ExpenseId),
}

impl StoreError {
    /// Map an adapter failure on a write path.
    pub(crate) fn from_write(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence(other.to_string()),
        }
    }

    /// Map an adapter failure on the load path.
    pub(crate) fn from_fetch(err: RepoError) -> Self {
        Self::Fetch(err.to_string())
    }
}
