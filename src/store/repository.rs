use chrono::NaiveDate;

use crate::error::RepoError;
use crate::models::{Expense, ExpenseDraft, ExpenseId};

/// Durable storage the [`ExpenseStore`](super::ExpenseStore) reconciles against.
///
/// Implementations assign ids on `create`. `delete` of an absent id must
/// succeed; `update` of an absent id must fail with [`RepoError::NotFound`].
pub(crate) trait ExpenseRepository {
    fn list(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, RepoError>;

    fn create(&mut self, draft: &ExpenseDraft) -> Result<Expense, RepoError>;

    fn update(&mut self, id: ExpenseId, draft: &ExpenseDraft) -> Result<(), RepoError>;

    fn delete(&mut self, id: ExpenseId) -> Result<(), RepoError>;
}
