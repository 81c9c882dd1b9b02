mod category;
mod expense;
mod money;

pub(crate) use category::{Category, ExpenseKind};
pub(crate) use expense::{parse_date, Expense, ExpenseDraft, ExpenseForm, ExpenseId};
pub(crate) use money::Currency;

#[cfg(test)]
mod tests;
