mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::RepoError;
use crate::models::{Category, Expense, ExpenseDraft, ExpenseId, ExpenseKind};
use crate::store::ExpenseRepository;

const EXPENSE_COLUMNS: &str = "id, description, amount, date, category, kind";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn get_expenses(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, RepoError> {
        let mut sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE 1=1");
        let mut param_values: Vec<String> = Vec::new();

        // Compare on the date part only so rows written with a time suffix still match.
        if let Some(s) = start {
            sql.push_str(&format!(" AND substr(date, 1, 10) >= ?{}", param_values.len() + 1));
            param_values.push(s.format("%Y-%m-%d").to_string());
        }
        if let Some(e) = end {
            sql.push_str(&format!(" AND substr(date, 1, 10) <= ?{}", param_values.len() + 1));
            param_values.push(e.format("%Y-%m-%d").to_string());
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(param_values.iter()), raw_row)?;

        let mut expenses = Vec::new();
        for row in rows {
            expenses.push(row?.into_expense()?);
        }
        Ok(expenses)
    }

    #[cfg(test)]
    pub(crate) fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>, RepoError> {
        let result = self.conn.query_row(
            &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1"),
            params![id.0],
            raw_row,
        );
        match result {
            Ok(raw) => Ok(Some(raw.into_expense()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_expense(&self, draft: &ExpenseDraft) -> Result<Expense, RepoError> {
        self.conn.execute(
            "INSERT INTO expenses (description, amount, date, category, kind, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.description,
                draft.amount.to_string(),
                draft.date.format("%Y-%m-%d").to_string(),
                draft.category.as_str(),
                draft.kind.as_str(),
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        let id = ExpenseId(self.conn.last_insert_rowid());
        Ok(Expense::from_draft(id, draft.clone()))
    }

    pub(crate) fn update_expense(&self, id: ExpenseId, draft: &ExpenseDraft) -> Result<(), RepoError> {
        let changed = self.conn.execute(
            "UPDATE expenses SET description = ?1, amount = ?2, date = ?3, category = ?4, kind = ?5
             WHERE id = ?6",
            params![
                draft.description,
                draft.amount.to_string(),
                draft.date.format("%Y-%m-%d").to_string(),
                draft.category.as_str(),
                draft.kind.as_str(),
                id.0,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    /// Deleting an id that is not there is not an error.
    pub(crate) fn delete_expense(&self, id: ExpenseId) -> Result<(), RepoError> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.0])?;
        Ok(())
    }

    pub(crate) fn get_expense_count(&self) -> Result<i64, RepoError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }
}

impl ExpenseRepository for Database {
    fn list(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, RepoError> {
        self.get_expenses(start, end)
    }

    fn create(&mut self, draft: &ExpenseDraft) -> Result<Expense, RepoError> {
        self.insert_expense(draft)
    }

    fn update(&mut self, id: ExpenseId, draft: &ExpenseDraft) -> Result<(), RepoError> {
        self.update_expense(id, draft)
    }

    fn delete(&mut self, id: ExpenseId) -> Result<(), RepoError> {
        self.delete_expense(id)
    }
}

/// Row as stored; decoded into an [`Expense`] outside the rusqlite closure so
/// bad amounts and dates surface as [`RepoError::Corrupt`].
struct RawExpense {
    id: i64,
    description: String,
    amount: String,
    date: String,
    category: String,
    kind: String,
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawExpense> {
    Ok(RawExpense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        category: row.get(4)?,
        kind: row.get(5)?,
    })
}

impl RawExpense {
    fn into_expense(self) -> Result<Expense, RepoError> {
        let amount = Decimal::from_str(&self.amount).map_err(|_| {
            RepoError::Corrupt(format!("expense {}: bad amount '{}'", self.id, self.amount))
        })?;
        let date = parse_stored_date(&self.date).ok_or_else(|| {
            RepoError::Corrupt(format!("expense {}: bad date '{}'", self.id, self.date))
        })?;
        Ok(Expense {
            id: ExpenseId(self.id),
            description: self.description,
            amount,
            date,
            category: Category::parse(&self.category),
            kind: ExpenseKind::parse(&self.kind).unwrap_or_default(),
        })
    }
}

/// Read the calendar date of a stored value, ignoring any time-of-day suffix.
pub(crate) fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    let day = s.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
