use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Expense;

const HEADER: [&str; 6] = ["id", "date", "description", "category", "kind", "amount"];

/// Write expenses as CSV, one row per expense in the given order.
pub(crate) fn write_csv<W: Write>(writer: W, expenses: &[&Expense]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for e in expenses {
        wtr.write_record([
            e.id.0.to_string(),
            e.date.format("%Y-%m-%d").to_string(),
            e.description.clone(),
            e.category.as_str().to_string(),
            e.kind.as_str().to_string(),
            e.amount.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(expenses.len())
}

pub(crate) fn export_to_path(path: &Path, expenses: &[&Expense]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(file, expenses)?;
    tracing::info!(count, path = %path.display(), "exported expenses");
    Ok(count)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{Category, ExpenseDraft, ExpenseId, ExpenseKind};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Expense> {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        vec![
            Expense::from_draft(
                ExpenseId(1),
                ExpenseDraft::new("Groceries, weekly", dec!(100.50), day)
                    .with_category(Category::Food),
            ),
            Expense::from_draft(
                ExpenseId(2),
                ExpenseDraft::new("Refund", dec!(20), day).with_kind(ExpenseKind::Credit),
            ),
        ]
    }

    #[test]
    fn test_write_csv_quotes_and_header() {
        let rows = sample();
        let refs: Vec<&Expense> = rows.iter().collect();
        let mut buf = Vec::new();
        assert_eq!(write_csv(&mut buf, &refs).unwrap(), 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,date,description,category,kind,amount");
        assert_eq!(lines[1], "1,2024-01-05,\"Groceries, weekly\",Food,Debit,100.50");
        assert_eq!(lines[2], "2,2024-01-05,Refund,Other,Credit,20");
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = sample();
        let refs: Vec<&Expense> = rows.iter().collect();

        assert_eq!(export_to_path(&path, &refs).unwrap(), 2);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&mut buf, &[]).unwrap(), 0);
        assert_eq!(String::from_utf8(buf).unwrap().trim_end(), "id,date,description,category,kind,amount");
    }
}
