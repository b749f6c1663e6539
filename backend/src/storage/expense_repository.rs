use anyhow::Result;
use shared::Expense;
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::connection::DbConnection;

/// Repository for ad-hoc expense records
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_expense(row: &SqliteRow) -> Expense {
        Expense {
            id: Some(row.get("id")),
            amount: row.get("amount"),
            category: row.get("category"),
            date: row.get("date"),
            memo: row.get("memo"),
        }
    }

    /// Insert an expense and return the id assigned by the database
    pub async fn store_expense(&self, expense: &Expense) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (amount, category, date, memo)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.date)
        .bind(&expense.memo)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Full snapshot of all expenses, oldest date first
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, amount, category, date, memo
            FROM expenses
            ORDER BY date ASC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_expense).collect())
    }

    pub async fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, amount, category, date, memo
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_expense))
    }

    /// Overwrite the expense with the given id.
    /// Returns false when no row has that id.
    pub async fn update_expense(&self, id: i64, expense: &Expense) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET amount = ?, category = ?, date = ?, memo = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.date)
        .bind(&expense.memo)
        .bind(id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns true if the expense was found and deleted
    pub async fn delete_expense(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
