use anyhow::Result;
use shared::FixedExpense;
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::connection::DbConnection;

/// Repository for fixed (day-of-month) expense records
#[derive(Clone)]
pub struct FixedExpenseRepository {
    db: DbConnection,
}

impl FixedExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_fixed_expense(row: &SqliteRow) -> FixedExpense {
        FixedExpense {
            id: Some(row.get("id")),
            amount: row.get("amount"),
            category: row.get("category"),
            payment_day: row.get("payment_day"),
            is_recurring: row.get("is_recurring"),
            memo: row.get("memo"),
        }
    }

    pub async fn store_fixed_expense(&self, fixed: &FixedExpense) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO fixed_expenses (amount, category, payment_day, is_recurring, memo)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(fixed.amount)
        .bind(&fixed.category)
        .bind(fixed.payment_day)
        .bind(fixed.is_recurring)
        .bind(&fixed.memo)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Full snapshot of all fixed expenses, ordered by payment day
    pub async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, amount, category, payment_day, is_recurring, memo
            FROM fixed_expenses
            ORDER BY payment_day ASC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_fixed_expense).collect())
    }

    pub async fn get_fixed_expense(&self, id: i64) -> Result<Option<FixedExpense>> {
        let row = sqlx::query(
            r#"
            SELECT id, amount, category, payment_day, is_recurring, memo
            FROM fixed_expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_fixed_expense))
    }

    /// Returns false when no row has that id
    pub async fn update_fixed_expense(&self, id: i64, fixed: &FixedExpense) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE fixed_expenses
            SET amount = ?, category = ?, payment_day = ?, is_recurring = ?, memo = ?
            WHERE id = ?
            "#,
        )
        .bind(fixed.amount)
        .bind(&fixed.category)
        .bind(fixed.payment_day)
        .bind(fixed.is_recurring)
        .bind(&fixed.memo)
        .bind(id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_fixed_expense(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fixed_expenses WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
