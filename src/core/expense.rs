//! Monthly expense business logic. Manual records used only by reporting.

use crate::{
    entities::{MonthlyExpense, monthly_expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a monthly expense record.
pub async fn create_expense(
    db: &DatabaseConnection,
    year: i32,
    month: i32,
    category: String,
    amount: f64,
    detail: Option<String>,
) -> Result<monthly_expense::Model> {
    if !(1..=12).contains(&month) {
        return Err(Error::validation("month must be between 1 and 12"));
    }
    if !(2000..=2100).contains(&year) {
        return Err(Error::validation("year is out of range"));
    }
    if category.trim().is_empty() {
        return Err(Error::validation("expense category cannot be empty"));
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::validation("expense amount must be non-negative"));
    }

    let row = monthly_expense::ActiveModel {
        year: Set(year),
        month: Set(month),
        category: Set(category.trim().to_string()),
        amount: Set(amount),
        detail: Set(detail),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Lists expenses, optionally restricted to one (year, month).
pub async fn list_expenses(
    db: &DatabaseConnection,
    year: Option<i32>,
    month: Option<i32>,
) -> Result<Vec<monthly_expense::Model>> {
    let mut query = MonthlyExpense::find();
    if let Some(year) = year {
        query = query.filter(monthly_expense::Column::Year.eq(year));
    }
    if let Some(month) = month {
        query = query.filter(monthly_expense::Column::Month.eq(month));
    }
    query
        .order_by_desc(monthly_expense::Column::Year)
        .order_by_desc(monthly_expense::Column::Month)
        .order_by_asc(monthly_expense::Column::Category)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an expense record.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let existing = MonthlyExpense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "expense",
            id: expense_id,
        })?;

    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_create_expense_validations() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_expense(&db, 2025, 13, "rent".to_string(), 100.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        let result = create_expense(&db, 2025, 6, "rent".to_string(), -1.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_filtered_by_month() -> Result<()> {
        let db = setup_test_db().await?;

        create_expense(&db, 2025, 6, "rent".to_string(), 100.0, None).await?;
        create_expense(&db, 2025, 7, "rent".to_string(), 100.0, None).await?;

        let june = list_expenses(&db, Some(2025), Some(6)).await?;
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].month, 6);

        Ok(())
    }
}
