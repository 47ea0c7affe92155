//! Monthly report generation.
//!
//! Pure aggregation: orders created in the month, payments registered in
//! the month, and the month's manual expenses are folded into buckets and
//! totals. Nothing is persisted; the report is recomputed on every view.

use std::collections::BTreeMap;

use crate::{
    core::invoice,
    entities::{
        MonthlyExpense, Order, Payment, enums::InvoiceType, monthly_expense, order, payment,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{DatabaseConnection, prelude::*};
use serde::Serialize;

/// Revenue bucket per invoice type; `invoice_type = None` collects orders
/// without an invoice.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceBucket {
    /// Invoice type of the bucket, `null` for uninvoiced orders
    pub invoice_type: Option<InvoiceType>,
    /// Number of orders in the bucket
    pub count: u64,
    /// Summed order prices
    pub revenue: f64,
}

/// Expense bucket per category.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseBucket {
    /// Expense category
    pub category: String,
    /// Summed amounts
    pub total: f64,
}

/// A month's aggregated figures.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    /// Report year
    pub year: i32,
    /// Report month, 1-12
    pub month: i32,
    /// Orders created in the month
    pub order_count: u64,
    /// Summed prices of those orders
    pub revenue: f64,
    /// Payments registered during the month (any order)
    pub collected: f64,
    /// Summed IVA of type-A orders created in the month
    pub iva_total: f64,
    /// Revenue grouped by invoice type
    pub invoice_buckets: Vec<InvoiceBucket>,
    /// Expenses grouped by category
    pub expense_buckets: Vec<ExpenseBucket>,
    /// Summed manual expenses of the month
    pub expense_total: f64,
    /// `revenue - expense_total`
    pub balance: f64,
}

/// UTC window `[start, end)` covering one calendar month.
pub fn month_window(year: i32, month: i32) -> Result<(DateTimeUtc, DateTimeUtc)> {
    if !(1..=12).contains(&month) {
        return Err(Error::validation("month must be between 1 and 12"));
    }
    let month_u32 = u32::try_from(month)
        .map_err(|_| Error::validation("month must be between 1 and 12"))?;

    let start = NaiveDate::from_ymd_opt(year, month_u32, 1)
        .ok_or_else(|| Error::validation("invalid year/month"))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_u32 + 1, 1)
    }
    .ok_or_else(|| Error::validation("invalid year/month"))?;

    let start = Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap_or_default());
    let end = Utc.from_utc_datetime(&end.and_hms_opt(0, 0, 0).unwrap_or_default());
    Ok((start, end))
}

/// Generates the report for one (year, month).
pub async fn generate_monthly_report(
    db: &DatabaseConnection,
    year: i32,
    month: i32,
) -> Result<MonthlyReport> {
    let (start, end) = month_window(year, month)?;

    let orders = Order::find()
        .filter(order::Column::CreatedAt.gte(start))
        .filter(order::Column::CreatedAt.lt(end))
        .all(db)
        .await?;

    let payments = Payment::find()
        .filter(payment::Column::RegisteredAt.gte(start))
        .filter(payment::Column::RegisteredAt.lt(end))
        .all(db)
        .await?;

    let expenses = MonthlyExpense::find()
        .filter(monthly_expense::Column::Year.eq(year))
        .filter(monthly_expense::Column::Month.eq(month))
        .all(db)
        .await?;

    let mut revenue = 0.0;
    let mut iva_total = 0.0;
    // Key by serialized type name for a stable bucket order
    let mut invoice_groups: BTreeMap<String, (Option<InvoiceType>, u64, f64)> = BTreeMap::new();

    for order in &orders {
        revenue += order.price;
        if order.invoice_type == Some(InvoiceType::A) {
            if let Some(tax) = order.invoice_tax {
                iva_total += tax;
            }
        }
        let key = match order.invoice_type {
            Some(InvoiceType::A) => "a",
            Some(InvoiceType::B) => "b",
            Some(InvoiceType::X) => "x",
            None => "none",
        };
        let entry = invoice_groups
            .entry(key.to_string())
            .or_insert((order.invoice_type, 0, 0.0));
        entry.1 += 1;
        entry.2 += order.price;
    }

    let collected = payments.iter().map(|p| p.amount).sum::<f64>();

    let mut expense_groups: BTreeMap<String, f64> = BTreeMap::new();
    let mut expense_total = 0.0;
    for expense in &expenses {
        expense_total += expense.amount;
        *expense_groups.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    let invoice_buckets = invoice_groups
        .into_values()
        .map(|(invoice_type, count, bucket_revenue)| InvoiceBucket {
            invoice_type,
            count,
            revenue: invoice::round2(bucket_revenue),
        })
        .collect();
    let expense_buckets = expense_groups
        .into_iter()
        .map(|(category, total)| ExpenseBucket {
            category,
            total: invoice::round2(total),
        })
        .collect();

    Ok(MonthlyReport {
        year,
        month,
        order_count: orders.len() as u64,
        revenue: invoice::round2(revenue),
        collected: invoice::round2(collected),
        iva_total: invoice::round2(iva_total),
        invoice_buckets,
        expense_buckets,
        expense_total: invoice::round2(expense_total),
        balance: invoice::round2(revenue - expense_total),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{expense, order as order_logic, payment as payment_logic};
    use crate::entities::enums::OrderStatus;
    use crate::test_utils::{create_test_client, create_test_order, setup_test_db};
    use chrono::Datelike;
    use sea_orm::Set;

    #[test]
    fn test_month_window_bounds() {
        let (start, end) = month_window(2025, 6).unwrap();
        assert_eq!(start.date_naive().month(), 6);
        assert_eq!(end.date_naive().month(), 7);

        // December rolls into January of the next year
        let (start, end) = month_window(2025, 12).unwrap();
        assert_eq!(start.date_naive().year(), 2025);
        assert_eq!(end.date_naive().year(), 2026);
    }

    #[test]
    fn test_month_window_rejects_bad_month() {
        assert!(month_window(2025, 0).is_err());
        assert!(month_window(2025, 13).is_err());
    }

    #[tokio::test]
    async fn test_empty_month_report() -> Result<()> {
        let db = setup_test_db().await?;

        let report = generate_monthly_report(&db, 2030, 1).await?;
        assert_eq!(report.order_count, 0);
        assert_eq!(report.revenue, 0.0);
        assert_eq!(report.expense_total, 0.0);
        assert_eq!(report.balance, 0.0);
        assert!(report.invoice_buckets.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_report_totals_and_buckets() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;

        let now = chrono::Utc::now();
        let year = now.year();
        let month = i32::try_from(now.month()).unwrap();

        // Two orders this month: one type A (paid, split filled), one uninvoiced
        let first = create_test_order(&db, client.id, 1000.0).await?;
        let mut changes: crate::entities::order::ActiveModel = first.clone().into();
        changes.invoice_type = Set(Some(InvoiceType::A));
        changes.update(&db).await?;
        payment_logic::register_payment(&db, first.id, 1000.0, None).await?;

        create_test_order(&db, client.id, 500.0).await?;

        // Expenses in two categories
        expense::create_expense(&db, year, month, "rent".to_string(), 300.0, None).await?;
        expense::create_expense(&db, year, month, "rent".to_string(), 100.0, None).await?;
        expense::create_expense(&db, year, month, "toner".to_string(), 50.0, None).await?;

        let report = generate_monthly_report(&db, year, month).await?;

        assert_eq!(report.order_count, 2);
        assert_eq!(report.revenue, 1500.0);
        assert_eq!(report.collected, 1000.0);
        assert_eq!(report.iva_total, 173.55);
        assert_eq!(report.expense_total, 450.0);
        assert_eq!(report.balance, 1050.0);

        assert_eq!(report.invoice_buckets.len(), 2);
        let rent = report
            .expense_buckets
            .iter()
            .find(|b| b.category == "rent")
            .unwrap();
        assert_eq!(rent.total, 400.0);

        // Status changes never affect the aggregation
        order_logic::update_order(
            &db,
            first.id,
            order_logic::OrderChanges {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
        )
        .await?;
        let again = generate_monthly_report(&db, year, month).await?;
        assert_eq!(again.revenue, report.revenue);

        Ok(())
    }
}
