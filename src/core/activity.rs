//! Activity log business logic.
//!
//! The log is append-only: this module exposes a write that inserts and
//! reads that filter, nothing else. No code path updates or deletes rows.

use crate::{
    entities::{ActivityLog, activity_log, enums::ActivityAction},
    errors::Result,
};
use sea_orm::{ConnectionTrait, QueryOrder, QuerySelect, Set, prelude::*};

/// Appends one event to the activity log.
///
/// Generic over the connection so it can run on a plain connection or
/// inside a transaction.
pub async fn record<C>(
    db: &C,
    entity_type: &str,
    entity_id: i64,
    action: ActivityAction,
    detail: impl Into<String>,
) -> Result<activity_log::Model>
where
    C: ConnectionTrait,
{
    let entry = activity_log::ActiveModel {
        entity_type: Set(entity_type.to_string()),
        entity_id: Set(entity_id),
        action: Set(action),
        detail: Set(detail.into()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    entry.insert(db).await.map_err(Into::into)
}

/// Lists log entries, newest first, optionally filtered by entity type and
/// id, capped at `limit` rows.
pub async fn list(
    db: &DatabaseConnection,
    entity_type: Option<&str>,
    entity_id: Option<i64>,
    limit: u64,
) -> Result<Vec<activity_log::Model>> {
    let mut query = ActivityLog::find();

    if let Some(kind) = entity_type {
        query = query.filter(activity_log::Column::EntityType.eq(kind));
    }
    if let Some(id) = entity_id {
        query = query.filter(activity_log::Column::EntityId.eq(id));
    }

    query
        .order_by_desc(activity_log::Column::CreatedAt)
        .order_by_desc(activity_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_record_and_list() -> Result<()> {
        let db = setup_test_db().await?;

        record(&db, "order", 1, ActivityAction::Created, "order created").await?;
        record(&db, "order", 1, ActivityAction::Payment, "payment of 100").await?;
        record(&db, "client", 7, ActivityAction::Created, "client created").await?;

        let order_entries = list(&db, Some("order"), Some(1), 50).await?;
        assert_eq!(order_entries.len(), 2);
        // Newest first
        assert_eq!(order_entries[0].action, ActivityAction::Payment);

        let all = list(&db, None, None, 50).await?;
        assert_eq!(all.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_respects_limit() -> Result<()> {
        let db = setup_test_db().await?;

        for i in 0..10 {
            record(
                &db,
                "order",
                1,
                ActivityAction::Updated,
                format!("change {i}"),
            )
            .await?;
        }

        let entries = list(&db, Some("order"), Some(1), 4).await?;
        assert_eq!(entries.len(), 4);

        Ok(())
    }
}
