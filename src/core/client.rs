//! Client directory business logic.
//!
//! Clients are hard-deletable, but only while nothing references them:
//! a client with orders, quotes, or relationships is protected by a
//! referential guard that surfaces as a conflict.

use crate::{
    entities::{
        Client, Order, Quote, Relationship, client,
        enums::{ActivityAction, ClientKind},
        order, quote, relationship,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Payload for creating a client.
#[derive(Debug, Clone)]
pub struct NewClient {
    /// Display name, required and non-empty
    pub name: String,
    /// Individual or company
    pub kind: ClientKind,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Fiscal identifier
    pub tax_id: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Field changes for an existing client; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    /// New display name
    pub name: Option<String>,
    /// New email
    pub email: Option<Option<String>>,
    /// New phone
    pub phone: Option<Option<String>>,
    /// New address
    pub address: Option<Option<String>>,
    /// New fiscal identifier
    pub tax_id: Option<Option<String>>,
    /// New notes
    pub notes: Option<Option<String>>,
}

/// Creates a new client after validating the name.
pub async fn create_client(db: &DatabaseConnection, new: NewClient) -> Result<client::Model> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("client name cannot be empty"));
    }

    let row = client::ActiveModel {
        name: Set(new.name.trim().to_string()),
        kind: Set(new.kind),
        email: Set(new.email),
        phone: Set(new.phone),
        address: Set(new.address),
        tax_id: Set(new.tax_id),
        notes: Set(new.notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = row.insert(db).await?;

    crate::core::activity::record(
        db,
        "client",
        created.id,
        ActivityAction::Created,
        format!("client '{}' created", created.name),
    )
    .await?;

    Ok(created)
}

/// Finds a client by its unique ID.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Option<client::Model>> {
    Client::find_by_id(client_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists clients ordered by name, optionally filtered by kind and a
/// case-insensitive name fragment.
pub async fn list_clients(
    db: &DatabaseConnection,
    kind: Option<ClientKind>,
    search: Option<&str>,
) -> Result<Vec<client::Model>> {
    let mut query = Client::find();

    if let Some(kind) = kind {
        query = query.filter(client::Column::Kind.eq(kind));
    }
    if let Some(fragment) = search {
        query = query.filter(client::Column::Name.contains(fragment));
    }

    query
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies field changes to a client.
pub async fn update_client(
    db: &DatabaseConnection,
    client_id: i64,
    changes: ClientChanges,
) -> Result<client::Model> {
    let existing = Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "client",
            id: client_id,
        })?;

    let mut active: client::ActiveModel = existing.into();

    if let Some(name) = changes.name {
        if name.trim().is_empty() {
            return Err(Error::validation("client name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(phone) = changes.phone {
        active.phone = Set(phone);
    }
    if let Some(address) = changes.address {
        active.address = Set(address);
    }
    if let Some(tax_id) = changes.tax_id {
        active.tax_id = Set(tax_id);
    }
    if let Some(notes) = changes.notes {
        active.notes = Set(notes);
    }

    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "client",
        client_id,
        ActivityAction::Updated,
        "client updated",
    )
    .await?;

    Ok(updated)
}

/// Deletes a client unless orders, quotes, or relationships still
/// reference it.
pub async fn delete_client(db: &DatabaseConnection, client_id: i64) -> Result<()> {
    let existing = Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "client",
            id: client_id,
        })?;

    let order_refs = Order::find()
        .filter(order::Column::ClientId.eq(client_id))
        .count(db)
        .await?;
    if order_refs > 0 {
        return Err(Error::conflict(format!(
            "client is referenced by {order_refs} order(s)"
        )));
    }

    let quote_refs = Quote::find()
        .filter(quote::Column::ClientId.eq(client_id))
        .count(db)
        .await?;
    if quote_refs > 0 {
        return Err(Error::conflict(format!(
            "client is referenced by {quote_refs} quote(s)"
        )));
    }

    let link_refs = Relationship::find()
        .filter(
            relationship::Column::PersonId
                .eq(client_id)
                .or(relationship::Column::CompanyId.eq(client_id)),
        )
        .count(db)
        .await?;
    if link_refs > 0 {
        return Err(Error::conflict(format!(
            "client is referenced by {link_refs} relationship(s)"
        )));
    }

    let name = existing.name.clone();
    existing.delete(db).await?;

    crate::core::activity::record(
        db,
        "client",
        client_id,
        ActivityAction::Deleted,
        format!("client '{name}' deleted"),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_client, create_test_order, setup_test_db};

    #[tokio::test]
    async fn test_create_client_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_client(
            &db,
            NewClient {
                name: "   ".to_string(),
                kind: ClientKind::Individual,
                email: None,
                phone: None,
                address: None,
                tax_id: None,
                notes: None,
            },
        )
        .await;

        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_with_kind_filter() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_client(&db, "Alice").await?;
        create_client(
            &db,
            NewClient {
                name: "Printwell SA".to_string(),
                kind: ClientKind::Company,
                email: None,
                phone: None,
                address: None,
                tax_id: None,
                notes: None,
            },
        )
        .await?;

        let companies = list_clients(&db, Some(ClientKind::Company), None).await?;
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Printwell SA");

        let all = list_clients(&db, None, None).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_clients_search() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_client(&db, "Alice Carroll").await?;
        create_test_client(&db, "Bob").await?;

        let hits = list_clients(&db, None, Some("Carroll")).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alice Carroll");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_client_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_client(&db, "Alice").await?;

        let updated = update_client(
            &db,
            created.id,
            ClientChanges {
                email: Some(Some("alice@example.com".to_string())),
                phone: Some(None),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
        assert_eq!(updated.phone, None);
        assert_eq!(updated.name, "Alice");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unreferenced_client() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_client(&db, "Alice").await?;

        delete_client(&db, created.id).await?;
        assert!(get_client_by_id(&db, created.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_client_with_order_conflicts() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_client(&db, "Alice").await?;
        create_test_order(&db, created.id, 100.0).await?;

        let result = delete_client(&db, created.id).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));

        // The client must still exist
        assert!(get_client_by_id(&db, created.id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_client() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_client(&db, 404).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "client",
                id: 404
            }
        ));

        Ok(())
    }
}
