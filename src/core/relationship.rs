//! Relationship business logic - Links individuals to companies.
//!
//! A relationship is unique per `(person_id, company_id)` pair and both
//! ends must exist with the matching client kinds.

use crate::{
    entities::{
        Client, Relationship,
        enums::{ActivityAction, ClientKind},
        relationship,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a relationship after checking both ends and the duplicate guard.
pub async fn create_relationship(
    db: &DatabaseConnection,
    person_id: i64,
    company_id: i64,
    role: String,
) -> Result<relationship::Model> {
    let person = Client::find_by_id(person_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "client",
            id: person_id,
        })?;
    if person.kind != ClientKind::Individual {
        return Err(Error::validation(
            "person side of a relationship must be an individual client",
        ));
    }

    let company = Client::find_by_id(company_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "client",
            id: company_id,
        })?;
    if company.kind != ClientKind::Company {
        return Err(Error::validation(
            "company side of a relationship must be a company client",
        ));
    }

    let duplicate = Relationship::find()
        .filter(relationship::Column::PersonId.eq(person_id))
        .filter(relationship::Column::CompanyId.eq(company_id))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::conflict(
            "relationship already exists for this person and company",
        ));
    }

    let row = relationship::ActiveModel {
        person_id: Set(person_id),
        company_id: Set(company_id),
        role: Set(role),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = row.insert(db).await?;

    crate::core::activity::record(
        db,
        "relationship",
        created.id,
        ActivityAction::Created,
        format!("linked client {person_id} to company {company_id}"),
    )
    .await?;

    Ok(created)
}

/// Lists relationships, optionally filtered by either end.
pub async fn list_relationships(
    db: &DatabaseConnection,
    person_id: Option<i64>,
    company_id: Option<i64>,
) -> Result<Vec<relationship::Model>> {
    let mut query = Relationship::find();

    if let Some(id) = person_id {
        query = query.filter(relationship::Column::PersonId.eq(id));
    }
    if let Some(id) = company_id {
        query = query.filter(relationship::Column::CompanyId.eq(id));
    }

    query
        .order_by_asc(relationship::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a relationship. Allowed at any time.
pub async fn delete_relationship(db: &DatabaseConnection, relationship_id: i64) -> Result<()> {
    let existing = Relationship::find_by_id(relationship_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "relationship",
            id: relationship_id,
        })?;

    existing.delete(db).await?;

    crate::core::activity::record(
        db,
        "relationship",
        relationship_id,
        ActivityAction::Deleted,
        "relationship deleted",
    )
    .await?;

    Ok(())
}
