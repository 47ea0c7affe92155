//! Service catalog business logic.
//!
//! Services are the user-editable work types (the original system's fixed
//! enumeration). Each carries an internal slug key, unique among active
//! services, plus declarations of the materials it typically consumes.

use crate::{
    entities::{
        Material, Service, ServiceMaterial, enums::ActivityAction, service, service_material,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::validation(
            "service key must be lowercase letters, digits, and underscores",
        ))
    }
}

/// Creates a new service work type.
pub async fn create_service(
    db: &DatabaseConnection,
    name: String,
    key: String,
) -> Result<service::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("service name cannot be empty"));
    }
    validate_key(&key)?;

    let duplicate = Service::find()
        .filter(service::Column::Key.eq(&key))
        .filter(service::Column::IsActive.eq(true))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::conflict(format!(
            "a service with key '{key}' already exists"
        )));
    }

    let row = service::ActiveModel {
        name: Set(name.trim().to_string()),
        key: Set(key),
        is_active: Set(true),
        ..Default::default()
    };
    let created = row.insert(db).await?;

    crate::core::activity::record(
        db,
        "service",
        created.id,
        ActivityAction::Created,
        format!("service '{}' created", created.name),
    )
    .await?;

    Ok(created)
}

/// Finds a service by its unique ID.
pub async fn get_service_by_id(
    db: &DatabaseConnection,
    service_id: i64,
) -> Result<Option<service::Model>> {
    Service::find_by_id(service_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists services ordered by name; inactive rows only when requested.
pub async fn list_services(
    db: &DatabaseConnection,
    include_inactive: bool,
) -> Result<Vec<service::Model>> {
    let mut query = Service::find();
    if !include_inactive {
        query = query.filter(service::Column::IsActive.eq(true));
    }
    query
        .order_by_asc(service::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renames a service. The key is immutable once created.
pub async fn update_service(
    db: &DatabaseConnection,
    service_id: i64,
    name: String,
) -> Result<service::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("service name cannot be empty"));
    }

    let existing = Service::find_by_id(service_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "service",
            id: service_id,
        })?;

    let mut active: service::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "service",
        service_id,
        ActivityAction::Updated,
        "service renamed",
    )
    .await?;

    Ok(updated)
}

/// Soft-deletes a service by clearing its active flag.
pub async fn deactivate_service(
    db: &DatabaseConnection,
    service_id: i64,
) -> Result<service::Model> {
    let existing = Service::find_by_id(service_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "service",
            id: service_id,
        })?;

    let mut active: service::ActiveModel = existing.into();
    active.is_active = Set(false);
    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "service",
        service_id,
        ActivityAction::Deleted,
        "service deactivated",
    )
    .await?;

    Ok(updated)
}

/// Declares that a service typically consumes a material. Idempotent per
/// (service, material) pair.
pub async fn add_material(
    db: &DatabaseConnection,
    service_id: i64,
    material_id: i64,
) -> Result<service_material::Model> {
    Service::find_by_id(service_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "service",
            id: service_id,
        })?;
    Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "material",
            id: material_id,
        })?;

    let existing = ServiceMaterial::find()
        .filter(service_material::Column::ServiceId.eq(service_id))
        .filter(service_material::Column::MaterialId.eq(material_id))
        .one(db)
        .await?;
    if let Some(row) = existing {
        return Ok(row);
    }

    let row = service_material::ActiveModel {
        service_id: Set(service_id),
        material_id: Set(material_id),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Removes a material declaration from a service.
pub async fn remove_material(
    db: &DatabaseConnection,
    service_id: i64,
    material_id: i64,
) -> Result<()> {
    let existing = ServiceMaterial::find()
        .filter(service_material::Column::ServiceId.eq(service_id))
        .filter(service_material::Column::MaterialId.eq(material_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "service material",
            id: material_id,
        })?;

    existing.delete(db).await?;
    Ok(())
}

/// Lists the material declarations of a service.
pub async fn list_materials_for_service(
    db: &DatabaseConnection,
    service_id: i64,
) -> Result<Vec<service_material::Model>> {
    ServiceMaterial::find()
        .filter(service_material::Column::ServiceId.eq(service_id))
        .order_by_asc(service_material::Column::MaterialId)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::material::create_material;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_duplicate_key_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        create_service(&db, "Binding".to_string(), "binding".to_string()).await?;
        let result = create_service(&db, "Other".to_string(), "binding".to_string()).await;

        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));
        Ok(())
    }

    #[tokio::test]
    async fn test_key_format_validated() -> Result<()> {
        let db = setup_test_db().await?;

        for key in ["", "Bad Key", "UPPER", "hy-phen"] {
            let result = create_service(&db, "X".to_string(), key.to_string()).await;
            assert!(matches!(
                result.unwrap_err(),
                Error::Validation { message: _ }
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_key_reusable_after_deactivation() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_service(&db, "Binding".to_string(), "binding".to_string()).await?;
        deactivate_service(&db, first.id).await?;

        // Key uniqueness only applies among active services
        let second = create_service(&db, "Binding v2".to_string(), "binding".to_string()).await?;
        assert_ne!(second.id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_material_declarations() -> Result<()> {
        let db = setup_test_db().await?;
        let service = create_service(&db, "Binding".to_string(), "binding".to_string()).await?;
        let material = create_material(&db, "Spiral".to_string(), None, None).await?;

        let first = add_material(&db, service.id, material.id).await?;
        // Idempotent on the same pair
        let again = add_material(&db, service.id, material.id).await?;
        assert_eq!(again.id, first.id);

        assert_eq!(list_materials_for_service(&db, service.id).await?.len(), 1);

        remove_material(&db, service.id, material.id).await?;
        assert!(list_materials_for_service(&db, service.id).await?.is_empty());

        Ok(())
    }
}
