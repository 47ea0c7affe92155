//! Material catalog business logic. Soft-deletable via `is_active`.

use crate::{
    entities::{Material, enums::ActivityAction, material},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new material.
pub async fn create_material(
    db: &DatabaseConnection,
    name: String,
    unit: Option<String>,
    notes: Option<String>,
) -> Result<material::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("material name cannot be empty"));
    }

    let row = material::ActiveModel {
        name: Set(name.trim().to_string()),
        unit: Set(unit),
        notes: Set(notes),
        is_active: Set(true),
        ..Default::default()
    };
    let created = row.insert(db).await?;

    crate::core::activity::record(
        db,
        "material",
        created.id,
        ActivityAction::Created,
        format!("material '{}' created", created.name),
    )
    .await?;

    Ok(created)
}

/// Finds a material by its unique ID.
pub async fn get_material_by_id(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Option<material::Model>> {
    Material::find_by_id(material_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists materials ordered by name; inactive rows only when requested.
pub async fn list_materials(
    db: &DatabaseConnection,
    include_inactive: bool,
) -> Result<Vec<material::Model>> {
    let mut query = Material::find();
    if !include_inactive {
        query = query.filter(material::Column::IsActive.eq(true));
    }
    query
        .order_by_asc(material::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a material's fields.
pub async fn update_material(
    db: &DatabaseConnection,
    material_id: i64,
    name: Option<String>,
    unit: Option<Option<String>>,
    notes: Option<Option<String>>,
) -> Result<material::Model> {
    let existing = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "material",
            id: material_id,
        })?;

    let mut active: material::ActiveModel = existing.into();
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::validation("material name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(unit) = unit {
        active.unit = Set(unit);
    }
    if let Some(notes) = notes {
        active.notes = Set(notes);
    }

    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "material",
        material_id,
        ActivityAction::Updated,
        "material updated",
    )
    .await?;

    Ok(updated)
}

/// Soft-deletes a material by clearing its active flag.
pub async fn deactivate_material(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<material::Model> {
    let existing = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "material",
            id: material_id,
        })?;

    let mut active: material::ActiveModel = existing.into();
    active.is_active = Set(false);
    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "material",
        material_id,
        ActivityAction::Deleted,
        "material deactivated",
    )
    .await?;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_soft_delete_hides_from_default_listing() -> Result<()> {
        let db = setup_test_db().await?;

        let paper = create_material(&db, "A4 paper".to_string(), None, None).await?;
        create_material(&db, "Toner".to_string(), None, None).await?;

        deactivate_material(&db, paper.id).await?;

        let active = list_materials(&db, false).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Toner");

        // Still present, just inactive
        let all = list_materials(&db, true).await?;
        assert_eq!(all.len(), 2);
        let row = get_material_by_id(&db, paper.id).await?.unwrap();
        assert!(!row.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_material_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_material(&db, "".to_string(), None, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }
}
