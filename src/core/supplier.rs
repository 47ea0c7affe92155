//! Supplier catalog business logic, including the per-material offer
//! price book. Suppliers are soft-deletable; offers are upserted per
//! (supplier, material) pair.

use crate::{
    entities::{
        Material, Supplier, SupplierMaterial, enums::ActivityAction, supplier, supplier_material,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new supplier.
pub async fn create_supplier(
    db: &DatabaseConnection,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
) -> Result<supplier::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("supplier name cannot be empty"));
    }

    let row = supplier::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email),
        phone: Set(phone),
        notes: Set(notes),
        is_active: Set(true),
        ..Default::default()
    };
    let created = row.insert(db).await?;

    crate::core::activity::record(
        db,
        "supplier",
        created.id,
        ActivityAction::Created,
        format!("supplier '{}' created", created.name),
    )
    .await?;

    Ok(created)
}

/// Finds a supplier by its unique ID.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Option<supplier::Model>> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists suppliers ordered by name; inactive rows only when requested.
pub async fn list_suppliers(
    db: &DatabaseConnection,
    include_inactive: bool,
) -> Result<Vec<supplier::Model>> {
    let mut query = Supplier::find();
    if !include_inactive {
        query = query.filter(supplier::Column::IsActive.eq(true));
    }
    query
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a supplier's fields.
pub async fn update_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
    name: Option<String>,
    email: Option<Option<String>>,
    phone: Option<Option<String>>,
    notes: Option<Option<String>>,
) -> Result<supplier::Model> {
    let existing = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "supplier",
            id: supplier_id,
        })?;

    let mut active: supplier::ActiveModel = existing.into();
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::validation("supplier name cannot be empty"));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = email {
        active.email = Set(email);
    }
    if let Some(phone) = phone {
        active.phone = Set(phone);
    }
    if let Some(notes) = notes {
        active.notes = Set(notes);
    }

    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "supplier",
        supplier_id,
        ActivityAction::Updated,
        "supplier updated",
    )
    .await?;

    Ok(updated)
}

/// Soft-deletes a supplier by clearing its active flag.
pub async fn deactivate_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<supplier::Model> {
    let existing = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "supplier",
            id: supplier_id,
        })?;

    let mut active: supplier::ActiveModel = existing.into();
    active.is_active = Set(false);
    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "supplier",
        supplier_id,
        ActivityAction::Deleted,
        "supplier deactivated",
    )
    .await?;

    Ok(updated)
}

/// Records the price a supplier offers for a material, updating the
/// existing offer row when one exists for the pair.
pub async fn set_offer(
    db: &DatabaseConnection,
    supplier_id: i64,
    material_id: i64,
    price: f64,
) -> Result<supplier_material::Model> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::validation("offer price must be non-negative"));
    }

    Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "supplier",
            id: supplier_id,
        })?;
    Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "material",
            id: material_id,
        })?;

    let existing = SupplierMaterial::find()
        .filter(supplier_material::Column::SupplierId.eq(supplier_id))
        .filter(supplier_material::Column::MaterialId.eq(material_id))
        .one(db)
        .await?;

    let now = chrono::Utc::now();
    let offer = if let Some(row) = existing {
        let mut active: supplier_material::ActiveModel = row.into();
        active.price = Set(price);
        active.updated_at = Set(now);
        active.update(db).await?
    } else {
        let row = supplier_material::ActiveModel {
            supplier_id: Set(supplier_id),
            material_id: Set(material_id),
            price: Set(price),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(db).await?
    };

    Ok(offer)
}

/// Lists the offers of a supplier.
pub async fn list_offers_for_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Vec<supplier_material::Model>> {
    SupplierMaterial::find()
        .filter(supplier_material::Column::SupplierId.eq(supplier_id))
        .order_by_asc(supplier_material::Column::MaterialId)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::material::create_material;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_set_offer_upserts_per_pair() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier =
            create_supplier(&db, "PaperCo".to_string(), None, None, None).await?;
        let material = create_material(&db, "A4 paper".to_string(), None, None).await?;

        let first = set_offer(&db, supplier.id, material.id, 12.5).await?;
        assert_eq!(first.price, 12.5);

        // Same pair again updates in place
        let second = set_offer(&db, supplier.id, material.id, 13.0).await?;
        assert_eq!(second.id, first.id);
        assert_eq!(second.price, 13.0);

        let offers = list_offers_for_supplier(&db, supplier.id).await?;
        assert_eq!(offers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_offer_unknown_material() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier =
            create_supplier(&db, "PaperCo".to_string(), None, None, None).await?;

        let result = set_offer(&db, supplier.id, 999, 10.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "material",
                id: 999
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_supplier() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier =
            create_supplier(&db, "PaperCo".to_string(), None, None, None).await?;

        deactivate_supplier(&db, supplier.id).await?;
        let active = list_suppliers(&db, false).await?;
        assert!(active.is_empty());

        Ok(())
    }
}
