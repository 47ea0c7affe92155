//! Database connection and schema bootstrap.
//!
//! Uses `SeaORM`'s `Schema::create_table_from_entity` to generate the SQL
//! for every table from the entity definitions, so the schema always matches
//! the Rust structs without hand-written migrations. Also seeds the
//! single-row settings and a starter service catalog on first run.

use crate::entities::{
    ActivityLog, Client, Material, MonthlyExpense, Order, OrderItem, Payment, Quote, QuoteItem,
    Relationship, Service, ServiceMaterial, Settings, Supplier, SupplierMaterial, service,
};
use crate::errors::Result;
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Schema, Set,
};

/// Establishes a connection to the database.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions. Safe to call on an
/// existing database: every statement carries `IF NOT EXISTS`.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements: Vec<TableCreateStatement> = vec![
        schema.create_table_from_entity(Client),
        schema.create_table_from_entity(Relationship),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
        schema.create_table_from_entity(Quote),
        schema.create_table_from_entity(QuoteItem),
        schema.create_table_from_entity(Material),
        schema.create_table_from_entity(Supplier),
        schema.create_table_from_entity(SupplierMaterial),
        schema.create_table_from_entity(Service),
        schema.create_table_from_entity(ServiceMaterial),
        schema.create_table_from_entity(Payment),
        schema.create_table_from_entity(MonthlyExpense),
        schema.create_table_from_entity(ActivityLog),
        schema.create_table_from_entity(Settings),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}

/// Seeds the starter service catalog when the table is empty. The catalog is
/// user-editable afterwards; these rows only make a fresh install usable.
pub async fn seed_default_services(db: &DatabaseConnection) -> Result<()> {
    if Service::find().count(db).await? > 0 {
        return Ok(());
    }

    let defaults = [
        ("Copies", "copies"),
        ("Color printing", "color_printing"),
        ("Large format", "large_format"),
        ("Binding", "binding"),
        ("Lamination", "lamination"),
    ];

    for (name, key) in defaults {
        let row = service::ActiveModel {
            name: Set(name.to_string()),
            key: Set(key.to_string()),
            is_active: Set(true),
            ..Default::default()
        };
        row.insert(db).await?;
    }

    Ok(())
}
