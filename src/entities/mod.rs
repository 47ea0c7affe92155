//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod activity_log;
pub mod client;
pub mod enums;
pub mod material;
pub mod monthly_expense;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod quote;
pub mod quote_item;
pub mod relationship;
pub mod service;
pub mod service_material;
pub mod settings;
pub mod supplier;
pub mod supplier_material;

// Re-export specific types to avoid conflicts
pub use activity_log::{
    Column as ActivityLogColumn, Entity as ActivityLog, Model as ActivityLogModel,
};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use enums::{
    ActivityAction, ClientKind, InvoiceType, ItemKind, MarginKind, OrderStatus, PaymentStatus,
};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
pub use monthly_expense::{
    Column as MonthlyExpenseColumn, Entity as MonthlyExpense, Model as MonthlyExpenseModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use quote::{Column as QuoteColumn, Entity as Quote, Model as QuoteModel};
pub use quote_item::{Column as QuoteItemColumn, Entity as QuoteItem, Model as QuoteItemModel};
pub use relationship::{
    Column as RelationshipColumn, Entity as Relationship, Model as RelationshipModel,
};
pub use service::{Column as ServiceColumn, Entity as Service, Model as ServiceModel};
pub use service_material::{
    Column as ServiceMaterialColumn, Entity as ServiceMaterial, Model as ServiceMaterialModel,
};
pub use settings::{Column as SettingsColumn, Entity as Settings, Model as SettingsModel};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use supplier_material::{
    Column as SupplierMaterialColumn, Entity as SupplierMaterial, Model as SupplierMaterialModel,
};
