//! Core business logic, independent of the HTTP layer.

pub mod activity;
pub mod client;
pub mod expense;
pub mod invoice;
pub mod material;
pub mod notify;
pub mod order;
pub mod payment;
pub mod quote;
pub mod relationship;
pub mod report;
pub mod service;
pub mod settings;
pub mod supplier;
