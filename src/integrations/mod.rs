//! Outbound integrations: file storage, payment gateway checkout,
//! transactional email, and WhatsApp delivery.
//!
//! Every integration degrades gracefully when unconfigured: storage falls
//! back to a local directory, message delivery becomes a logged no-op, and
//! the gateway returns an upstream error the API maps to a 502.

pub mod email;
pub mod gateway;
pub mod storage;
pub mod whatsapp;
