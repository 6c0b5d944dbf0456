//! One handler module per menu action. Every handler is a stateless
//! request-to-response mapping: it opens its own connection, runs its SQL,
//! and lets `DashError`'s `IntoResponse` turn any failure into a banner.
//! No action can take the session down, writes included.

pub mod analytics;
pub mod insert;
pub mod inventory;
pub mod orders;
pub mod query;
pub mod tables;
