//! Athletic Trainer: a small content-lookup website for sports injuries.
//!
//! Visitors browse or search a read-only catalog of injuries and walk a
//! fixed questionnaire to get a suggested diagnosis for a body part. The
//! serving path is a static route table dispatching to handlers that read
//! through repositories over two Spanner tables.

pub mod config;
pub mod error;
pub mod handlers;
pub mod input;
pub mod models;
pub mod repository;
pub mod router;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;
