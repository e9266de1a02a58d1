//! HTTP client for the PlantLab API.
//!
//! Thin per-entity wrappers over the JSON API plus client-side context
//! management (`~/.plantlab/config.toml`). All calls are blocking
//! request/response cycles; failures are reported to the caller, never
//! retried here.

pub mod api;
pub mod config;
pub mod entity;
pub mod operators;

pub use api::Api;
pub use config::{ClientConfig, Context};
pub use entity::EntityClient;
pub use operators::{Operator, OperatorClient, OperatorPayload};
