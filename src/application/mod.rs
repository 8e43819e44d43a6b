//! Application layer: the load pipeline as a service
//!
//! This layer orchestrates domain logic for external collaborators
//! (CLI today, an HTTP layer if one is bolted on).

pub mod error;
pub mod service;

pub use error::{ApplicationError, ApplicationResult};
pub use service::{Dataset, DatasetSession, MAX_UPLOAD_BYTES};
