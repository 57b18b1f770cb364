//! Entity models and payload DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` DTOs for the payloads that create or change it

pub mod activity;
pub mod link;
pub mod participant;
pub mod trip;
