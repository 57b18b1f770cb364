//! Shared domain building blocks for the planner backend.
//!
//! Everything here is pure: identifier and timestamp types, the
//! [`error::CoreError`] taxonomy, payload validation helpers, participant
//! display-name derivation and itinerary grouping.

pub mod error;
pub mod itinerary;
pub mod naming;
pub mod types;
pub mod validation;
