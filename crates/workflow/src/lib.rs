//! Trip workflow orchestration.
//!
//! [`TripWorkflow`] owns the business rules of the planner: it parses and
//! validates input, reads and writes through a
//! [`PersistenceGateway`](planner_db::PersistenceGateway), and triggers
//! notifications through a
//! [`NotificationDispatcher`](planner_notify::NotificationDispatcher) once
//! the durable write has succeeded.

mod error;
pub mod service;
pub mod views;

pub use service::TripWorkflow;
pub use views::{ActivityDay, ParticipantView};
