//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any `PgExecutor`, when the call has to join
//! a transaction) as the first argument.

pub mod activity_repo;
pub mod link_repo;
pub mod participant_repo;
pub mod trip_repo;

pub use activity_repo::ActivityRepo;
pub use link_repo::LinkRepo;
pub use participant_repo::ParticipantRepo;
pub use trip_repo::TripRepo;
