pub mod activities;
pub mod links;
pub mod participants;
pub mod trips;
