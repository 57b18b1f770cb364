//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use planner_core::types::EntityId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body of `POST /trips`.
#[derive(Debug, Serialize)]
pub struct TripCreated {
    pub trip_id: EntityId,
}

/// Body of `POST /trips/{trip_id}/activities`.
#[derive(Debug, Serialize)]
pub struct ActivityCreated {
    pub activity_id: EntityId,
}

/// Body of `POST /trips/{trip_id}/links`.
#[derive(Debug, Serialize)]
pub struct LinkCreated {
    pub link_id: EntityId,
}
