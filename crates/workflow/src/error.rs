use planner_core::error::CoreError;
use planner_core::types::EntityId;
use planner_db::StoreError;

/// Convert a gateway failure into the domain taxonomy.
///
/// Database failures are logged here, with the operation and entity id,
/// because their detail never reaches the client.
pub(crate) fn from_store(err: StoreError, operation: &'static str, id: Option<EntityId>) -> CoreError {
    match err {
        StoreError::NotFound { entity, id } => CoreError::NotFound { entity, id },
        StoreError::Database(e) => {
            match id {
                Some(id) => tracing::error!(error = %e, operation, %id, "Storage operation failed"),
                None => tracing::error!(error = %e, operation, "Storage operation failed"),
            }
            CoreError::Storage(format!("{operation}: {e}"))
        }
    }
}
