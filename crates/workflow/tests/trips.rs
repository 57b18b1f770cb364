mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use planner_core::error::CoreError;
use planner_db::models::trip::UpdateTrip;

use common::{at, broken_workflow, harness, trip_to, RecordingNotifier, Sent};

// ---------------------------------------------------------------------------
// CreateTrip / GetTrip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_trip_is_unconfirmed_and_round_trips() {
    let h = harness();
    let input = trip_to("Paris", &["bob@x.com"]);

    let trip_id = h.workflow.create_trip(&input).await.unwrap();
    let trip = h.workflow.get_trip(&trip_id.to_string()).await.unwrap();

    assert_eq!(trip.id, trip_id);
    assert_eq!(trip.destination, "Paris");
    assert_eq!(trip.owner_name, "Olivia");
    assert_eq!(trip.owner_email, "olivia@example.com");
    assert_eq!(trip.starts_at, input.starts_at);
    assert_eq!(trip.ends_at, input.ends_at);
    assert!(!trip.is_confirmed);
}

#[tokio::test]
async fn create_trip_notifies_the_owner() {
    let h = harness();
    let trip_id = h.workflow.create_trip(&trip_to("Paris", &[])).await.unwrap();
    h.settle().await;

    assert_eq!(h.notifier.sent(), vec![Sent::Owner(trip_id)]);
}

#[tokio::test]
async fn create_trip_stores_initial_invitees() {
    let h = harness();
    let trip_id = h
        .workflow
        .create_trip(&trip_to("Paris", &["bob@x.com", "carol@x.com"]))
        .await
        .unwrap();

    let participants = h
        .workflow
        .list_participants(&trip_id.to_string())
        .await
        .unwrap();
    let emails: Vec<_> = participants.iter().map(|p| p.email.as_str()).collect();
    assert_eq!(emails, vec!["bob@x.com", "carol@x.com"]);
    assert!(participants.iter().all(|p| !p.is_confirmed));
}

#[tokio::test]
async fn invalid_create_payload_has_no_side_effects() {
    let h = harness();
    let mut input = trip_to("Paris", &["not-an-email"]);
    input.destination = "  ".to_string();

    let err = h.workflow.create_trip(&input).await.unwrap_err();
    h.settle().await;

    assert_matches!(err, CoreError::Validation(_));
    assert_eq!(h.gateway.calls(), 0);
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn trip_must_end_after_it_starts() {
    let h = harness();
    let mut input = trip_to("Paris", &[]);
    input.ends_at = input.starts_at;

    let err = h.workflow.create_trip(&input).await.unwrap_err();
    assert_matches!(err, CoreError::Validation(msg) if msg.contains("ends_at must be after starts_at"));
}

#[tokio::test]
async fn unknown_trip_is_not_found() {
    let h = harness();
    let err = h
        .workflow
        .get_trip("67e55044-10b1-426f-9247-bb680e5fe0c8")
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Trip", .. });
}

// ---------------------------------------------------------------------------
// UpdateTrip
// ---------------------------------------------------------------------------

fn rome() -> UpdateTrip {
    UpdateTrip {
        destination: "Rome".to_string(),
        starts_at: at(2024, 7, 1, 0, 0),
        ends_at: at(2024, 7, 5, 0, 0),
    }
}

#[tokio::test]
async fn update_trip_never_changes_confirmation() {
    let h = harness();
    let trip_id = h
        .workflow
        .create_trip(&trip_to("Paris", &[]))
        .await
        .unwrap()
        .to_string();

    h.workflow.update_trip(&trip_id, &rome()).await.unwrap();
    let trip = h.workflow.get_trip(&trip_id).await.unwrap();
    assert_eq!(trip.destination, "Rome");
    assert!(!trip.is_confirmed);

    h.workflow.confirm_trip(&trip_id).await.unwrap();
    h.workflow.update_trip(&trip_id, &rome()).await.unwrap();
    assert!(h.workflow.get_trip(&trip_id).await.unwrap().is_confirmed);
}

#[tokio::test]
async fn update_trip_sends_nothing() {
    let h = harness();
    let trip_id = h.workflow.create_trip(&trip_to("Paris", &[])).await.unwrap();
    h.settle().await;

    h.workflow
        .update_trip(&trip_id.to_string(), &rome())
        .await
        .unwrap();
    h.settle().await;

    assert_eq!(h.notifier.sent(), vec![Sent::Owner(trip_id)]);
}

#[tokio::test]
async fn update_unknown_trip_is_not_found() {
    let h = harness();
    let err = h
        .workflow
        .update_trip("67e55044-10b1-426f-9247-bb680e5fe0c8", &rome())
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Trip", .. });
}

// ---------------------------------------------------------------------------
// ConfirmTrip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn confirm_trip_persists_and_invites_participants() {
    let h = harness();
    let trip_id = h
        .workflow
        .create_trip(&trip_to("Paris", &["bob@x.com", "carol@x.com"]))
        .await
        .unwrap();

    h.workflow.confirm_trip(&trip_id.to_string()).await.unwrap();
    h.settle().await;

    assert!(h.workflow.get_trip(&trip_id.to_string()).await.unwrap().is_confirmed);
    let batch = h
        .notifier
        .sent()
        .into_iter()
        .find_map(|s| match s {
            Sent::Participants(id, recipients) if id == trip_id => Some(recipients),
            _ => None,
        })
        .expect("participants notification");
    let names: Vec<_> = batch.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["bob", "carol"]);
}

#[tokio::test]
async fn confirm_trip_twice_resends_invitations() {
    let h = harness();
    let trip_id = h
        .workflow
        .create_trip(&trip_to("Paris", &["bob@x.com"]))
        .await
        .unwrap()
        .to_string();

    h.workflow.confirm_trip(&trip_id).await.unwrap();
    h.workflow.confirm_trip(&trip_id).await.unwrap();
    h.settle().await;

    let batches = h
        .notifier
        .sent()
        .into_iter()
        .filter(|s| matches!(s, Sent::Participants(..)))
        .count();
    assert_eq!(batches, 2);
}

#[tokio::test]
async fn confirm_unknown_trip_is_not_found_and_silent() {
    let h = harness();
    let err = h
        .workflow
        .confirm_trip("67e55044-10b1-426f-9247-bb680e5fe0c8")
        .await
        .unwrap_err();
    h.settle().await;

    assert_matches!(err, CoreError::NotFound { entity: "Trip", .. });
    assert!(h.notifier.sent().is_empty());
}

// ---------------------------------------------------------------------------
// Storage failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_failures_surface_as_storage_errors() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = broken_workflow(notifier.clone());

    let err = workflow.create_trip(&trip_to("Paris", &[])).await.unwrap_err();
    assert_matches!(err, CoreError::Storage(_));

    let err = workflow
        .confirm_trip("67e55044-10b1-426f-9247-bb680e5fe0c8")
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Storage(_));

    workflow.dispatcher().wait_idle().await;
    assert!(notifier.sent().is_empty());
}
