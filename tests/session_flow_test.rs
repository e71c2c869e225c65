//! End-to-end flow: process, capture a snapshot, regenerate its LUT, and
//! bulk-export the collection.

mod common;

use std::sync::Arc;

use cinegrade::models::TransferMethod;
use cinegrade::services::{ArtifactClient, ExportPipeline, GradingSession, SessionError, SnapshotStore};
use common::{fixtures, MockGradingService};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_full_grading_flow() {
    let service = MockGradingService::start().await;
    service.mock_process_ok(fixtures::bytes::PROCESSED_A).await;
    service.mock_lut_ok(fixtures::bytes::CUBE).await;

    let client = Arc::new(ArtifactClient::new(service.url()));
    let store = Arc::new(SnapshotStore::new());
    let mut session = GradingSession::new(Arc::clone(&client), Arc::clone(&store));

    session.set_target(fixtures::target_image());
    session.set_reference(fixtures::reference_image());
    session.set_method(TransferMethod::Reinhard);

    session.process().await.unwrap();
    session.take_snapshot(0.75).unwrap();

    let snapshots = store.all();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].intensity, 0.75);

    // Single-item LUT download uses the method-derived file name.
    let lut = session.download_lut(&snapshots[0]).await.unwrap();
    assert_eq!(lut.file_name, "cinematic_reinhard.cube");
    assert_eq!(lut.bytes, fixtures::bytes::CUBE);

    // The captured collection exports as one archive.
    let pipeline = ExportPipeline::new(client);
    let archive = pipeline.export(&snapshots).await.unwrap().unwrap();
    assert_eq!(archive.file_name, "cinematic_snapshots.zip");
}

#[tokio::test]
async fn test_processing_failure_leaves_no_side_effects() {
    let service = MockGradingService::start().await;
    service.mock_process_failure(500).await;

    let client = Arc::new(ArtifactClient::new(service.url()));
    let store = Arc::new(SnapshotStore::new());
    let mut session = GradingSession::new(client, Arc::clone(&store));

    session.set_target(fixtures::target_image());
    session.set_reference(fixtures::reference_image());

    let err = session.process().await.unwrap_err();
    assert!(matches!(err, SessionError::Processing(_)));
    assert!(session.processed().is_none());
    assert!(store.is_empty());
}
