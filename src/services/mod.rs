pub mod artifact_client;
pub mod compare_slider;
pub mod export_pipeline;
pub mod session;
pub mod snapshot_store;

pub use artifact_client::ArtifactClient;
pub use compare_slider::{CompareFrame, CompareSliderController, ContainerBounds};
pub use export_pipeline::{ExportArchive, ExportPipeline};
pub use session::{GradingSession, LutFile, SessionError};
pub use snapshot_store::SnapshotStore;
