pub mod config;
pub mod snapshot;

pub use config::{AppConfig, ExportConfig};
pub use snapshot::{
    ImageArtifact, LutRequest, Snapshot, SnapshotId, SourceImage, TransferMethod,
};
