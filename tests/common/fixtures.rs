//! Test fixtures and constants.

use cinegrade::models::{ImageArtifact, Snapshot, SourceImage, TransferMethod};

/// ASCII stand-ins for binary artifacts, so multipart bodies stay valid
/// UTF-8 and string matchers can inspect them.
pub mod bytes {
    pub const PROCESSED_A: &[u8] = b"PROCESSED-IMAGE-A";
    pub const PROCESSED_B: &[u8] = b"PROCESSED-IMAGE-B";
    pub const REFERENCE: &[u8] = b"REFERENCE-IMAGE";
    pub const TARGET: &[u8] = b"TARGET-IMAGE";
    pub const CUBE: &[u8] = b"TITLE \"Cinematic_AI\"\nLUT_3D_SIZE 2\n";
}

pub fn reference_image() -> SourceImage {
    SourceImage::new("reference.png", bytes::REFERENCE.to_vec())
}

pub fn target_image() -> SourceImage {
    SourceImage::new("target.png", bytes::TARGET.to_vec())
}

/// A snapshot whose processed image is held in memory
pub fn local_snapshot(method: TransferMethod, processed: &[u8], intensity: f32) -> Snapshot {
    Snapshot::capture(
        ImageArtifact::from_bytes(processed.to_vec()),
        ImageArtifact::from_bytes(bytes::TARGET.to_vec()),
        reference_image(),
        method,
        true,
        intensity,
    )
}

/// A snapshot whose processed image lives behind a URL
pub fn remote_snapshot(method: TransferMethod, url: String, intensity: f32) -> Snapshot {
    Snapshot::capture(
        ImageArtifact::Remote(url),
        ImageArtifact::from_bytes(bytes::TARGET.to_vec()),
        reference_image(),
        method,
        true,
        intensity,
    )
}
