use std::sync::Arc;

use crate::error::{LutGenerationError, ProcessingError};
use crate::models::{ImageArtifact, Snapshot, SnapshotId, SourceImage, TransferMethod};
use crate::services::{ArtifactClient, SnapshotStore};

/// Error from a grading-session operation
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("both a target and a reference image are required")]
    MissingInput,

    #[error("no processed result to capture")]
    NothingToCapture,

    #[error("processing error: {0}")]
    Processing(#[from] ProcessingError),

    #[error("LUT error: {0}")]
    Lut(#[from] LutGenerationError),
}

/// A named LUT file ready for a client-side save.
pub struct LutFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One user's grading session: the current input images, the processing
/// parameters, the last processed result, and the shared snapshot store.
///
/// On a processing failure the previous result stays untouched and no
/// snapshot side effects occur.
pub struct GradingSession {
    client: Arc<ArtifactClient>,
    store: Arc<SnapshotStore>,
    target: Option<SourceImage>,
    reference: Option<SourceImage>,
    method: TransferMethod,
    preserve_luminance: bool,
    processed: Option<ImageArtifact>,
}

impl GradingSession {
    pub fn new(client: Arc<ArtifactClient>, store: Arc<SnapshotStore>) -> Self {
        Self {
            client,
            store,
            target: None,
            reference: None,
            method: TransferMethod::Histogram,
            preserve_luminance: true,
            processed: None,
        }
    }

    /// Install a new target image. Any processed result is stale now.
    pub fn set_target(&mut self, image: SourceImage) {
        self.target = Some(image);
        self.processed = None;
    }

    /// Install a new reference image. Any processed result is stale now.
    pub fn set_reference(&mut self, image: SourceImage) {
        self.reference = Some(image);
        self.processed = None;
    }

    /// Exchange target and reference.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.target, &mut self.reference);
        self.processed = None;
    }

    pub fn set_method(&mut self, method: TransferMethod) {
        self.method = method;
    }

    pub fn set_preserve_luminance(&mut self, preserve: bool) {
        self.preserve_luminance = preserve;
    }

    pub fn method(&self) -> TransferMethod {
        self.method
    }

    pub fn processed(&self) -> Option<&ImageArtifact> {
        self.processed.as_ref()
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Run the color transfer with the current inputs and parameters.
    pub async fn process(&mut self) -> Result<&ImageArtifact, SessionError> {
        let (target, reference) = match (&self.target, &self.reference) {
            (Some(target), Some(reference)) => (target, reference),
            _ => return Err(SessionError::MissingInput),
        };

        let bytes = self
            .client
            .process(target, reference, self.method, self.preserve_luminance)
            .await?;

        Ok(self.processed.insert(ImageArtifact::from_bytes(bytes)))
    }

    /// Capture the current processed result together with the parameters
    /// that produced it. `blend_opacity` is recorded exactly as the
    /// snapshot's intensity.
    pub fn take_snapshot(&self, blend_opacity: f32) -> Result<SnapshotId, SessionError> {
        let (processed, target, reference) = match (&self.processed, &self.target, &self.reference)
        {
            (Some(p), Some(t), Some(r)) => (p, t, r),
            _ => return Err(SessionError::NothingToCapture),
        };

        // The base image is a strong alias of the target bytes, so the
        // snapshot survives the session moving on to other inputs.
        let snapshot = Snapshot::capture(
            processed.clone(),
            ImageArtifact::Bytes(target.bytes.clone()),
            reference.clone(),
            self.method,
            self.preserve_luminance,
            blend_opacity,
        );
        let id = snapshot.id;
        self.store.insert(snapshot);
        Ok(id)
    }

    /// Regenerate one snapshot's LUT for a single-item download.
    pub async fn download_lut(&self, snapshot: &Snapshot) -> Result<LutFile, SessionError> {
        let bytes = self.client.generate_lut(&snapshot.lut_request()).await?;
        Ok(LutFile {
            file_name: format!("cinematic_{}.cube", snapshot.method),
            bytes,
        })
    }
}
