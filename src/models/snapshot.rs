use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Color-transfer algorithm implemented by the processing service.
///
/// The wire format is the lowercase name; it also appears in exported
/// file names (`snap_3_reinhard.png`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferMethod {
    Histogram,
    Reinhard,
    Covariance,
    Kmeans,
}

impl TransferMethod {
    pub const ALL: [TransferMethod; 4] = [
        TransferMethod::Histogram,
        TransferMethod::Reinhard,
        TransferMethod::Covariance,
        TransferMethod::Kmeans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMethod::Histogram => "histogram",
            TransferMethod::Reinhard => "reinhard",
            TransferMethod::Covariance => "covariance",
            TransferMethod::Kmeans => "kmeans",
        }
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "histogram" => Ok(TransferMethod::Histogram),
            "reinhard" => Ok(TransferMethod::Reinhard),
            "covariance" => Ok(TransferMethod::Covariance),
            "kmeans" => Ok(TransferMethod::Kmeans),
            other => Err(format!(
                "unknown transfer method '{other}' (expected histogram, reinhard, covariance or kmeans)"
            )),
        }
    }
}

/// An image file as supplied by the user (upload or disk).
///
/// Bytes are shared, so snapshots can retain the reference image for later
/// LUT regeneration without copying it per snapshot.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

impl SourceImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Reference to the bytes of a computed image.
///
/// `Bytes` is a strong owning handle; it can never dangle. `Remote` points
/// at a resource whose lifetime this subsystem does not control, so
/// consumers must tolerate it no longer resolving.
#[derive(Debug, Clone)]
pub enum ImageArtifact {
    Bytes(Arc<[u8]>),
    Remote(String),
}

impl ImageArtifact {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        ImageArtifact::Bytes(bytes.into())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ImageArtifact::Bytes(_))
    }
}

/// Unique identifier of a snapshot, assigned at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(Uuid);

impl SnapshotId {
    pub fn new() -> Self {
        SnapshotId(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable record of one processing result and the exact parameters that
/// produced it.
///
/// `reference_source`, `method`, `preserve_luminance` and `intensity` are
/// precisely what must be resupplied to regenerate the snapshot's LUT;
/// they never change after capture.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub captured_at: DateTime<Local>,
    /// The processed (graded) image this snapshot preserves.
    pub processed: ImageArtifact,
    /// The ungraded original, aliased from the session for comparison views.
    pub base: ImageArtifact,
    pub reference_source: SourceImage,
    pub method: TransferMethod,
    pub preserve_luminance: bool,
    /// Blend opacity in effect at capture time, clamped into [0, 1].
    pub intensity: f32,
}

impl Snapshot {
    pub fn capture(
        processed: ImageArtifact,
        base: ImageArtifact,
        reference_source: SourceImage,
        method: TransferMethod,
        preserve_luminance: bool,
        intensity: f32,
    ) -> Self {
        Self {
            id: SnapshotId::new(),
            captured_at: Local::now(),
            processed,
            base,
            reference_source,
            method,
            preserve_luminance,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    /// The recorded parameters needed to regenerate this snapshot's LUT.
    pub fn lut_request(&self) -> LutRequest {
        LutRequest {
            reference: self.reference_source.clone(),
            method: self.method,
            preserve_luminance: self.preserve_luminance,
            intensity: self.intensity,
        }
    }

    /// Plain-text metadata record bundled next to the exported image.
    /// Pure formatting, no I/O.
    pub fn info_text(&self) -> String {
        format!(
            "Method: {}\nIntensity: {}\nPreserve Luminance: {}\nDate: {}",
            self.method,
            self.intensity,
            self.preserve_luminance,
            self.captured_at.format("%H:%M:%S"),
        )
    }
}

/// Parameters of one `/api/generate_lut` call.
#[derive(Debug, Clone)]
pub struct LutRequest {
    pub reference: SourceImage,
    pub method: TransferMethod,
    pub preserve_luminance: bool,
    pub intensity: f32,
}

impl LutRequest {
    /// The text form fields of the request, in wire order.
    ///
    /// Building the fields is deterministic: identical parameters always
    /// produce identical payloads.
    pub fn text_fields(&self) -> [(&'static str, String); 3] {
        [
            ("method", self.method.as_str().to_string()),
            ("preserve_luminance", self.preserve_luminance.to_string()),
            ("intensity", self.intensity.to_string()),
        ]
    }
}
