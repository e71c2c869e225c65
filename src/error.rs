use thiserror::Error;

/// Failure of the `/api/process` contract.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("processing service returned status {0}")]
    Status(u16),

    #[error("processing request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure of the `/api/generate_lut` contract.
#[derive(Debug, Error)]
pub enum LutGenerationError {
    #[error("LUT service returned status {0}")]
    Status(u16),

    #[error("LUT request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure to materialize the bytes behind an image artifact reference.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The referenced resource no longer resolves (freed or revoked upstream).
    #[error("dangling artifact reference: {0}")]
    Dangling(String),

    #[error("artifact fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Failure of a bulk export run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in flight")]
    AlreadyRunning,

    #[error("no snapshot image could be materialized")]
    NothingToArchive,

    #[error("archive assembly failed: {0}")]
    ArchiveAssembly(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
