use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{ArtifactError, ExportError};
use crate::models::Snapshot;
use crate::services::ArtifactClient;

/// The assembled archive, ready for a client-side save.
#[derive(Debug)]
pub struct ExportArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One snapshot's share of an export run: the artifacts that go into the
/// archive under a common name prefix. The LUT is best-effort.
struct ManifestEntry {
    prefix: String,
    image: Vec<u8>,
    info: String,
    lut: Option<Vec<u8>>,
}

/// Bulk export of the snapshot collection into a single zip archive.
///
/// Fan-out/fan-in: all per-snapshot work (image materialization, metadata
/// formatting, LUT regeneration) runs concurrently; assembly starts only
/// after every snapshot has settled. A failed LUT call drops that
/// snapshot's `.cube` entry but never the export. A snapshot whose image
/// cannot be materialized is dropped entirely; the run fails only when
/// that happens to every snapshot.
pub struct ExportPipeline {
    client: Arc<ArtifactClient>,
    folder: String,
    in_flight: AtomicBool,
}

impl ExportPipeline {
    pub fn new(client: Arc<ArtifactClient>) -> Self {
        Self::with_folder(client, "cinematic_snapshots")
    }

    pub fn with_folder(client: Arc<ArtifactClient>, folder: impl Into<String>) -> Self {
        Self {
            client,
            folder: folder.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the export. An empty snapshot sequence is a no-op, not an error.
    ///
    /// Only one export may be in flight at a time; a concurrent second call
    /// fails with `ExportError::AlreadyRunning`.
    pub async fn export(&self, snapshots: &[Snapshot]) -> Result<Option<ExportArchive>, ExportError> {
        if snapshots.is_empty() {
            return Ok(None);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::AlreadyRunning);
        }

        let result = self.run(snapshots).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result.map(Some)
    }

    /// Run the export and save the archive into `dir`.
    /// Returns the written path, or `None` for an empty sequence.
    pub async fn export_to_dir(
        &self,
        snapshots: &[Snapshot],
        dir: &Path,
    ) -> Result<Option<PathBuf>, ExportError> {
        let Some(archive) = self.export(snapshots).await? else {
            return Ok(None);
        };
        let path = dir.join(&archive.file_name);
        tokio::fs::write(&path, &archive.bytes).await?;
        tracing::info!(path = %path.display(), bytes = archive.bytes.len(), "Export archive saved");
        Ok(Some(path))
    }

    async fn run(&self, snapshots: &[Snapshot]) -> Result<ExportArchive, ExportError> {
        let tasks = snapshots
            .iter()
            .enumerate()
            .map(|(index, snapshot)| self.collect_entry(index + 1, snapshot));

        // Barrier: assembly must not start before every snapshot settles.
        let settled = join_all(tasks).await;

        let mut entries = Vec::with_capacity(settled.len());
        for outcome in settled {
            match outcome {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(%e, "Skipping snapshot with unresolvable image"),
            }
        }

        if entries.is_empty() {
            return Err(ExportError::NothingToArchive);
        }

        let bytes = self.assemble(&entries)?;
        tracing::info!(
            snapshots = snapshots.len(),
            archived = entries.len(),
            "Export archive assembled"
        );

        Ok(ExportArchive {
            file_name: format!("{}.zip", self.folder),
            bytes,
        })
    }

    /// Gather one snapshot's artifacts. The name prefix is derived from the
    /// snapshot's position in the input sequence, so prefixes stay stable
    /// even when another snapshot is skipped.
    async fn collect_entry(
        &self,
        position: usize,
        snapshot: &Snapshot,
    ) -> Result<ManifestEntry, ArtifactError> {
        let prefix = format!("snap_{}_{}", position, snapshot.method);

        let image = self.client.fetch_artifact(&snapshot.processed).await?;
        let info = snapshot.info_text();

        let lut = match self.client.generate_lut(&snapshot.lut_request()).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(%e, prefix = %prefix, "LUT regeneration failed, omitting .cube entry");
                None
            }
        };

        Ok(ManifestEntry {
            prefix,
            image,
            info,
            lut,
        })
    }

    /// Write all entries, in input order, into one in-memory zip.
    fn assemble(&self, entries: &[ManifestEntry]) -> Result<Vec<u8>, ExportError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer.add_directory(format!("{}/", self.folder), options)?;

        for entry in entries {
            writer.start_file(format!("{}/{}.png", self.folder, entry.prefix), options)?;
            writer.write_all(&entry.image)?;

            writer.start_file(format!("{}/{}_info.txt", self.folder, entry.prefix), options)?;
            writer.write_all(entry.info.as_bytes())?;

            if let Some(lut) = &entry.lut {
                writer.start_file(format!("{}/{}.cube", self.folder, entry.prefix), options)?;
                writer.write_all(lut)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_sequence_is_noop() {
        let client = Arc::new(ArtifactClient::new("http://unreachable.invalid"));
        let pipeline = ExportPipeline::new(client);

        let result = pipeline.export(&[]).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_sequence_saves_nothing() {
        let client = Arc::new(ArtifactClient::new("http://unreachable.invalid"));
        let pipeline = ExportPipeline::new(client);
        let dir = tempfile::tempdir().unwrap();

        let path = pipeline.export_to_dir(&[], dir.path()).await.unwrap();
        assert!(path.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
