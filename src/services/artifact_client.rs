use reqwest::multipart::{Form, Part};

use crate::error::{ArtifactError, LutGenerationError, ProcessingError};
use crate::models::{AppConfig, ImageArtifact, LutRequest, SourceImage, TransferMethod};

/// Typed client for the two contracts of the external processing service.
///
/// Single-shot calls: no retry, no timeout. Retry and timeout policy belong
/// to the caller.
pub struct ArtifactClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArtifactClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/process`: grade `target` toward the look of `reference`.
    /// Returns the processed image bytes (PNG).
    pub async fn process(
        &self,
        target: &SourceImage,
        reference: &SourceImage,
        method: TransferMethod,
        preserve_luminance: bool,
    ) -> Result<Vec<u8>, ProcessingError> {
        let form = Form::new()
            .part("target", image_part(target))
            .part("reference", image_part(reference))
            .text("method", method.as_str())
            .text("preserve_luminance", preserve_luminance.to_string());

        let response = self
            .http
            .post(format!("{}/api/process", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %method, "Processing call failed");
            return Err(ProcessingError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// `POST /api/generate_lut`: regenerate a `.cube` 3D-LUT from recorded
    /// snapshot parameters.
    pub async fn generate_lut(&self, request: &LutRequest) -> Result<Vec<u8>, LutGenerationError> {
        let mut form = Form::new().part("reference", image_part(&request.reference));
        for (name, value) in request.text_fields() {
            form = form.text(name, value);
        }

        let response = self
            .http
            .post(format!("{}/api/generate_lut", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), method = %request.method, "LUT call failed");
            return Err(LutGenerationError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Materialize the bytes behind an image artifact reference.
    ///
    /// Local handles resolve without I/O. A remote reference that answers
    /// non-2xx is reported as dangling.
    pub async fn fetch_artifact(&self, artifact: &ImageArtifact) -> Result<Vec<u8>, ArtifactError> {
        match artifact {
            ImageArtifact::Bytes(bytes) => Ok(bytes.to_vec()),
            ImageArtifact::Remote(url) => {
                let response = self.http.get(url).send().await?;
                if !response.status().is_success() {
                    return Err(ArtifactError::Dangling(url.clone()));
                }
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

fn image_part(image: &SourceImage) -> Part {
    Part::bytes(image.bytes.to_vec()).file_name(image.file_name.clone())
}
