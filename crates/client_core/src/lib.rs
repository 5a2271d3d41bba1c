use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};
use shared::{
    domain::SelectedImage,
    error::ErrorBody,
    protocol::{ClassificationOutcome, ClassifyResponse, IMAGE_FIELD},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod config;
pub mod error;
mod staging;

pub use config::{default_settings, load_settings, ClientSettings, SettingsOverrides};
pub use error::ClassifyError;
pub use staging::{display_file_name, guess_media_type, stage_image_file};

/// Seam between the UI worker and the network so the worker can be driven
/// by a fake classifier in tests.
#[async_trait]
pub trait ClassifyHandle: Send + Sync {
    fn endpoint(&self) -> &Url;

    async fn classify(&self, image: &SelectedImage)
        -> Result<ClassificationOutcome, ClassifyError>;
}

#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: Client,
    endpoint: Url,
}

impl ClassifierClient {
    pub fn new(endpoint: Url, request_timeout: Duration) -> Result<Self, ClassifyError> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClassifyError> {
        Self::new(settings.endpoint_url.clone(), settings.request_timeout)
    }

    fn image_form(image: &SelectedImage) -> Result<multipart::Form, ClassifyError> {
        let part = multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.media_type())
            .map_err(|err| {
                ClassifyError::InvalidRequest(format!(
                    "unusable media type '{}': {err}",
                    image.media_type()
                ))
            })?;
        Ok(multipart::Form::new().part(IMAGE_FIELD, part))
    }
}

#[async_trait]
impl ClassifyHandle for ClassifierClient {
    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn classify(
        &self,
        image: &SelectedImage,
    ) -> Result<ClassificationOutcome, ClassifyError> {
        let form = Self::image_form(image)?;
        debug!(
            endpoint = %self.endpoint,
            file_name = image.file_name(),
            media_type = image.media_type(),
            size_bytes = image.size_bytes(),
            "posting image for classification"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = ErrorBody::parse(&body).map(|body| body.error);
            warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "classification endpoint rejected the request"
            );
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.bytes().await?;
        let parsed: ClassifyResponse = serde_json::from_slice(&body)
            .map_err(|err| ClassifyError::MalformedBody(err.to_string()))?;
        let outcome = ClassificationOutcome::from(parsed);
        info!(
            endpoint = %self.endpoint,
            label = %outcome.label,
            has_confidence = outcome.confidence.is_some(),
            "classification completed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
