use crate::config::Config;
use crate::error::ApiError;
use crate::models::*;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

pub const UPLOAD_PATH: &str = "/upload_pdf";
pub const ASK_PATH: &str = "/ask";
pub const HEALTH_PATH: &str = "/health";

/// HTTP client for the question-answering backend.
///
/// The backend is treated as an opaque contract: only the response shapes of
/// `/upload_pdf`, `/ask` and `/health` are relied upon.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: Client,
    config: Config,
}

impl ApiService {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn upload_pdf(&self, file: &SelectedFile) -> Result<UploadReply, ApiError> {
        let url = self.config.endpoint(UPLOAD_PATH);
        log::debug!("POST {} ({} bytes)", url, file.bytes.len());

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(PDF_MEDIA_TYPE)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let body = Self::success_body(response).await?;

        // Any JSON body counts as success; `message`/`details` are informational.
        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub async fn ask(&self, query: &str) -> Result<AskReply, ApiError> {
        let url = self.config.endpoint(ASK_PATH);
        log::debug!("POST {}", url);

        let request = AskRequest {
            query: query.to_string(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let body = Self::success_body(response).await?;

        let ask_response: AskResponse = serde_json::from_str(&body)?;
        let answer = ask_response
            .answer
            .ok_or(ApiError::MissingField("answer"))?;

        Ok(AskReply {
            answer,
            previous_responses: ask_response.previous_responses.unwrap_or_default(),
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.config.endpoint(HEALTH_PATH);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let body = Self::success_body(response).await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Returns the body of a 2xx response, or the backend's `error` field otherwise.
    async fn success_body(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error);
            return Err(ApiError::Status { status, message });
        }

        Ok(body)
    }
}
