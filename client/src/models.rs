use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// A file the user picked, with the media type it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk. The media type is declared from the extension,
    /// the same way a browser file picker reports it.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self {
            media_type: media_type_for(path).to_string(),
            name,
            bytes,
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

fn media_type_for(path: &Path) -> &'static str {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub query: String,
    pub answer: String,
}

impl QaEntry {
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Submitting,
    Answered,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    pub selected_file: Option<SelectedFile>,
    pub phase: UploadPhase,
    pub status_message: String,
    pub error_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub query_text: String,
    pub phase: QueryPhase,
    pub error_message: String,
    /// The pair shown as "the answer", held apart from the history.
    pub current: Option<QaEntry>,
}

/// Everything the session holds. Cloned out of the controller for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub upload: UploadState,
    pub query: QueryState,
    pub history: Vec<QaEntry>,
}

impl SessionSnapshot {
    /// Only one error is shown at a time; recording one drops the other.
    pub fn set_upload_error(&mut self, message: &str) {
        self.query.error_message.clear();
        self.upload.error_message = message.to_string();
    }

    pub fn set_query_error(&mut self, message: &str) {
        self.upload.error_message.clear();
        self.query.error_message = message.to_string();
    }

    pub fn clear_errors(&mut self) {
        self.upload.error_message.clear();
        self.query.error_message.clear();
    }

    /// The error currently on screen, if any.
    pub fn error_message(&self) -> Option<&str> {
        [&self.upload.error_message, &self.query.error_message]
            .into_iter()
            .find(|e| !e.is_empty())
            .map(String::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: Option<String>,
    #[serde(default)]
    pub previous_responses: Option<Vec<QaEntry>>,
}

/// Answer plus the backend's full history, as handed to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskReply {
    pub answer: String,
    pub previous_responses: Vec<QaEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
