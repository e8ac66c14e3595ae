use crate::api_service::ApiService;
use crate::conversation::ConversationView;
use crate::error::{FlowError, SubFlow};
use crate::models::*;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const PDF_REQUIRED: &str = "Please select a PDF file";
pub const FILE_REQUIRED: &str = "Please select a file first";
pub const QUERY_REQUIRED: &str = "Please enter a query";
pub const UPLOAD_REQUIRED: &str = "Please upload a PDF first";
pub const UPLOAD_SUCCESS: &str = "PDF processed successfully!";
pub const UPLOAD_FALLBACK: &str = "Failed to upload PDF";
pub const QUERY_FALLBACK: &str = "Failed to get answer";

/// Drives the upload → query → answer flow for one session.
///
/// Each sub-flow allows one request in flight. The `Uploading` and
/// `Submitting` phases are the in-flight flags; they are checked and set under
/// the write lock before a request goes out, and the lock is released while
/// the request runs.
///
/// The history is whatever the backend last returned. It is never appended to
/// locally, so the client relies on the backend's `previous_responses` ending
/// with the pair it just answered.
pub struct RequestFlowController {
    api: Arc<ApiService>,
    state: RwLock<SessionSnapshot>,
}

impl RequestFlowController {
    pub fn new(api: Arc<ApiService>) -> Self {
        Self {
            api,
            state: RwLock::new(SessionSnapshot::default()),
        }
    }

    pub fn api(&self) -> &ApiService {
        &self.api
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    pub async fn conversation(&self) -> ConversationView {
        self.state.read().await.conversation()
    }

    pub async fn select_file(&self, candidate: SelectedFile) -> Result<(), FlowError> {
        let mut state = self.state.write().await;

        if state.upload.phase == UploadPhase::Uploading {
            return Err(FlowError::InFlight(SubFlow::Upload));
        }

        if candidate.is_pdf() {
            log::info!("Selected {} ({} bytes)", candidate.name, candidate.bytes.len());
            state.upload.selected_file = Some(candidate);
            state.clear_errors();
            Ok(())
        } else {
            log::info!("Rejected {} with media type {}", candidate.name, candidate.media_type);
            state.upload.selected_file = None;
            state.set_upload_error(PDF_REQUIRED);
            Err(FlowError::validation(PDF_REQUIRED))
        }
    }

    pub async fn submit_upload(&self) -> Result<UploadReply, FlowError> {
        let file = {
            let mut state = self.state.write().await;

            let file = match &state.upload.selected_file {
                Some(file) => file.clone(),
                None => {
                    state.set_upload_error(FILE_REQUIRED);
                    return Err(FlowError::validation(FILE_REQUIRED));
                }
            };

            if state.upload.phase == UploadPhase::Uploading {
                return Err(FlowError::InFlight(SubFlow::Upload));
            }

            state.clear_errors();
            state.upload.phase = UploadPhase::Uploading;
            state.upload.status_message.clear();
            file
        };

        log::info!("Uploading PDF: {}", file.name);
        let result = self.api.upload_pdf(&file).await;

        let mut state = self.state.write().await;

        match result {
            Ok(reply) => {
                if let Some(details) = &reply.details {
                    log::info!("Backend: {}", details);
                }
                log::info!("Uploaded {}", file.name);
                state.clear_errors();
                let upload = &mut state.upload;
                upload.phase = UploadPhase::Uploaded;
                upload.status_message = UPLOAD_SUCCESS.to_string();
                upload.selected_file = None;
                Ok(reply)
            }
            Err(e) => {
                log::warn!("Upload of {} failed: {}", file.name, e);
                let message = e.user_message(UPLOAD_FALLBACK);
                state.upload.phase = UploadPhase::Failed;
                state.upload.status_message.clear();
                state.set_upload_error(&message);
                Err(FlowError::Upload(message))
            }
        }
    }

    pub async fn set_query_text(&self, text: &str) {
        self.state.write().await.query.query_text = text.to_string();
    }

    pub async fn submit_query(&self, text: &str) -> Result<QaEntry, FlowError> {
        {
            let mut state = self.state.write().await;

            if text.trim().is_empty() {
                state.set_query_error(QUERY_REQUIRED);
                return Err(FlowError::validation(QUERY_REQUIRED));
            }

            if state.upload.phase != UploadPhase::Uploaded {
                state.set_query_error(UPLOAD_REQUIRED);
                return Err(FlowError::validation(UPLOAD_REQUIRED));
            }

            if state.query.phase == QueryPhase::Submitting {
                return Err(FlowError::InFlight(SubFlow::Query));
            }

            state.clear_errors();
            state.query.query_text = text.to_string();
            state.query.phase = QueryPhase::Submitting;
        }

        log::info!("Asking: {}", text);
        let result = self.api.ask(text).await;

        let mut state = self.state.write().await;

        match result {
            Ok(reply) => {
                let current = QaEntry::new(text, reply.answer);
                if reply.previous_responses.last() != Some(&current) {
                    log::warn!("Backend history does not end with the pair just answered");
                }
                log::info!("Answered; backend holds {} entries", reply.previous_responses.len());

                state.clear_errors();
                state.history = reply.previous_responses;
                state.query.current = Some(current.clone());
                state.query.phase = QueryPhase::Answered;
                Ok(current)
            }
            Err(e) => {
                log::warn!("Query failed: {}", e);
                let message = e.user_message(QUERY_FALLBACK);
                state.query.phase = QueryPhase::Failed;
                state.set_query_error(&message);
                Err(FlowError::Query(message))
            }
        }
    }

    /// Drops the answer, the query text and the history. Upload state is kept,
    /// so another question can be asked straight away.
    pub async fn clear_conversation(&self) {
        let mut state = self.state.write().await;
        state.history.clear();

        let query = &mut state.query;
        query.current = None;
        query.query_text.clear();
        if query.phase != QueryPhase::Submitting {
            query.phase = QueryPhase::Idle;
        }
    }
}
