//! In-process stand-in for the question-answering backend.
//!
//! Replies are scripted per endpoint and every request is recorded, so tests
//! can assert both what the client did with a response and whether a request
//! was made at all.

#![allow(dead_code)]

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pdf_query_client::{ApiService, Config, RequestFlowController, SelectedFile, PDF_MEDIA_TYPE};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub struct UploadedPart {
    pub field: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

type Reply = (StatusCode, String);

#[derive(Default)]
pub struct MockBackend {
    upload_hits: AtomicUsize,
    ask_hits: AtomicUsize,
    upload_replies: Mutex<VecDeque<Reply>>,
    ask_replies: Mutex<VecDeque<Reply>>,
    uploads: Mutex<Vec<UploadedPart>>,
    questions: Mutex<Vec<Value>>,
    hold: AtomicBool,
    arrived: Notify,
    release: Notify,
}

impl MockBackend {
    /// Starts the backend on an ephemeral port and returns it with its base URL.
    pub async fn start() -> (Arc<Self>, String) {
        let backend = Arc::new(Self::default());

        let app = Router::new()
            .route("/upload_pdf", post(upload_pdf))
            .route("/ask", post(ask))
            .route("/health", get(health))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (backend, format!("http://{}", addr))
    }

    pub fn reply_upload(&self, status: StatusCode, body: impl Into<String>) {
        self.upload_replies.lock().unwrap().push_back((status, body.into()));
    }

    pub fn reply_ask(&self, status: StatusCode, body: Value) {
        self.ask_replies.lock().unwrap().push_back((status, body.to_string()));
    }

    pub fn reply_ask_raw(&self, status: StatusCode, body: impl Into<String>) {
        self.ask_replies.lock().unwrap().push_back((status, body.into()));
    }

    pub fn upload_hits(&self) -> usize {
        self.upload_hits.load(Ordering::SeqCst)
    }

    pub fn ask_hits(&self) -> usize {
        self.ask_hits.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<UploadedPart> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<Value> {
        self.questions.lock().unwrap().clone()
    }

    /// Holds every following request until `release` is called.
    pub fn hold_requests(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    /// Resolves once a held request has reached the backend.
    pub async fn request_arrived(&self) {
        self.arrived.notified().await;
    }

    pub fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.release.notify_one();
    }

    async fn gate(&self) {
        if self.hold.load(Ordering::SeqCst) {
            self.arrived.notify_one();
            self.release.notified().await;
        }
    }
}

async fn upload_pdf(State(backend): State<Arc<MockBackend>>, mut multipart: Multipart) -> Reply {
    backend.upload_hits.fetch_add(1, Ordering::SeqCst);

    while let Ok(Some(field)) = multipart.next_field().await {
        let part = UploadedPart {
            field: field.name().map(str::to_string),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            bytes: Vec::new(),
        };
        let bytes = field.bytes().await.unwrap_or_default();
        backend.uploads.lock().unwrap().push(UploadedPart {
            bytes: bytes.to_vec(),
            ..part
        });
    }

    backend.gate().await;

    let scripted = backend.upload_replies.lock().unwrap().pop_front();
    scripted.unwrap_or((StatusCode::OK, json!({"message": "PDF processed successfully"}).to_string()))
}

async fn ask(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Reply {
    backend.ask_hits.fetch_add(1, Ordering::SeqCst);
    backend.questions.lock().unwrap().push(body);

    backend.gate().await;

    let scripted = backend.ask_replies.lock().unwrap().pop_front();
    scripted.unwrap_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "no reply scripted"}).to_string(),
    ))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

pub fn controller_for(base_url: &str) -> Arc<RequestFlowController> {
    let api = ApiService::new(Config::new(base_url));
    Arc::new(RequestFlowController::new(Arc::new(api)))
}

pub fn report_pdf() -> SelectedFile {
    SelectedFile::new("report.pdf", PDF_MEDIA_TYPE, b"%PDF-1.4\n%test report\n".to_vec())
}

/// Selects and uploads `report.pdf` against a backend that accepts it.
pub async fn uploaded_controller() -> (Arc<MockBackend>, Arc<RequestFlowController>) {
    let (backend, url) = MockBackend::start().await;
    let controller = controller_for(&url);
    controller.select_file(report_pdf()).await.unwrap();
    controller.submit_upload().await.unwrap();
    (backend, controller)
}
