pub mod api_service;
pub mod config;
pub mod conversation;
pub mod error;
pub mod flow_controller;
pub mod models;

pub use api_service::ApiService;
pub use config::Config;
pub use conversation::{project, ConversationView};
pub use error::{ApiError, FlowError, SubFlow};
pub use flow_controller::RequestFlowController;
pub use models::*;
