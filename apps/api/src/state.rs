use std::sync::Arc;

use crate::carousel::{CarouselHandle, RevealGuard};
use crate::chat::ChatClient;
use crate::config::Config;
use crate::resume::{ResumeBuilder, ResumeDocument};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    #[allow(dead_code)]
    pub config: Config,
    pub carousel: Arc<CarouselHandle>,
    pub reveal: Arc<RevealGuard>,
    pub resume: Arc<ResumeDocument>,
    pub resume_builder: Arc<ResumeBuilder>,
    /// `None` when CHAT_ENDPOINT is unset.
    pub chat: Option<ChatClient>,
}
