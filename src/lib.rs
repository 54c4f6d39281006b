pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::{cors::quiz_cors, rate_limit};
use crate::services::{
    ai_service::{AIService, TextGenerator},
    chunker::RuleChunker,
    quiz_service::QuizService,
    source_service::SourceService,
    synthesis_service::SynthesisService,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub quiz_service: Arc<QuizService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        let generator = Arc::new(AIService::new(&config, http_client.clone()));
        Ok(Self::assemble(config, generator, http_client))
    }

    /// Same wiring as [`AppState::new`] with a caller-supplied generation backend.
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        Self::assemble(config, generator, Client::new())
    }

    fn assemble(config: Config, generator: Arc<dyn TextGenerator>, http_client: Client) -> Self {
        let sources = SourceService::new(
            http_client,
            Duration::from_secs(config.fetch_timeout_secs),
        );
        let synthesizer = SynthesisService::new(Arc::new(RuleChunker::new()));
        let quiz_service = QuizService::new(
            generator,
            synthesizer,
            sources,
            config.passage_word_count,
        );

        Self {
            config: Arc::new(config),
            quiz_service: Arc::new(quiz_service),
        }
    }

    /// Caps a validated request count at the configured maximum.
    pub fn clamp_questions(&self, requested: usize) -> usize {
        requested.min(self.config.max_questions.max(1))
    }
}

pub fn app(state: AppState) -> Router {
    let limiter = rate_limit::GenerationLimiter::new(state.config.generate_rps);
    let max_upload_bytes = state.config.max_upload_bytes;

    let generation_api = Router::new()
        .route("/generate/topic", post(routes::generate::generate_from_topic))
        .route("/generate/passage", post(routes::generate::generate_from_passage))
        .route("/generate/webpage", post(routes::generate::generate_from_webpage))
        .route("/generate/pdf", post(routes::generate::generate_from_pdf))
        .route("/explain", post(routes::explain::explain_answer))
        .route_layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit::limit_generation,
        ));

    let base_routes = Router::new()
        .route("/healthz", get(routes::health::healthz))
        .route("/api-docs/openapi.json", get(routes::openapi::openapi_json));

    base_routes
        .merge(generation_api)
        .with_state(state)
        .layer(quiz_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
