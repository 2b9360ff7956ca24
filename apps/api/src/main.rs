mod carousel;
mod chat;
mod config;
mod errors;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::carousel::{default_testimonials, spawn_carousel, Carousel, RevealGuard};
use crate::chat::ChatClient;
use crate::config::Config;
use crate::resume::render::PdfRenderer;
use crate::resume::sink::DirectorySink;
use crate::resume::{default_page_config, ResumeBuilder, ResumeDocument};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "folio_api={level},tower_http={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Testimonial carousel
    let carousel = spawn_carousel(
        Carousel::new(default_testimonials())?,
        config.carousel_interval,
    )?;

    // Résumé builder
    let resume = ResumeDocument::sample();
    let page_config = default_page_config(config.resume_font);
    info!(
        "Résumé page config: {:?} {}x{}mm",
        page_config.font, page_config.page_width_mm, page_config.page_height_mm
    );
    let renderer = PdfRenderer {
        title: Some(format!("{} - Resume", resume.name)),
    };
    let sink = DirectorySink::new(config.output_dir.clone());
    info!("Saving generated résumés to {}", sink.dir().display());
    let resume_builder = ResumeBuilder::new(
        Arc::new(renderer),
        Arc::new(sink),
        page_config,
        config.status_reset_delay,
    );

    // Chat relay (optional)
    let chat = match &config.chat_endpoint {
        Some(endpoint) => {
            let client = ChatClient::new(endpoint.clone())?;
            info!("Chat client initialized (endpoint: {})", client.endpoint());
            Some(client)
        }
        None => {
            warn!("CHAT_ENDPOINT not set; chat is disabled");
            None
        }
    };

    let carousel = Arc::new(carousel);
    let state = AppState {
        config: config.clone(),
        carousel: carousel.clone(),
        reveal: Arc::new(RevealGuard::new()),
        resume: Arc::new(resume),
        resume_builder: Arc::new(resume_builder),
        chat,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and its state clones) is gone; unmount if this is the last handle.
    if let Some(handle) = Arc::into_inner(carousel) {
        handle.unmount().await;
    }
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
