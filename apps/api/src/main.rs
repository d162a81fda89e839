mod analysis;
mod compose;
mod config;
mod errors;
mod ingest;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::catalog::SkillCatalog;
use crate::compose::{CliPdfRenderer, NoPdfRenderer, PdfRenderer};
use crate::config::Config;
use crate::ingest::extract::FormatExtractor;
use crate::ingest::remote::HttpFetcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerBoost API v{}", env!("CARGO_PKG_VERSION"));

    // Static tables: skill vocabulary + learning roadmap
    let catalog = Arc::new(SkillCatalog::builtin());
    info!(
        "Skill catalog loaded: {} skills, {} roadmap entries",
        catalog.vocabulary.entries().len(),
        catalog.roadmap.entries().len()
    );

    // Outbound HTTP for LinkedIn / job posting fetches
    let fetcher = Arc::new(HttpFetcher::new(
        config.http_timeout,
        &config.fetch_user_agent,
        config.max_fetch_bytes,
    )?);

    // PDF output is optional (HTML is always available)
    let pdf_renderer: Arc<dyn PdfRenderer> = match &config.pdf_renderer_bin {
        Some(bin) => {
            info!("PDF renderer: {bin}");
            Arc::new(CliPdfRenderer::new(bin.clone(), config.pdf_render_timeout))
        }
        None => {
            info!("PDF renderer not configured; résumé downloads limited to HTML");
            Arc::new(NoPdfRenderer)
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog,
        fetcher,
        extractor: Arc::new(FormatExtractor),
        pdf_renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
