use std::sync::Arc;

use crate::analysis::catalog::SkillCatalog;
use crate::compose::PdfRenderer;
use crate::config::Config;
use crate::ingest::extract::TextExtractor;
use crate::ingest::remote::WebFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only; per-request data never lands in it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skill vocabulary and roadmap table, built once at startup.
    pub catalog: Arc<SkillCatalog>,
    /// LinkedIn and job posting fetches. Default: HttpFetcher.
    pub fetcher: Arc<dyn WebFetcher>,
    pub extractor: Arc<dyn TextExtractor>,
    /// Default: CliPdfRenderer when PDF_RENDERER_BIN is set, NoPdfRenderer otherwise.
    pub pdf_renderer: Arc<dyn PdfRenderer>,
}
