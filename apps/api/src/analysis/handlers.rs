use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::{analyze, AnalysisInput, AnalysisReport, Warning, WarningKind};
use crate::compose::{PortfolioPage, RenderError, ResumeDocument};
use crate::errors::AppError;
use crate::ingest::form::AnalyzeForm;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
}

/// Inline preview of a generated document, or why it could not be produced.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Ready {
        file_name: &'static str,
        content_type: &'static str,
        html: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct GeneratedDocuments {
    pub resume: DocumentOutcome,
    pub portfolio: DocumentOutcome,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub documents: GeneratedDocuments,
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let report = analyze_multipart(&state, multipart).await?;
    Ok(Json(with_documents(&state, report)))
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let input = AnalysisInput {
        resume_text: Some(req.resume_text),
        job_text: req.job_description,
        ..AnalysisInput::default()
    };
    let report = analyze(&input, &state.catalog, Utc::now().date_naive())?;
    Ok(Json(with_documents(&state, report)))
}

/// Reads the analysis form, performs the fetches and runs the pipeline.
/// Shared with the document download endpoints.
pub async fn analyze_multipart(
    state: &AppState,
    multipart: Multipart,
) -> Result<AnalysisReport, AppError> {
    let form = AnalyzeForm::from_multipart(multipart).await?;
    let input = form
        .into_input(state.extractor.as_ref(), state.fetcher.as_ref())
        .await?;
    Ok(analyze(&input, &state.catalog, Utc::now().date_naive())?)
}

/// Renders both documents inline. A render failure is reported next to the
/// analysis instead of failing the request.
fn with_documents(state: &AppState, mut report: AnalysisReport) -> AnalyzeResponse {
    let vocabulary = &state.catalog.vocabulary;
    let resume = ResumeDocument::from_report(&report, vocabulary).render_html();
    let portfolio =
        PortfolioPage::from_report(&report, vocabulary, Utc::now().date_naive()).render_html();

    let documents = GeneratedDocuments {
        resume: outcome(resume, "optimized_resume.html", &mut report.warnings),
        portfolio: outcome(portfolio, "portfolio.html", &mut report.warnings),
    };
    AnalyzeResponse { report, documents }
}

fn outcome(
    rendered: Result<String, RenderError>,
    file_name: &'static str,
    warnings: &mut Vec<Warning>,
) -> DocumentOutcome {
    match rendered {
        Ok(html) => DocumentOutcome::Ready {
            file_name,
            content_type: "text/html; charset=utf-8",
            html,
        },
        Err(e) => {
            tracing::error!("Rendering {file_name} failed: {e}");
            warnings.push(Warning::new(
                WarningKind::RenderFailure,
                format!("{file_name} could not be generated: {e}"),
            ));
            DocumentOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
