use axum::extract::{Multipart, Query, State};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;

use crate::analysis::handlers::analyze_multipart;
use crate::compose::{PortfolioFormat, PortfolioPage, RenderedDocument, ResumeDocument, ResumeFormat};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>,
}

/// POST /api/v1/documents/resume?format=html|pdf
pub async fn handle_resume_download(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    multipart: Multipart,
) -> Result<RenderedDocument, AppError> {
    let format: ResumeFormat = query.format.as_deref().unwrap_or("html").parse()?;

    let report = analyze_multipart(&state, multipart).await?;
    let html = ResumeDocument::from_report(&report, &state.catalog.vocabulary).render_html()?;

    Ok(match format {
        ResumeFormat::Html => RenderedDocument::html("optimized_resume.html", html),
        ResumeFormat::Pdf => RenderedDocument {
            file_name: "optimized_resume.pdf".to_string(),
            content_type: "application/pdf",
            body: Bytes::from(state.pdf_renderer.render(&html).await?),
        },
    })
}

/// POST /api/v1/documents/portfolio?format=html|zip
pub async fn handle_portfolio_download(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    multipart: Multipart,
) -> Result<RenderedDocument, AppError> {
    let format: PortfolioFormat = query.format.as_deref().unwrap_or("html").parse()?;

    let report = analyze_multipart(&state, multipart).await?;
    let page = PortfolioPage::from_report(
        &report,
        &state.catalog.vocabulary,
        Utc::now().date_naive(),
    );

    Ok(match format {
        PortfolioFormat::Html => RenderedDocument::html("portfolio.html", page.render_html()?),
        PortfolioFormat::Zip => RenderedDocument {
            file_name: "portfolio_website.zip".to_string(),
            content_type: "application/zip",
            body: Bytes::from(page.render_zip()?),
        },
    })
}
