// Document composition: optimized résumé and portfolio site.
// Rendering is pure template substitution; PDF output goes through `PdfRenderer`.

pub mod handlers;
pub mod pdf;
pub mod portfolio;
pub mod resume;
pub mod templates;

use std::str::FromStr;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use thiserror::Error;

pub use pdf::{CliPdfRenderer, NoPdfRenderer, PdfRenderer};
pub use portfolio::PortfolioPage;
pub use resume::ResumeDocument;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("Could not build archive: {0}")]
    Archive(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Html,
    Pdf,
}

impl FromStr for ResumeFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            other => Err(RenderError::UnsupportedFormat(format!(
                "'{other}' (résumé supports html, pdf)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioFormat {
    Html,
    Zip,
}

impl FromStr for PortfolioFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "zip" => Ok(Self::Zip),
            other => Err(RenderError::UnsupportedFormat(format!(
                "'{other}' (portfolio supports html, zip)"
            ))),
        }
    }
}

/// A finished file, served as an attachment.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl RenderedDocument {
    pub fn html(file_name: &str, html: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: "text/html; charset=utf-8",
            body: Bytes::from(html),
        }
    }
}

impl IntoResponse for RenderedDocument {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}
