//! HTML → PDF conversion through an external renderer executable.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::compose::RenderError;

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Runs `<executable> --quiet in.html out.pdf` in a scratch directory.
/// Works with `wkhtmltopdf` and compatible CLIs.
#[derive(Clone)]
pub struct CliPdfRenderer {
    pub executable: String,
    pub timeout: Duration,
}

impl CliPdfRenderer {
    pub fn new(executable: String, timeout: Duration) -> Self {
        Self {
            executable,
            timeout,
        }
    }
}

#[async_trait]
impl PdfRenderer for CliPdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let temp_dir = tempfile::Builder::new()
            .prefix("careerboost-pdf-")
            .tempdir()
            .map_err(|e| RenderError::Pdf(format!("failed to create temp dir: {e}")))?;

        let input_path: PathBuf = temp_dir.path().join("resume.html");
        let output_path: PathBuf = temp_dir.path().join("resume.pdf");
        tokio::fs::write(&input_path, html)
            .await
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let mut command = Command::new(&self.executable);
        command
            .arg("--quiet")
            .arg(&input_path)
            .arg(&output_path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|e| {
                RenderError::Pdf(format!("could not run '{}': {e}", self.executable))
            })?,
            Err(_) => {
                return Err(RenderError::Pdf(format!(
                    "renderer timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Pdf(format!(
                "renderer exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let pdf = tokio::fs::read(&output_path)
            .await
            .map_err(|e| RenderError::Pdf(format!("renderer produced no output: {e}")))?;
        debug!(bytes = pdf.len(), "Rendered PDF");
        Ok(pdf)
    }
}

/// Used when no renderer executable is configured.
pub struct NoPdfRenderer;

#[async_trait]
impl PdfRenderer for NoPdfRenderer {
    async fn render(&self, _html: &str) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::UnsupportedFormat(
            "pdf rendering is not configured (set PDF_RENDERER_BIN)".to_string(),
        ))
    }
}
