//! The multipart analysis form and its resolution into an `AnalysisInput`.

use axum::extract::Multipart;
use tracing::{debug, info};

use crate::analysis::pipeline::{AnalysisInput, Warning};
use crate::errors::AppError;
use crate::ingest::document::Upload;
use crate::ingest::extract::{read_upload, TextExtractor};
use crate::ingest::remote::WebFetcher;

/// Raw fields of `POST /api/v1/analyze` (and the document download endpoints).
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub resume: Option<Upload>,
    pub job_description: Option<String>,
    pub job_file: Option<Upload>,
    pub job_url: Option<String>,
    pub linkedin_url: Option<String>,
}

impl AnalyzeForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" | "job_file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(String::from);
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Could not read field '{name}': {e}"))
                    })?;
                    // Browsers send an empty, nameless part for an untouched file input.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    let upload = Upload {
                        file_name,
                        content_type,
                        bytes,
                    };
                    if name == "resume" {
                        form.resume = Some(upload);
                    } else {
                        form.job_file = Some(upload);
                    }
                }
                "job_description" | "job_url" | "linkedin_url" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Could not read field '{name}': {e}"))
                    })?;
                    let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
                    match name.as_str() {
                        "job_description" => form.job_description = value,
                        "job_url" => form.job_url = value,
                        _ => form.linkedin_url = value,
                    }
                }
                other => debug!("Ignoring unknown form field '{other}'"),
            }
        }

        Ok(form)
    }

    /// Extracts uploads and performs the remote fetches.
    ///
    /// Job description precedence: pasted text, then uploaded file, then URL.
    /// Fetch failures become warnings; intake failures are errors.
    pub async fn into_input(
        self,
        extractor: &dyn TextExtractor,
        fetcher: &dyn WebFetcher,
    ) -> Result<AnalysisInput, AppError> {
        if self.resume.is_none() && self.linkedin_url.is_none() {
            return Err(AppError::Validation(
                "Upload a résumé or provide a LinkedIn profile URL".to_string(),
            ));
        }

        let mut warnings = Vec::new();

        let resume_text = self
            .resume
            .as_ref()
            .map(|upload| read_upload(upload, extractor))
            .transpose()?;

        let job_text = match (self.job_description, self.job_file, self.job_url) {
            (Some(text), _, _) => Some(text),
            (None, Some(upload), _) => Some(read_upload(&upload, extractor)?),
            (None, None, Some(url)) => match fetcher.fetch_job_posting(&url).await {
                Ok(text) => Some(text),
                Err(e) => {
                    warnings.push(Warning::fetch_failed("job posting", &e));
                    None
                }
            },
            (None, None, None) => None,
        };

        let linkedin = match self.linkedin_url {
            Some(url) => Some(fetcher.fetch_linkedin(&url).await),
            None => None,
        };

        info!(
            resume = resume_text.is_some(),
            job = job_text.is_some(),
            linkedin = linkedin.is_some(),
            "Resolved analysis input"
        );

        Ok(AnalysisInput {
            resume_text,
            job_text,
            linkedin,
            warnings,
        })
    }
}
