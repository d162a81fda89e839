//! Uploaded documents: format detection and the intake error taxonomy.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Unsupported format: {0}. Use PDF, DOCX, or TXT.")]
    UnsupportedFormat(String),

    #[error("Uploaded file '{0}' is empty")]
    EmptyUpload(String),

    #[error("{format} parse error: {message}")]
    Extraction {
        format: DocumentFormat,
        message: String,
    },
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Detects the format from the file extension, falling back to the declared
    /// content type only when the name has no extension.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Some(Self::Pdf),
            Some("docx") => Some(Self::Docx),
            Some("txt") => Some(Self::Txt),
            Some(_) => None,
            None => content_type.and_then(Self::from_mime),
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "text/plain" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw multipart file field, before validation.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A validated upload: supported format, non-empty body. In-memory only.
#[derive(Debug, Clone)]
pub struct Document {
    file_name: String,
    format: DocumentFormat,
    bytes: Bytes,
}

impl Document {
    pub fn from_upload(upload: &Upload) -> Result<Self, IntakeError> {
        let format = DocumentFormat::detect(&upload.file_name, upload.content_type.as_deref())
            .ok_or_else(|| IntakeError::UnsupportedFormat(upload.file_name.clone()))?;

        if upload.bytes.is_empty() {
            return Err(IntakeError::EmptyUpload(upload.file_name.clone()));
        }

        Ok(Self {
            file_name: upload.file_name.clone(),
            format,
            bytes: upload.bytes.clone(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>, body: &'static [u8]) -> Upload {
        Upload {
            file_name: name.to_string(),
            content_type: content_type.map(String::from),
            bytes: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_detects_by_extension_case_insensitively() {
        assert_eq!(DocumentFormat::detect("cv.PDF", None), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::detect("cv.docx", None), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::detect("notes.Txt", None), Some(DocumentFormat::Txt));
    }

    #[test]
    fn test_unknown_extension_wins_over_content_type() {
        assert_eq!(DocumentFormat::detect("cv.doc", Some("text/plain")), None);
        assert_eq!(DocumentFormat::detect("photo.png", Some("application/pdf")), None);
    }

    #[test]
    fn test_falls_back_to_content_type_without_extension() {
        assert_eq!(
            DocumentFormat::detect("resume", Some("application/pdf")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::detect("resume", Some("text/plain; charset=utf-8")),
            Some(DocumentFormat::Txt)
        );
        assert_eq!(DocumentFormat::detect("resume", Some("image/png")), None);
        assert_eq!(DocumentFormat::detect("resume", None), None);
    }

    #[test]
    fn test_rejects_unsupported_format() {
        let err = Document::from_upload(&upload("cv.odt", None, b"data")).unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedFormat(name) if name == "cv.odt"));
    }

    #[test]
    fn test_rejects_empty_file() {
        let err = Document::from_upload(&upload("cv.txt", None, b"")).unwrap_err();
        assert!(matches!(err, IntakeError::EmptyUpload(_)));
    }

    #[test]
    fn test_accepts_supported_upload() {
        let doc = Document::from_upload(&upload("cv.txt", None, b"hello")).unwrap();
        assert_eq!(doc.format(), DocumentFormat::Txt);
        assert_eq!(doc.bytes(), b"hello");
        assert_eq!(doc.file_name(), "cv.txt");
    }
}
