pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::compose::handlers as documents;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/analyze/text", post(analysis::handle_analyze_text))
        // Document downloads
        .route(
            "/api/v1/documents/resume",
            post(documents::handle_resume_download),
        )
        .route(
            "/api/v1/documents/portfolio",
            post(documents::handle_portfolio_download),
        )
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::catalog::SkillCatalog;
    use crate::compose::NoPdfRenderer;
    use crate::config::Config;
    use crate::ingest::extract::FormatExtractor;
    use crate::ingest::remote::{FetchError, LinkedInPage, WebFetcher};

    const BOUNDARY: &str = "careerboost-test-boundary";
    const RESUME_TXT: &str = "Jane Doe\njane@example.com\nBuilt APIs in Python and Docker.\n";
    const JOB_TEXT: &str = "Looking for Python, SQL and Docker experience.";

    struct OfflineFetcher;

    #[async_trait]
    impl WebFetcher for OfflineFetcher {
        async fn fetch_linkedin(&self, url: &str) -> Result<LinkedInPage, FetchError> {
            Err(FetchError::InvalidUrl(url.to_string()))
        }

        async fn fetch_job_posting(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::InvalidUrl(url.to_string()))
        }
    }

    fn app() -> Router {
        build_router(AppState {
            config: Config::default(),
            catalog: Arc::new(SkillCatalog::builtin()),
            fetcher: Arc::new(OfflineFetcher),
            extractor: Arc::new(FormatExtractor),
            pdf_renderer: Arc::new(NoPdfRenderer),
        })
    }

    /// (field name, optional file name, value)
    fn multipart_body(fields: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, value) in fields {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(uri: &str, fields: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields)))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_text_endpoint() {
        let request = Request::post("/api/v1/analyze/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "resume_text": RESUME_TXT, "job_description": JOB_TEXT }).to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["ats"]["score"], 67);
        assert_eq!(body["ats"]["missing_skills"], json!(["sql"]));
        assert_eq!(body["roadmap"][0]["skill"], "sql");
        assert_eq!(body["documents"]["resume"]["status"], "ready");
        assert_eq!(body["documents"]["portfolio"]["status"], "ready");
        assert_eq!(body["profile"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_analyze_multipart_upload() {
        let request = multipart_request(
            "/api/v1/analyze",
            &[
                ("resume", Some("cv.txt"), RESUME_TXT),
                ("job_description", None, JOB_TEXT),
            ],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["ats"]["score"], 67);
        assert_eq!(body["warnings"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_without_job_has_null_ats() {
        let request = multipart_request("/api/v1/analyze", &[("resume", Some("cv.txt"), RESUME_TXT)]);

        let body = json_body(app().oneshot(request).await.unwrap()).await;
        assert!(body["ats"].is_null());
        assert_eq!(body["roadmap"], json!([]));
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_415() {
        let request =
            multipart_request("/api/v1/analyze", &[("resume", Some("cv.rtf"), "{\\rtf1 hi}")]);

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json_body(response).await["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_missing_resume_and_linkedin_is_400() {
        let request = multipart_request("/api/v1/analyze", &[("job_description", None, JOB_TEXT)]);

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_linkedin_fetch_is_a_warning() {
        let request = multipart_request(
            "/api/v1/analyze",
            &[
                ("resume", Some("cv.txt"), RESUME_TXT),
                ("linkedin_url", None, "https://www.linkedin.com/in/jane"),
            ],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["warnings"][0]["kind"], "external_fetch_failure");
    }

    #[tokio::test]
    async fn test_portfolio_zip_download() {
        let request = multipart_request(
            "/api/v1/documents/portfolio?format=zip",
            &[("resume", Some("cv.txt"), RESUME_TXT)],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut index = String::new();
        archive
            .by_name("index.html")
            .unwrap()
            .read_to_string(&mut index)
            .unwrap();
        assert!(index.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_resume_html_download() {
        let request = multipart_request(
            "/api/v1/documents/resume",
            &[("resume", Some("cv.txt"), RESUME_TXT)],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"optimized_resume.html\""
        );
    }

    #[tokio::test]
    async fn test_pdf_without_renderer_is_415() {
        let request = multipart_request(
            "/api/v1/documents/resume?format=pdf",
            &[("resume", Some("cv.txt"), RESUME_TXT)],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "UNSUPPORTED_OUTPUT_FORMAT"
        );
    }

    #[tokio::test]
    async fn test_unknown_output_format_is_rejected() {
        let request = multipart_request(
            "/api/v1/documents/portfolio?format=docx",
            &[("resume", Some("cv.txt"), RESUME_TXT)],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
