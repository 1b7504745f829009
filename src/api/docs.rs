use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::app::AppState;

/// Axum handler for `GET /api/docs`.
///
/// Returns the full index as `{files, categories}`, or `500` with
/// `{error}` when the startup build failed. Both carry a permissive CORS
/// header so a separately served frontend can fetch the index.
pub async fn docs_index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.index().map(|index| Json(index.clone()));

    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::document::{DocIndex, Document, Frontmatter};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn sample_index() -> DocIndex {
        DocIndex::from_documents(vec![Document {
            path: "README.md".to_string(),
            title: "Project Overview".to_string(),
            slug: "readme".to_string(),
            category: "root".to_string(),
            content: "<p>Hi</p>".to_string(),
            frontmatter: Frontmatter::new(),
            last_modified: chrono::Utc::now(),
        }])
    }

    async fn get_docs(state: AppState) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = crate::app::api_router(state)
            .oneshot(Request::get("/api/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let cors = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, cors, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_returns_index_with_cors() {
        let (status, cors, body) = get_docs(AppState::new(sample_index())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("*"));
        assert_eq!(body["categories"], serde_json::json!(["root"]));
        assert_eq!(body["files"][0]["slug"], "readme");
        assert!(body["files"][0]["lastModified"].is_string());
    }

    #[tokio::test]
    async fn test_failed_build_returns_500() {
        let state = AppState::from_build(Err(AppError::Io("docs root missing".into())));
        let (status, cors, body) = get_docs(state).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(cors.as_deref(), Some("*"));
        assert!(body["error"].as_str().unwrap().contains("docs root missing"));
    }
}
