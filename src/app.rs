use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::models::document::DocIndex;

/// Shared state for the documentation HTTP routes.
///
/// Holds the outcome of the single index build performed at startup; a
/// failed build is kept as its error message and reported per request.
#[derive(Clone)]
pub struct AppState {
    index: Arc<Result<DocIndex, String>>,
}

impl AppState {
    pub fn new(index: DocIndex) -> Self {
        Self {
            index: Arc::new(Ok(index)),
        }
    }

    pub fn from_build(result: Result<DocIndex, AppError>) -> Self {
        if let Err(e) = &result {
            tracing::error!("Documentation index failed to build: {e}");
        }
        Self {
            index: Arc::new(result.map_err(|e| e.to_string())),
        }
    }

    pub fn index(&self) -> Result<&DocIndex, AppError> {
        match &*self.index {
            Ok(index) => Ok(index),
            Err(msg) => Err(AppError::Internal(msg.clone())),
        }
    }
}

/// Routes serving the documentation index.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/docs", get(crate::api::docs::docs_index_handler))
        .with_state(state)
}
