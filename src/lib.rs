pub mod app;
pub mod config;
pub mod error;
pub mod models {
    pub mod document;
    pub mod search;
}
pub mod rendering {
    pub mod frontmatter;
    pub mod highlight;
    pub mod markdown;
    pub mod slug;
}
pub mod indexing {
    pub mod builder;
    pub mod phases;
    pub mod processor;
    pub mod scanner;
}
pub mod client {
    pub mod fallback;
    pub mod search;
    pub mod service;
    pub mod source;
}
pub mod api {
    pub mod docs;
    pub mod errors;
}

pub use client::service::DocumentationService;
pub use config::{BuildMode, DocsConfig};
pub use error::AppError;
pub use models::document::{DocIndex, Document};
pub use models::search::{SearchMatch, SearchResult};

/// Install the global tracing subscriber used by the binaries.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stemhub_docs=info,tower_http=info".into()),
        )
        .init();
}
