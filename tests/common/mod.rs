#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::Router;
use tempfile::TempDir;
use tower_http::services::ServeDir;

use stemhub_docs::config::DocsConfig;
use stemhub_docs::indexing::phases;

/// A throwaway docs tree with an output directory, plus the routers built
/// over it.
///
/// The temporary directory is removed when this struct is dropped.
pub struct TestEnv {
    dir: TempDir,
    pub config: DocsConfig,
}

impl TestEnv {
    /// Create a docs tree seeded with the standard fixture documents.
    pub fn start() -> Self {
        let env = Self::empty();

        env.write(
            "README.md",
            "---\ntitle: Project Overview\n---\n# Stemhub\n\nManage every project, stem and session.\n",
        );
        env.write(
            "guides/stem-export.md",
            "---\ntitle: Exporting Stems\ntags: [audio, export]\n---\nRender each stem of a project to WAV.\n\n```sh\nstemhub export --all\n```\n",
        );
        env.write(
            "guides/live_sessions.md",
            "# Live sessions\n\nInvite collaborators to a real-time session.\n",
        );
        env.write(
            "api/projects.md",
            "# Projects API\n\nCRUD endpoints for projects.\n\n```ts\nconst res = await fetch('/api/projects')\n```\n",
        );
        env.write("node_modules/some-lib/README.md", "# Vendored\n");

        env
    }

    /// Create an environment with an empty docs root.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let docs_root = dir.path().join("docs");
        std::fs::create_dir_all(&docs_root).expect("Failed to create docs root");

        let mut config = DocsConfig::for_root(docs_root);
        config.out_dir = dir.path().join("dist");

        Self { dir, config }
    }

    pub fn docs_root(&self) -> &Path {
        &self.config.docs_root
    }

    pub fn out_dir(&self) -> &Path {
        &self.config.out_dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Helper: write a document below the docs root.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.docs_root().join(relative);
        std::fs::create_dir_all(path.parent().expect("document has a parent"))
            .expect("Failed to create document directory");
        std::fs::write(path, content).expect("Failed to write document");
    }

    /// The dev-server router: `/api/docs` plus static files from the output dir.
    pub fn router(&self) -> Router {
        phases::dev_middleware(&self.config).fallback_service(ServeDir::new(self.out_dir()))
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router())
    }

    /// Serve the router on an ephemeral local port, returning its base URL.
    pub async fn serve_http(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let router = self.router();

        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .expect("Test server failed");
        });

        format!("http://{addr}")
    }
}
