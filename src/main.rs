use anyhow::Context;
use stemhub_docs::config::DocsConfig;
use stemhub_docs::indexing::phases;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stemhub_docs::init_tracing();

    tracing::info!("Starting Stemhub docs dev server...");

    let config = DocsConfig::load().context("Failed to load configuration")?;
    tracing::info!(
        "Serving docs from {} (static files from {})",
        config.docs_root.display(),
        config.out_dir.display()
    );

    // The index is built once here; edits need a restart.
    let app = phases::dev_middleware(&config)
        .fallback_service(ServeDir::new(&config.out_dir))
        .layer(TraceLayer::new_for_http());

    let addr = config.site_addr;
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
