use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stemhub_docs::client::source::open_index_source;
use stemhub_docs::config::DocsConfig;
use stemhub_docs::indexing::phases;
use stemhub_docs::DocumentationService;

#[derive(Parser)]
#[command(author, version, about = "Build and query the Stemhub documentation index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to `docs.toml` when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the docs tree and write `docs-index.json`.
    Build {
        /// Directory containing the markdown sources.
        #[arg(long)]
        root: Option<PathBuf>,
        /// Output directory for the static index.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the virtual module exporting the index.
    Module {
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Search the documentation index.
    Search {
        /// Path to `docs-index.json`, or an http(s) URL serving it. Defaults
        /// to the configured `base_url` and `mode`.
        #[arg(long)]
        index: Option<String>,
        /// Query terms; every term must match.
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Print one document by slug.
    Show {
        #[arg(long)]
        index: Option<String>,
        slug: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stemhub_docs::init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DocsConfig::load_from(path),
        None => DocsConfig::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Commands::Build { root, out } => {
            if let Some(root) = root {
                config.docs_root = root;
            }
            if let Some(out) = out {
                config.out_dir = out;
            }
            let path = phases::generate_assets(&config)?;
            println!("Wrote {}", path.display());
        }
        Commands::Module { root } => {
            if let Some(root) = root {
                config.docs_root = root;
            }
            let index = stemhub_docs::indexing::builder::build_index(&config)?;
            print!("{}", phases::virtual_module_source(&index)?);
        }
        Commands::Search { index, query } => {
            let source = open_index_source(index.as_deref(), &config)?;
            let service = DocumentationService::new(source);
            let results = service.search_documents(&query.join(" ")).await;
            if results.is_empty() {
                println!("No documents match.");
            }
            for result in results {
                println!("{} ({})", result.file.title, result.file.slug);
                for m in &result.matches {
                    println!("    [{}] {}", m.highlight, m.text.replace('\n', " "));
                }
            }
        }
        Commands::Show { index, slug } => {
            let source = open_index_source(index.as_deref(), &config)?;
            let service = DocumentationService::new(source);
            match service.get_document_by_slug(&slug).await {
                Some(doc) => println!("{}", serde_json::to_string_pretty(&doc)?),
                None => anyhow::bail!("No document with slug '{slug}'"),
            }
        }
    }

    Ok(())
}
