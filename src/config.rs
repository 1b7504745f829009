use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

/// Which delivery mechanism the documentation client reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Fetch from the dev-server endpoint (`/api/docs`).
    #[default]
    Development,
    /// Fetch the emitted static asset (`/docs-index.json`).
    Production,
}

/// Settings for the documentation pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    /// Directory scanned for markdown documents.
    pub docs_root: PathBuf,
    /// Directory where `docs-index.json` is written and static files are served from.
    pub out_dir: PathBuf,
    /// Dev server bind address.
    pub site_addr: SocketAddr,
    pub mode: BuildMode,
    /// Base URL the documentation client fetches the index from.
    pub base_url: String,
    pub fetch_timeout_secs: u64,
    /// Directory names skipped in addition to the built-in exclusions.
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
}

impl DocsConfig {
    /// Load configuration from `docs.toml` (optional) and `DOCS_*`
    /// environment variables, over built-in defaults.
    ///
    /// Environment variables:
    /// - `DOCS_DOCS_ROOT`, `DOCS_OUT_DIR`, `DOCS_SITE_ADDR`
    /// - `DOCS_MODE` (`development` | `production`)
    /// - `DOCS_BASE_URL`, `DOCS_FETCH_TIMEOUT_SECS`
    /// - `DOCS_EXCLUDE_DIRS` (comma separated)
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(Path::new("docs.toml"))
    }

    /// Like [`DocsConfig::load`], reading the given file instead of `docs.toml`.
    pub fn load_from(file: &Path) -> Result<Self, AppError> {
        Self::load_layered(file, None)
    }

    /// Layer defaults, `file` and the `DOCS_*` variables. `env` replaces the
    /// process environment when given.
    fn load_layered(
        file: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, AppError> {
        let settings = Self::defaults()?
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("DOCS")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("exclude_dirs")
                    .source(env),
            )
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, AppError> {
        config::Config::builder()
            .set_default("docs_root", "docs")
            .and_then(|b| b.set_default("out_dir", "dist"))
            .and_then(|b| b.set_default("site_addr", "127.0.0.1:3000"))
            .and_then(|b| b.set_default("mode", "development"))
            .and_then(|b| b.set_default("base_url", "http://127.0.0.1:3000"))
            .and_then(|b| b.set_default("fetch_timeout_secs", 10_i64))
            .and_then(|b| b.set_default("exclude_dirs", Vec::<String>::new()))
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Build a config for a docs tree with every other setting at its default.
    pub fn for_root(docs_root: impl Into<PathBuf>) -> Self {
        Self {
            docs_root: docs_root.into(),
            out_dir: PathBuf::from("dist"),
            site_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mode: BuildMode::Development,
            base_url: "http://127.0.0.1:3000".to_string(),
            fetch_timeout_secs: 10,
            exclude_dirs: vec![],
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
