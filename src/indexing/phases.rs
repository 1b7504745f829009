//! Build-phase entry points for the host site pipeline.
//!
//! Each phase is a plain function over [`build_index`], so the emitted
//! asset, the dev endpoint and the virtual module all serialize the same
//! [`DocIndex`] structure.

use std::path::PathBuf;

use axum::Router;

use crate::app::{api_router, AppState};
use crate::config::DocsConfig;
use crate::error::AppError;
use crate::indexing::builder::build_index;
use crate::models::document::DocIndex;

/// File name of the emitted static index.
pub const INDEX_ASSET_NAME: &str = "docs-index.json";

/// Import specifier the frontend uses for the virtual index module.
pub const VIRTUAL_MODULE_ID: &str = "virtual:docs-index";

const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:docs-index";

/// Generate-assets phase: write `docs-index.json` into the output directory.
pub fn generate_assets(config: &DocsConfig) -> Result<PathBuf, AppError> {
    let index = build_index(config)?;
    write_index_asset(&index, config)
}

/// Serialize an already built index to `<out_dir>/docs-index.json`.
pub fn write_index_asset(index: &DocIndex, config: &DocsConfig) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::Io(format!(
            "Failed to create output directory '{}': {}",
            config.out_dir.display(),
            e
        ))
    })?;

    let json = serde_json::to_string_pretty(index)
        .map_err(|e| AppError::Internal(format!("Failed to serialize index: {e}")))?;

    let target = config.out_dir.join(INDEX_ASSET_NAME);
    std::fs::write(&target, json)
        .map_err(|e| AppError::Io(format!("Failed to write '{}': {}", target.display(), e)))?;

    tracing::info!("Wrote documentation index to {}", target.display());
    Ok(target)
}

/// Dev-middleware phase: build the index once and serve it at `/api/docs`.
///
/// A failed build does not prevent the router from starting; requests then
/// receive a `500` describing the failure.
pub fn dev_middleware(config: &DocsConfig) -> Router {
    api_router(AppState::from_build(build_index(config)))
}

/// Virtual-module resolve phase: claim the docs index import specifier.
pub fn resolve_virtual_id(id: &str) -> Option<String> {
    (id == VIRTUAL_MODULE_ID).then(|| RESOLVED_VIRTUAL_MODULE_ID.to_string())
}

/// Virtual-module load phase: produce the module source for a resolved id.
///
/// Returns `None` for ids this pipeline does not own.
pub fn load_virtual_module(id: &str, config: &DocsConfig) -> Option<Result<String, AppError>> {
    if id != RESOLVED_VIRTUAL_MODULE_ID {
        return None;
    }

    Some(build_index(config).and_then(|index| virtual_module_source(&index)))
}

/// Render an index as an ES module exporting it as the default value.
pub fn virtual_module_source(index: &DocIndex) -> Result<String, AppError> {
    let json = serde_json::to_string(index)
        .map_err(|e| AppError::Internal(format!("Failed to serialize index: {e}")))?;
    Ok(format!("export default {json};\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs_tree() -> (tempfile::TempDir, DocsConfig) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("docs");
        std::fs::create_dir_all(root.join("guides")).unwrap();
        std::fs::write(root.join("README.md"), "---\ntitle: Project Overview\n---\nHello").unwrap();
        std::fs::write(root.join("guides/mixing.md"), "# Mixing\n\n```sh\nls\n```").unwrap();

        let mut config = DocsConfig::for_root(root);
        config.out_dir = dir.path().join("dist");
        (dir, config)
    }

    #[test]
    fn test_generate_assets_writes_index() {
        let (_dir, config) = docs_tree();
        let path = generate_assets(&config).unwrap();

        assert!(path.ends_with(INDEX_ASSET_NAME));
        let written: DocIndex =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.files.len(), 2);
        assert_eq!(written.categories, vec!["guides", "root"]);
    }

    #[test]
    fn test_virtual_module_round_trip() {
        let (_dir, config) = docs_tree();

        assert_eq!(resolve_virtual_id("virtual:other"), None);
        let resolved = resolve_virtual_id(VIRTUAL_MODULE_ID).unwrap();
        assert!(load_virtual_module("virtual:docs-index", &config).is_none());

        let source = load_virtual_module(&resolved, &config).unwrap().unwrap();
        let json = source
            .strip_prefix("export default ")
            .and_then(|s| s.strip_suffix(";\n"))
            .unwrap();
        let index: DocIndex = serde_json::from_str(json).unwrap();

        let asset: DocIndex = serde_json::from_str(
            &std::fs::read_to_string(generate_assets(&config).unwrap()).unwrap(),
        )
        .unwrap();
        assert_eq!(index, asset);
    }
}
