//! Loading an asset from disk and handing it to the highlighter.

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::highlight::Highlighter;
use crate::types::{CodeAsset, HighlightedCode};

/// The snippet served by [`code_loader`], relative to the working directory
pub const ASSET_PATH: &str = "src/assets/code/planus-leo.ts.txt";

/// Language the snippet is highlighted as
pub const ASSET_LANGUAGE: &str = "typescript";

/// Read a UTF-8 text asset.
pub async fn read_asset(path: impl AsRef<Path>) -> Result<CodeAsset, LoadError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = content.len(), "read asset");

    Ok(CodeAsset {
        rel_path: path.to_string_lossy().replace('\\', "/"),
        content,
    })
}

/// Read `path` and highlight it as `language`.
pub async fn load_highlighted(
    path: impl AsRef<Path>,
    language: &str,
    highlighter: &Highlighter,
) -> Result<HighlightedCode, LoadError> {
    let asset = read_asset(path).await?;
    let highlighted = highlighter.highlight(&asset.content, language)?;
    debug!(asset = %asset.rel_path, grammar = %highlighted.language, "highlighted asset");
    Ok(highlighted)
}

/// Highlighted HTML for the bundled TypeScript snippet.
pub async fn code_loader() -> Result<String, LoadError> {
    let highlighted = load_highlighted(ASSET_PATH, ASSET_LANGUAGE, &Highlighter::new()).await?;
    Ok(highlighted.html)
}
