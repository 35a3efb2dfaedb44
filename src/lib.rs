//! Load a source-code asset from disk and render it as syntax-highlighted HTML.

pub mod config;
pub mod error;
pub mod highlight;
pub mod loader;
pub mod logging;
pub mod types;

pub use error::LoadError;
pub use highlight::Highlighter;
pub use loader::{code_loader, load_highlighted, read_asset, ASSET_LANGUAGE, ASSET_PATH};
pub use types::{CodeAsset, HighlightedCode};
