use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),

    #[error("Could not load syntaxes from {}: {source}", path.display())]
    SyntaxDir {
        path: PathBuf,
        #[source]
        source: syntect::LoadingError,
    },

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

impl LoadError {
    /// True when the failure came from touching the filesystem rather than the highlighter
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::SyntaxDir { .. })
    }
}
