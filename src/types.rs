/// A source file as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAsset {
    pub rel_path: String,
    pub content: String,
}

/// Highlighted markup for one asset, plus the grammar that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    pub language: String,
    pub html: String,
}
