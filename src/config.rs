use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::loader::{ASSET_LANGUAGE, ASSET_PATH};

/// Config file names tried in order, relative to the working directory
pub const CONFIG_CANDIDATES: &[&str] = &["codeloader.yml", "codeloader.yaml"];

/// Theme used for `--css` when neither the flag nor the config names one
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Config for optional YAML (`codeloader.yml` / `codeloader.yaml`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodeLoaderConfig {
    /// Asset to highlight
    pub asset: PathBuf,
    /// Language tag handed to the highlighter
    pub language: String,
    /// Extra `.sublime-syntax` grammars
    pub syntax_dir: Option<PathBuf>,
    /// Emit `hl-` prefixed class names
    pub prefixed_classes: bool,
    /// Theme for generated stylesheets
    pub theme: String,
}

impl Default for CodeLoaderConfig {
    fn default() -> Self {
        Self {
            asset: PathBuf::from(ASSET_PATH),
            language: ASSET_LANGUAGE.to_string(),
            syntax_dir: None,
            prefixed_classes: false,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl CodeLoaderConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file deserializes to null, not to an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Load config from the first candidate present in `dir`, returning None if there is none.
pub fn load_config_file(dir: &Path) -> Result<Option<CodeLoaderConfig>> {
    for candidate in CONFIG_CANDIDATES {
        let path = dir.join(candidate);
        if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config = CodeLoaderConfig::from_yaml(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            info!(path = %path.display(), "loaded config");
            return Ok(Some(config));
        }
    }
    Ok(None)
}
