//! HTML syntax highlighting
//!
//! Wraps syntect's classed HTML output: every lexical token becomes a
//! `<span class="...">` whose classes are the token's scope names, and the
//! stylesheet that colours those classes is produced separately by [`Highlighter::css`].

pub mod languages;

use std::path::Path;

use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::debug;

use crate::error::LoadError;
use crate::types::HighlightedCode;

/// Prefix applied to every class name in prefixed mode
pub const CLASS_PREFIX: &str = "hl-";

/// Grammar set the highlighter starts from: syntect's defaults plus the
/// extra languages (TypeScript among them) bundled by `two-face`
fn base_syntaxes() -> SyntaxSet {
    two_face::syntax::extra_newlines()
}

#[derive(Debug)]
pub struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    class_style: ClassStyle,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Bundled grammars and themes, unprefixed class names
    pub fn new() -> Self {
        Self {
            syntaxes: base_syntaxes(),
            themes: ThemeSet::load_defaults(),
            class_style: ClassStyle::Spaced,
        }
    }

    /// Bundled grammars plus every `.sublime-syntax` under `dir`.
    /// A grammar loaded here wins over a bundled one claiming the same extension.
    pub fn with_syntax_dir(dir: &Path) -> Result<Self, LoadError> {
        let mut builder = base_syntaxes().into_builder();
        builder
            .add_from_folder(dir, true)
            .map_err(|source| LoadError::SyntaxDir {
                path: dir.to_path_buf(),
                source,
            })?;
        let syntaxes = builder.build();
        debug!(dir = %dir.display(), count = syntaxes.syntaxes().len(), "loaded syntaxes");

        Ok(Self {
            syntaxes,
            themes: ThemeSet::load_defaults(),
            class_style: ClassStyle::Spaced,
        })
    }

    pub fn with_class_style(mut self, class_style: ClassStyle) -> Self {
        self.class_style = class_style;
        self
    }

    /// Switch between `source js` and `hl-source hl-js` class names
    pub fn prefixed(self, prefixed: bool) -> Self {
        let style = if prefixed {
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            }
        } else {
            ClassStyle::Spaced
        };
        self.with_class_style(style)
    }

    /// Turn `code` into classed HTML using the grammar for `language`.
    ///
    /// Markup-significant characters in the source are escaped, so stripping
    /// the tags and unescaping entities gives back `code` unchanged.
    pub fn highlight(&self, code: &str, language: &str) -> Result<HighlightedCode, LoadError> {
        let syntax = languages::resolve(&self.syntaxes, language)?;
        debug!(language, grammar = %syntax.name, bytes = code.len(), "highlighting");

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, self.class_style);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(HighlightedCode {
            language: syntax.name.clone(),
            html: generator.finalize(),
        })
    }

    /// Stylesheet matching this highlighter's class names for a bundled theme
    pub fn css(&self, theme: &str) -> Result<String, LoadError> {
        let theme = self
            .themes
            .themes
            .get(theme)
            .ok_or_else(|| LoadError::UnknownTheme(theme.to_string()))?;
        Ok(css_for_theme_with_class_style(theme, self.class_style)?)
    }

    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.themes.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Drop every tag, leaving escaped text as emitted
    pub(crate) fn strip_tags(html: &str) -> String {
        let mut text = String::with_capacity(html.len());
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }
        text
    }

    /// Decode the entities the generator emits
    pub(crate) fn unescape(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    pub(crate) fn strip_markup(html: &str) -> String {
        unescape(&strip_tags(html))
    }

    const SAMPLE: &str = "const xs: Array<number> = [1, 2];\nif (a < b && b > c) {\n  console.log(\"<done>\");\n}\n";

    const LEO_SYNTAX: &str = r#"%YAML 1.2
---
name: Leo Script
file_extensions: [typescript, shell]
scope: source.leo
contexts:
  main:
    - match: '\b(plan|task)\b'
      scope: keyword.control.leo
"#;

    #[test]
    fn test_highlight_wraps_tokens_in_spans() {
        let out = Highlighter::new().highlight(SAMPLE, "typescript").unwrap();
        assert!(out.html.contains("<span class=\""));
        assert!(out.html.contains("&lt;"));
        assert!(out.html.contains("&amp;"));
    }

    #[test]
    fn test_typescript_uses_typescript_grammar() {
        let code = "interface Task {\n  title: string;\n}\n";
        let out = Highlighter::new().highlight(code, "typescript").unwrap();
        assert_eq!(out.language, "TypeScript");
        assert!(out.html.contains("source ts"));
        assert!(out.html.contains("storage type interface ts"));
        assert!(out.html.contains("support type primitive ts"));
        assert!(!out.html.contains(" js\""));
    }

    #[test]
    fn test_highlight_escapes_source_brackets() {
        let out = Highlighter::new().highlight(SAMPLE, "typescript").unwrap();
        let text = strip_tags(&out.html);
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
    }

    #[test]
    fn test_highlight_preserves_text() {
        let out = Highlighter::new().highlight(SAMPLE, "ts").unwrap();
        assert_eq!(strip_markup(&out.html), SAMPLE);
    }

    #[test]
    fn test_highlight_without_trailing_newline() {
        let code = "fn main() {}";
        let out = Highlighter::new().highlight(code, "rust").unwrap();
        assert_eq!(strip_markup(&out.html), code);
    }

    #[test]
    fn test_highlight_empty_input() {
        let out = Highlighter::new().highlight("", "rust").unwrap();
        assert_eq!(strip_markup(&out.html), "");
    }

    #[test]
    fn test_prefixed_classes() {
        let out = Highlighter::new()
            .prefixed(true)
            .highlight("let x = 1;\n", "js")
            .unwrap();
        assert!(out.html.contains("class=\"hl-source hl-js\""));
    }

    #[test]
    fn test_unsupported_language() {
        let err = Highlighter::new().highlight("x", "cobol-2099").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedLanguage(_)));
        assert!(!err.is_resource_error());
    }

    #[test]
    fn test_css_for_bundled_theme() {
        let highlighter = Highlighter::new();
        assert!(highlighter.theme_names().contains(&"InspiredGitHub"));
        let css = highlighter.css("InspiredGitHub").unwrap();
        assert!(css.contains('{'));
    }

    #[test]
    fn test_prefixed_css_matches_prefixed_html() {
        let highlighter = Highlighter::new().prefixed(true);
        let css = highlighter.css("InspiredGitHub").unwrap();
        assert!(css.contains(".hl-"));

        let plain = Highlighter::new().css("InspiredGitHub").unwrap();
        assert!(!plain.contains(".hl-"));
    }

    #[test]
    fn test_css_unknown_theme() {
        let err = Highlighter::new().css("no-such-theme").unwrap_err();
        assert!(matches!(err, LoadError::UnknownTheme(ref name) if name == "no-such-theme"));
    }

    #[test]
    fn test_missing_syntax_dir() {
        let err = Highlighter::with_syntax_dir(Path::new("/nonexistent/syntaxes")).unwrap_err();
        assert!(matches!(err, LoadError::SyntaxDir { .. }));
    }

    #[test]
    fn test_syntax_dir_grammar_takes_precedence() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("leo.sublime-syntax"), LEO_SYNTAX).unwrap();
        let highlighter = Highlighter::with_syntax_dir(dir.path()).unwrap();

        // Over the bundled TypeScript grammar
        let out = highlighter.highlight("plan task\n", "typescript").unwrap();
        assert_eq!(out.language, "Leo Script");
        assert!(out.html.contains("keyword control leo"));

        // Over the shell alias
        let out = highlighter.highlight("plan\n", "shell").unwrap();
        assert_eq!(out.language, "Leo Script");

        // Bundled grammars are still there
        let out = highlighter.highlight("fn main() {}\n", "rust").unwrap();
        assert_eq!(out.language, "Rust");
    }
}
