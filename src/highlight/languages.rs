use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::error::LoadError;

/// Tags the bundled grammars don't know, mapped to the closest grammar they do know.
/// Consulted only when the tag itself resolves to nothing.
static LANGUAGE_ALIASES: &[(&str, &str)] = &[
    // TypeScript module flavours
    ("mts", "ts"),
    ("cts", "ts"),
    // Shells
    ("shell", "sh"),
    ("bash", "sh"),
    ("zsh", "sh"),
    // Misc
    ("c++", "cpp"),
    ("yml", "yaml"),
    ("markdown", "md"),
];

/// Resolve a language tag (file extension or grammar name, any case) to a grammar.
pub fn resolve<'a>(syntaxes: &'a SyntaxSet, tag: &str) -> Result<&'a SyntaxReference, LoadError> {
    let tag = tag.trim();
    if let Some(syntax) = syntaxes.find_syntax_by_token(tag) {
        return Ok(syntax);
    }

    let lowered = tag.to_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .and_then(|(_, target)| syntaxes.find_syntax_by_token(target))
        .ok_or_else(|| LoadError::UnsupportedLanguage(tag.to_string()))
}
