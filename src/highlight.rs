//! Language detection and per-line highlighting.
//!
//! Highlighting is a capability: anything implementing [`Highlighter`] can be
//! plugged in, and [`highlight_line`] falls back to plain HTML escaping when no
//! highlighter is given or it declines a language.

use crate::config::DiffConfig;
use crate::constant::DEFAULT_THEME;
use std::path::Path;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;

pub trait Highlighter: Send + Sync {
    /// Render `code` as HTML markup, or `None` to decline the language
    fn highlight(&self, code: &str, language: &str) -> Option<String>;
}

/// Highlighter backed by syntect's bundled syntaxes, emitting inline-styled spans
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Use a bundled theme by name. Unknown names get syntect's default theme.
    pub fn with_theme(name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(name).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using default", name);
            Theme::default()
        });

        Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme,
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Option<String> {
        let syntax = self.syntax_set.find_syntax_by_token(language)?;
        let mut h = HighlightLines::new(syntax, &self.theme);
        let ranges = h.highlight_line(code, &self.syntax_set).ok()?;
        styled_line_to_highlighted_html(&ranges[..], IncludeBackground::No).ok()
    }
}

/// Map a file path to a language identifier by extension.
///
/// Paths without an extension, or with an unmapped one, get
/// `config.fallback_language`.
pub fn resolve_language_from_path(file_path: &str, config: &DiffConfig) -> String {
    Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| language_for_extension(&ext.to_ascii_lowercase()))
        .map(str::to_string)
        .unwrap_or_else(|| config.fallback_language.clone())
}

fn language_for_extension(ext: &str) -> Option<&'static str> {
    let language = match ext {
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "tsx",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "jsx",
        "json" => "json",
        "md" | "markdown" => "markdown",
        "py" => "python",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "lua" => "lua",
        "sh" | "bash" | "zsh" => "bash",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "vue" => "vue",
        "sql" => "sql",
        _ => return None,
    };
    Some(language)
}

/// Highlight one line of code as HTML.
///
/// Content longer than `config.max_highlight_length` chars is truncated first.
/// Without a highlighter, or when it declines, the raw text is escaped.
pub fn highlight_line(
    line: &str,
    language: &str,
    config: &DiffConfig,
    highlighter: Option<&dyn Highlighter>,
) -> String {
    let content = truncate_chars(line, config.max_highlight_length);

    if let Some(highlighter) = highlighter {
        if let Some(markup) = highlighter.highlight(content, language) {
            return markup;
        }
        tracing::debug!(language, "Highlighter declined, escaping plain text");
    }

    escape_html(content)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Declining;

    impl Highlighter for Declining {
        fn highlight(&self, _code: &str, _language: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_resolve_known_extensions() {
        let config = DiffConfig::default();
        assert_eq!(resolve_language_from_path("/tmp/example.ts", &config), "typescript");
        assert_eq!(resolve_language_from_path("src/main.RS", &config), "rust");
        assert_eq!(resolve_language_from_path("a/b/c.tsx", &config), "tsx");
    }

    #[test]
    fn test_resolve_falls_back() {
        let config = DiffConfig {
            fallback_language: "text".to_string(),
            ..DiffConfig::default()
        };
        assert_eq!(resolve_language_from_path("/tmp/example.unknownext", &config), "text");
        assert_eq!(resolve_language_from_path("Makefile", &config), "text");
        assert_eq!(resolve_language_from_path("", &config), "text");
    }

    #[test]
    fn test_escape_without_highlighter() {
        let html = highlight_line("<tag>", "plaintext", &DiffConfig::default(), None);
        assert!(html.contains("&lt;tag&gt;"));
        assert!(!html.contains("<tag>"));
    }

    #[test]
    fn test_escape_all_special_chars() {
        assert_eq!(
            escape_html(r#"a & b < c > "d" 'e'"#),
            "a &amp; b &lt; c &gt; &quot;d&quot; &#39;e&#39;"
        );
    }

    #[test]
    fn test_declining_highlighter_escapes() {
        let declining = Declining;
        let config = DiffConfig::default();
        let html = highlight_line("if a < b {}", "rust", &config, Some(&declining));
        assert_eq!(html, "if a &lt; b {}");
    }

    #[test]
    fn test_truncates_long_lines() {
        let config = DiffConfig {
            max_highlight_length: 4,
            ..DiffConfig::default()
        };
        assert_eq!(highlight_line("abcdefgh", "plaintext", &config, None), "abcd");
        assert_eq!(highlight_line("日本語テキスト", "plaintext", &config, None), "日本語テ");
    }

    #[test]
    fn test_syntect_highlights_rust() {
        let highlighter = SyntectHighlighter::new();
        let html = highlight_line(
            "fn main() { let x = 1 < 2; }",
            "rust",
            &DiffConfig::default(),
            Some(&highlighter),
        );
        assert!(html.contains("<span"));
        assert!(html.contains("&lt;"));
    }

    #[test]
    fn test_syntect_declines_unknown_language() {
        let highlighter = SyntectHighlighter::new();
        assert!(highlighter.highlight("<b>", "no-such-language").is_none());
        let html = highlight_line(
            "<b>",
            "no-such-language",
            &DiffConfig::default(),
            Some(&highlighter),
        );
        assert_eq!(html, "&lt;b&gt;");
    }
}
