//! Assistant HTML to plain terminal text.
//!
//! The assistant answers with small HTML fragments (paragraphs, lists,
//! emphasis, headings). Block tags become line breaks, list items become
//! bullets, everything else is stripped.

use std::sync::LazyLock;

use regex::Regex;

static BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("line break regex must compile")
});

/// Closing tags of block elements.
static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(p|div|h[1-6]|ul|ol|pre|blockquote|table|tr)\s*>")
        .expect("block tag regex must compile")
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<li[^>]*>").expect("list item regex must compile")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex must compile"));

/// Two or more newlines, possibly separated by horizontal whitespace.
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[ \t]*(\n[ \t]*)+").expect("blank run regex must compile")
});

/// Convert an HTML fragment to readable plain text.
pub fn to_text(html: &str) -> String {
    let text = BREAK.replace_all(html, "\n");
    let text = BLOCK_END.replace_all(&text, "\n\n");
    let text = LIST_ITEM.replace_all(&text, "\n  • ");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = BLANK_RUN.replace_all(&text, "\n\n");

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_separate_blocks() {
        let text = to_text("<p>Primero</p><p>Segundo</p>");
        assert_eq!(text, "Primero\n\nSegundo");
    }

    #[test]
    fn list_items_become_bullets() {
        let text = to_text("<ul><li>Uno</li><li>Dos</li></ul>");
        assert_eq!(text, "  • Uno\n  • Dos");
    }

    #[test]
    fn inline_tags_are_stripped() {
        assert_eq!(to_text("<strong>Stock</strong> <em>bajo</em>"), "Stock bajo");
    }

    #[test]
    fn entities_are_decoded_once() {
        assert_eq!(to_text("a &amp;lt; b &gt; c"), "a &lt; b > c");
    }

    #[test]
    fn line_breaks() {
        assert_eq!(to_text("a<br>b<BR/>c"), "a\nb\nc");
    }
}
