//! Markup stripping and length limiting for text sent to the model.
//!
//! Input is parsed as an HTML fragment with html5ever (via `scraper`),
//! so malformed markup degrades to whatever text the parser recovers.

use scraper::{Html, Node};

/// Maximum number of characters passed to the classifier.
pub const MAX_TEXT_CHARS: usize = 512;

/// Entity decoding can surface new markup (`&lt;b&gt;`), so extraction
/// repeats until stable, at most this many times.
const MAX_PASSES: usize = 3;

/// Strip markup, collapse whitespace and truncate to [`MAX_TEXT_CHARS`].
///
/// Missing input yields an empty string.
pub fn sanitize_text(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let mut text = extract_text(raw);
    for _ in 1..MAX_PASSES {
        if !text.contains('<') {
            break;
        }
        let next = extract_text(&text);
        if next == text {
            break;
        }
        text = next;
    }
    if text.contains('<') {
        text = collapse_whitespace(&drop_tag_runs(&text));
    }

    truncate_chars(&text, MAX_TEXT_CHARS)
}

/// Drop every `<...>` run that starts like a tag, comment or declaration.
///
/// Applied once the pass budget is spent. A `<` not followed by a letter,
/// `/`, `!` or `?` is plain text (`a < b`, `<3`) and kept.
fn drop_tag_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let opens_tag = ch == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_alphabetic() || matches!(next, '/' | '!' | '?'));
        if opens_tag {
            for skipped in chars.by_ref() {
                if skipped == '>' {
                    break;
                }
            }
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Concatenate the text nodes of an HTML fragment, skipping script and style bodies.
fn extract_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut joined = String::with_capacity(raw.len());

    for node in fragment.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let in_raw_element = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|el| el.name()))
                .map_or(false, |name| matches!(name, "script" | "style"));
            if !in_raw_element {
                joined.push_str(text);
            }
        }
    }

    collapse_whitespace(&joined)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
