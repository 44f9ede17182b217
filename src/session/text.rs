use regex::Regex;
use std::sync::OnceLock;

pub const MAX_TITLE_CHARS: usize = 30;
const ELLIPSIS: &str = "...";
const SENTENCE_TERMINALS: [char; 3] = ['.', '!', '?'];

fn non_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid non-word pattern"))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean up a user submission before it is appended.
///
/// Returns `None` when nothing but whitespace was typed.
pub fn normalize_input(input: &str) -> Option<String> {
    let mut text = collapse_whitespace(input);
    if text.is_empty() {
        return None;
    }

    if !text.ends_with(SENTENCE_TERMINALS) {
        text.push('.');
    }

    let mut chars = text.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Derive a short session title from the first user message.
///
/// Only the first sentence is kept, punctuation and symbols are dropped, and
/// anything longer than `MAX_TITLE_CHARS` is cut to fit with an ellipsis.
pub fn derive_title(content: &str) -> Option<String> {
    let first_sentence = content
        .split(SENTENCE_TERMINALS)
        .find(|s| !s.trim().is_empty())?;

    let stripped = non_word().replace_all(first_sentence, "");
    let title = collapse_whitespace(&stripped);
    if title.is_empty() {
        return None;
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        let keep = MAX_TITLE_CHARS - ELLIPSIS.len();
        let truncated: String = title.chars().take(keep).collect();
        Some(format!("{}{}", truncated, ELLIPSIS))
    } else {
        Some(title)
    }
}
