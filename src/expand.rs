//! Placeholder expansion and final line cleanup.

use crate::anchors::Anchor;
use crate::tokenize::Tokenizer;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(\d+)__").unwrap());

/// Footnote markers left behind as a detached `^`.
static CARET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\^").unwrap());

/// Text that replaces an anchor's placeholder, before tokenization.
///
/// Entities carrying a parenthesized qualifier fall back to the anchor.
/// Whitespace is removed so the tokenizer decides the split.
pub fn replacement_text(entry: &Anchor) -> String {
    let chosen = if entry.entity.contains(['(', ')']) {
        &entry.anchor
    } else {
        &entry.entity
    };
    chosen.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Replaces every `__i__` in `text` with the tokenized replacement of
/// `anchors[i]`.
///
/// Runs in a single pass, so inserted tokens are never re-expanded. Each
/// replacement is tokenized at most once. Placeholders with an unknown index
/// are left as they are.
pub fn expand_placeholders(
    text: &str,
    anchors: &[&Anchor],
    tokenizer: &dyn Tokenizer,
    preserving: &Regex,
) -> Result<String> {
    let mut cache: Vec<Option<String>> = vec![None; anchors.len()];
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(idx) = caps[1].parse::<usize>().ok().filter(|&i| i < anchors.len()) else {
            continue;
        };

        if cache[idx].is_none() {
            let tokens = tokenizer.tokenize(&replacement_text(anchors[idx]), Some(preserving))?;
            cache[idx] = Some(tokens.join(" "));
        }

        out.push_str(&text[last..whole.start()]);
        out.push_str(cache[idx].as_deref().unwrap_or_default());
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

/// Removes detached carets and, in character mode, re-splits the line into
/// single characters.
pub fn cleanup(text: &str, char_level: bool) -> String {
    let text = CARET_REGEX.replace_all(text, "");
    if !char_level {
        return text.into_owned();
    }

    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
