//! Placeholder masking of anchor spans in article bodies.
//!
//! Anchors are replaced longest first with ` __i__ `, where `i` is the
//! anchor's position in [`AnchorMap::by_length`](crate::anchors::AnchorMap::by_length).
//! Text already turned into a placeholder is never scanned again, so a short
//! anchor can neither split a longer anchor's occurrence nor rewrite the
//! digits of an existing placeholder.

use crate::anchors::Anchor;
use crate::config::PLACEHOLDER_DELIM;
use memchr::memmem;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapses every whitespace run into a single ASCII space.
pub fn normalize_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_REGEX.replace_all(text, " ")
}

/// Renders the placeholder token for index `idx` (no padding).
pub fn placeholder(idx: usize) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(idx);
    let mut out = String::with_capacity(digits.len() + 2 * PLACEHOLDER_DELIM.len());
    out.push_str(PLACEHOLDER_DELIM);
    out.push_str(digits);
    out.push_str(PLACEHOLDER_DELIM);
    out
}

#[derive(Debug)]
enum Segment {
    Text(String),
    Placeholder(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    /// Body text with every anchor occurrence replaced by a padded placeholder
    pub text: String,
    /// Number of anchor occurrences replaced
    pub replacements: usize,
}

/// Masks every literal occurrence of each anchor, in the given order.
///
/// `anchors` must already be in placeholder order (longest first). Matching is
/// raw substring identity; word boundaries are not considered.
pub fn mask_anchors(text: &str, anchors: &[&Anchor]) -> Masked {
    let mut segments = vec![Segment::Text(text.to_string())];
    let mut replacements = 0;

    for (idx, entry) in anchors.iter().enumerate() {
        let needle = entry.anchor.as_bytes();
        if needle.is_empty() {
            continue;
        }
        let finder = memmem::Finder::new(needle);

        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            let s = match segment {
                Segment::Text(s) => s,
                other => {
                    next.push(other);
                    continue;
                }
            };

            let mut last = 0;
            for pos in finder.find_iter(s.as_bytes()) {
                if last < pos {
                    next.push(Segment::Text(s[last..pos].to_string()));
                }
                next.push(Segment::Placeholder(idx));
                last = pos + needle.len();
                replacements += 1;
            }

            if last == 0 {
                next.push(Segment::Text(s));
            } else if last < s.len() {
                next.push(Segment::Text(s[last..].to_string()));
            }
        }
        segments = next;
    }

    Masked {
        text: render(&segments),
        replacements,
    }
}

fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(s) => out.push_str(s),
            Segment::Placeholder(idx) => {
                out.push(' ');
                out.push_str(&placeholder(*idx));
                out.push(' ');
            }
        }
    }
    out
}
