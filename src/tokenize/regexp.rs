use super::Tokenizer;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|\S").unwrap());

/// Word-character runs, and every other non-space character on its own.
#[derive(Debug, Clone, Default)]
pub struct RegexTokenizer {
    lowercase: bool,
}

impl RegexTokenizer {
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize_span(&self, span: &str) -> Result<Vec<String>> {
        Ok(TOKEN_REGEX
            .find_iter(span)
            .map(|m| m.as_str().to_string())
            .collect())
    }

    fn lowercase(&self) -> bool {
        self.lowercase
    }

    fn name(&self) -> &'static str {
        "regexp"
    }
}
