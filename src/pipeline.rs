use crate::anchors::AnchorMap;
use crate::config::PLACEHOLDER_PATTERN;
use crate::expand::{cleanup, expand_placeholders};
use crate::mask::{mask_anchors, normalize_whitespace};
use crate::models::Article;
use crate::tokenize::{build_tokenizer, Tokenizer, TokenizerConfig};
use anyhow::Result;
use regex::Regex;
use tracing::trace;

/// Result of transforming one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub line: String,
    /// Entries in the article's anchor map, title included
    pub anchors: usize,
    /// Anchor occurrences replaced in the body
    pub masked: usize,
}

/// Per-article transform: anchor map, masking, tokenization, expansion.
pub struct Pipeline {
    tokenizer: Box<dyn Tokenizer>,
    preserving: Regex,
    char_level: bool,
}

impl Pipeline {
    pub fn new(tokenizer: Box<dyn Tokenizer>, char_level: bool) -> Result<Self> {
        Ok(Self {
            tokenizer,
            preserving: Regex::new(PLACEHOLDER_PATTERN)?,
            char_level,
        })
    }

    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        Self::new(build_tokenizer(config)?, config.kind.is_char_level())
    }

    /// Returns `None` for records without a title.
    pub fn process(&self, article: &Article) -> Result<Option<Processed>> {
        match article.title.as_deref() {
            Some(title) => self
                .transform(title, &article.text, &article.source_text)
                .map(Some),
            None => Ok(None),
        }
    }

    pub fn transform(&self, title: &str, text: &str, source_text: &str) -> Result<Processed> {
        let map = AnchorMap::build(title, source_text);
        let sorted = map.by_length();

        let text = normalize_whitespace(text);
        let masked = mask_anchors(&text, &sorted);
        trace!(
            title,
            anchors = map.len(),
            masked = masked.replacements,
            "Masked article"
        );

        let tokens = self
            .tokenizer
            .tokenize(&masked.text, Some(&self.preserving))?;
        let expanded = expand_placeholders(
            &tokens.join(" "),
            &sorted,
            self.tokenizer.as_ref(),
            &self.preserving,
        )?;

        Ok(Processed {
            line: cleanup(&expanded, self.char_level),
            anchors: map.len(),
            masked: masked.replacements,
        })
    }

    pub fn tokenizer_name(&self) -> &'static str {
        self.tokenizer.name()
    }
}
