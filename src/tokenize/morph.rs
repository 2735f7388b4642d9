use super::Tokenizer;
use anyhow::{Context, Result};
use mecrab::MeCrab;
use std::path::PathBuf;

/// Morpheme surfaces from a MeCab-compatible analyzer.
pub struct MecabTokenizer {
    analyzer: MeCrab,
    lowercase: bool,
}

impl MecabTokenizer {
    /// Loads the system dictionary (`dic`, or the analyzer's default when
    /// `None`) plus an optional user dictionary.
    pub fn new(dic: Option<PathBuf>, udic: Option<PathBuf>, lowercase: bool) -> Result<Self> {
        let analyzer = MeCrab::builder()
            .dicdir(dic.clone())
            .userdic(udic)
            .build()
            .with_context(|| format!("Failed to load MeCab dictionary: {:?}", dic))?;
        Ok(Self {
            analyzer,
            lowercase,
        })
    }
}

impl Tokenizer for MecabTokenizer {
    fn tokenize_span(&self, span: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        for chunk in span.split_whitespace() {
            let result = self
                .analyzer
                .parse(chunk)
                .with_context(|| format!("Morphological analysis failed for: {}", chunk))?;
            tokens.extend(
                result
                    .morphemes
                    .into_iter()
                    .map(|m| m.surface)
                    .filter(|s| !s.trim().is_empty()),
            );
        }
        Ok(tokens)
    }

    fn lowercase(&self) -> bool {
        self.lowercase
    }

    fn name(&self) -> &'static str {
        "mecab"
    }
}
