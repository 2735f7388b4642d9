//! Tokenizer capability shared by every segmentation strategy.
//!
//! A tokenizer only has to split a plain span of text into tokens
//! ([`Tokenizer::tokenize_span`]). The provided [`Tokenizer::tokenize`]
//! handles the preserving pattern: every match is emitted verbatim as one
//! token and only the gaps between matches reach the variant. Case folding
//! is applied to gap tokens only.

mod regexp;
mod treebank;

#[cfg(feature = "mecab")]
mod morph;

pub use regexp::RegexTokenizer;
pub use treebank::TreebankTokenizer;

#[cfg(feature = "mecab")]
pub use morph::MecabTokenizer;

use anyhow::Result;
use regex::Regex;
use std::path::PathBuf;
use tracing::info;

pub trait Tokenizer {
    /// Splits a span that contains no preserved text.
    fn tokenize_span(&self, span: &str) -> Result<Vec<String>>;

    /// Whether gap tokens are lowercased.
    fn lowercase(&self) -> bool;

    fn name(&self) -> &'static str;

    fn tokenize(&self, text: &str, preserving: Option<&Regex>) -> Result<Vec<String>> {
        let Some(pattern) = preserving else {
            return self.tokenize_gap(text);
        };

        let mut tokens = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            tokens.extend(self.tokenize_gap(&text[last..m.start()])?);
            tokens.push(m.as_str().to_string());
            last = m.end();
        }
        tokens.extend(self.tokenize_gap(&text[last..])?);

        Ok(tokens)
    }

    #[doc(hidden)]
    fn tokenize_gap(&self, span: &str) -> Result<Vec<String>> {
        if span.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tokens = self.tokenize_span(span)?;
        if self.lowercase() {
            Ok(tokens.into_iter().map(|t| t.to_lowercase()).collect())
        } else {
            Ok(tokens)
        }
    }
}

/// Segmentation strategy chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TokenizerKind {
    /// Word runs and single punctuation marks
    #[default]
    Regexp,
    /// Penn Treebank rules (NLTK word_tokenize style)
    Nltk,
    /// Morphological analysis over a MeCab dictionary
    Mecab,
    /// One token per character in the final output
    Char,
}

impl TokenizerKind {
    /// Character mode re-splits finished lines into single characters.
    pub fn is_char_level(self) -> bool {
        matches!(self, TokenizerKind::Char)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    pub kind: TokenizerKind,
    pub lowercase: bool,
    /// MeCab system dictionary directory
    pub mecab_dic: Option<PathBuf>,
    /// MeCab user dictionary file
    pub mecab_udic: Option<PathBuf>,
}

pub fn build_tokenizer(config: &TokenizerConfig) -> Result<Box<dyn Tokenizer>> {
    let tokenizer: Box<dyn Tokenizer> = match config.kind {
        TokenizerKind::Regexp => Box::new(RegexTokenizer::new(config.lowercase)),
        TokenizerKind::Nltk => Box::new(TreebankTokenizer::new(config.lowercase)),
        TokenizerKind::Mecab => build_morphological(config)?,
        TokenizerKind::Char => char_level_base(config)?,
    };

    info!(
        tokenizer = tokenizer.name(),
        lowercase = config.lowercase,
        "Tokenizer ready"
    );
    Ok(tokenizer)
}

#[cfg(feature = "mecab")]
fn build_morphological(config: &TokenizerConfig) -> Result<Box<dyn Tokenizer>> {
    info!(dictionary = ?config.mecab_dic, user_dictionary = ?config.mecab_udic, "Loading MeCab dictionary");
    Ok(Box::new(MecabTokenizer::new(
        config.mecab_dic.clone(),
        config.mecab_udic.clone(),
        config.lowercase,
    )?))
}

#[cfg(not(feature = "mecab"))]
fn build_morphological(_config: &TokenizerConfig) -> Result<Box<dyn Tokenizer>> {
    anyhow::bail!("MeCab tokenizer is not available: rebuild with `--features mecab`")
}

#[cfg(feature = "mecab")]
fn char_level_base(config: &TokenizerConfig) -> Result<Box<dyn Tokenizer>> {
    build_morphological(config)
}

#[cfg(not(feature = "mecab"))]
fn char_level_base(config: &TokenizerConfig) -> Result<Box<dyn Tokenizer>> {
    info!("Character mode without MeCab support, segmenting with the regex tokenizer");
    Ok(Box::new(RegexTokenizer::new(config.lowercase)))
}
