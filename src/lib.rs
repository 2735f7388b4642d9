//! Wikicorpus: entity-normalized training corpora from Wikipedia dumps
//!
//! This crate turns a CirrusSearch dump (one JSON article per line) into a flat,
//! tokenized text corpus in which every hyperlink anchor is rewritten to the
//! canonical name of the article it points to.
//!
//! Each article goes through three stages:
//!
//! 1. **Anchor map** -- Scan the wikitext for `[[entity|anchor]]` references and
//!    build an ordered, first-write-wins `anchor -> entity` map seeded with the
//!    article title
//! 2. **Masking + tokenization** -- Replace anchors in the plain body longest
//!    first with `__i__` placeholders, then tokenize with a tokenizer that keeps
//!    placeholders atomic
//! 3. **Expansion** -- Swap each placeholder for the tokenized entity name (the
//!    anchor when the entity carries a `(qualifier)`), drop footnote carets and
//!    optionally re-split into characters
//!
//! # Key Modules
//!
//! - [`anchors`] -- Anchor map construction from wikitext
//! - [`mask`] -- Whitespace normalization and placeholder masking
//! - [`tokenize`] -- Tokenizer trait and the regexp / treebank / MeCab variants
//! - [`expand`] -- Placeholder expansion and final cleanup
//! - [`pipeline`] -- Per-article composition of the stages
//! - [`corpus`] -- Streaming driver with compressed I/O and progress reporting
//! - [`models`] -- Input record type
//! - [`stats`] -- Run counters
//! - [`config`] -- Constants
//!
//! # Example Usage
//!
//! ```bash
//! wikicorpus jawiki-cirrussearch-content.json.gz corpus.txt.bz2 --tokenizer mecab \
//!     --mecab-dic /usr/lib/mecab/dic/ipadic
//! ```

pub mod anchors;
pub mod config;
pub mod corpus;
pub mod expand;
pub mod mask;
pub mod models;
pub mod pipeline;
pub mod stats;
pub mod tokenize;
