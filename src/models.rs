use serde::Deserialize;

/// One record of a CirrusSearch dump line.
///
/// Bulk-index header lines share the stream with documents; they carry no
/// `title` and are filtered out by the driver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source_text: String,
}

impl Article {
    pub fn new(title: &str, text: &str, source_text: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            text: text.to_string(),
            source_text: source_text.to_string(),
        }
    }
}
