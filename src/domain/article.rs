use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author shown when the feed record carries none.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "urlToImage")]
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
    pub content: String,
}

impl Article {
    pub fn new(published_at: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: String::new(),
            image_url: String::new(),
            published_at,
            author: UNKNOWN_AUTHOR.to_string(),
            content: String::new(),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.trim().is_empty()
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Upgrade an `http:` (or scheme-relative) image link to `https:`.
    ///
    /// Everything after the scheme is kept byte for byte.
    pub fn secure_url(raw: &str) -> String {
        let scheme = raw.get(..5);
        if scheme.is_some_and(|s| s.eq_ignore_ascii_case("http:")) {
            format!("https:{}", &raw[5..])
        } else if raw.starts_with("//") {
            format!("https:{}", raw)
        } else {
            raw.to_string()
        }
    }
}
