use chrono::{DateTime, NaiveDateTime, Utc};
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::app::{FeedError, Result};
use crate::domain::Article;

/// What to do with a record whose timestamp is missing or unparsable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Fail the whole decode.
    #[default]
    Strict,
    /// Log and omit the record.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleDecoder {
    policy: RecordPolicy,
}

impl ArticleDecoder {
    pub fn new() -> Self {
        Self::with_policy(RecordPolicy::default())
    }

    pub fn with_policy(policy: RecordPolicy) -> Self {
        Self { policy }
    }

    /// Turn a raw headline document into the articles worth showing.
    ///
    /// Records without a usable image are dropped; the survivors keep
    /// their original order.
    pub fn decode(&self, document: &Value) -> Result<Vec<Article>> {
        if !document.is_object() {
            return Err(FeedError::MalformedFeed(
                "document is not a JSON object".into(),
            ));
        }

        let records = document
            .get("articles")
            .ok_or_else(|| FeedError::MalformedFeed("missing top-level `articles` field".into()))?
            .as_array()
            .ok_or_else(|| FeedError::MalformedFeed("`articles` is not an array".into()))?;

        let mut articles = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match decode_record(index, record) {
                Ok(article) => articles.push(article),
                Err(e) if self.policy == RecordPolicy::Skip => {
                    tracing::warn!("Skipping feed record: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        let decoded = articles.len();
        articles.retain(Article::has_image);
        tracing::debug!(
            "Decoded {} of {} records, {} with images",
            decoded,
            records.len(),
            articles.len()
        );

        Ok(articles)
    }
}

fn decode_record(index: usize, record: &Value) -> Result<Article> {
    let fields = record.as_object().ok_or_else(|| FeedError::MalformedRecord {
        index,
        reason: "record is not an object".into(),
    })?;

    let published_at = match text_field(fields, "publishedAt") {
        Some(raw) => parse_timestamp(raw).ok_or_else(|| FeedError::MalformedRecord {
            index,
            reason: format!("unparsable publishedAt {:?}", raw),
        })?,
        None => {
            return Err(FeedError::MalformedRecord {
                index,
                reason: "missing publishedAt".into(),
            })
        }
    };

    let mut article = Article::new(published_at);

    if let Some(title) = text_field(fields, "title") {
        article.title = decode_html_entities(title).to_string();
    }
    if let Some(description) = text_field(fields, "description") {
        article.description = decode_html_entities(description).to_string();
    }
    if let Some(url) = text_field(fields, "url") {
        article.url = url.to_string();
    }
    if let Some(image) = text_field(fields, "urlToImage") {
        article.image_url = Article::secure_url(image);
    }
    if let Some(author) = text_field(fields, "author") {
        article.author = decode_html_entities(author).to_string();
    }
    if let Some(content) = text_field(fields, "content") {
        article.content = decode_html_entities(content).to_string();
    }

    Ok(article)
}

// null and non-string values count as absent
fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Parse the ISO-8601 shapes seen in headline feeds. Naive times are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
