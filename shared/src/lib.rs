//! Domain core shared between the NewsFlow frontend and its tests: wire
//! models for the remote collections, article query construction, the feed
//! state machine, and the article visibility policy.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

pub mod feed;
pub mod query;
pub mod visibility;

/// Shortname of the distinguished events category. Event posts are excluded
/// from the default feed and get time-based filtering when selected.
pub const EVENTS_SHORTNAME: &str = "events";

// 文章数据模型（与远端 articles 集合对齐）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: ArticleTitle,
    pub link: String,
    /// Optional event time, epoch milliseconds.
    #[serde(default)]
    pub datetime: Option<i64>,
    /// Server-side creation time, epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Article {
    /// Title text regardless of whether the remote stored it plain or
    /// structured.
    pub fn display_title(&self) -> &str {
        self.title.text()
    }

    /// The timestamp shown for this article: the event time when present,
    /// the creation time otherwise.
    pub fn display_time_millis(&self) -> i64 {
        self.datetime.unwrap_or(self.created_at)
    }

    /// Display timestamp formatted as a sortable local time string.
    pub fn display_time(&self) -> String {
        format_local_timestamp(self.display_time_millis())
    }

    /// Whether this article carries the events category.
    pub fn is_event(&self) -> bool {
        self.categories.iter().any(Category::is_events)
    }
}

/// Article titles arrive either as a bare string or as an object with a
/// `text` field; older posts use the plain form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleTitle {
    Structured { text: String },
    Plain(String),
}

impl ArticleTitle {
    pub fn text(&self) -> &str {
        match self {
            ArticleTitle::Structured { text } => text,
            ArticleTitle::Plain(text) => text,
        }
    }
}

impl From<&str> for ArticleTitle {
    fn from(text: &str) -> Self {
        ArticleTitle::Plain(text.to_string())
    }
}

// 分类数据模型（categories 集合）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Remote identifier. Absent only for the synthetic "All" entry, which
    /// never reaches the remote API.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub shortname: String,
}

impl Category {
    /// The client-only pseudo-category representing "no filter". It is
    /// prepended to every loaded category list.
    pub fn all() -> Self {
        Category {
            id: None,
            name: "All".to_string(),
            shortname: String::new(),
        }
    }

    pub fn is_events(&self) -> bool {
        self.shortname == EVENTS_SHORTNAME
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an epoch-milliseconds instant as local time, `YYYY-MM-DD HH:MM:SS`.
pub fn format_local_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|time| time.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{format_local_timestamp, Article, ArticleTitle, Category};

    fn article(datetime: Option<i64>) -> Article {
        Article {
            id: "a1".to_string(),
            title: ArticleTitle::from("Launch day"),
            link: "https://example.org/launch".to_string(),
            datetime,
            created_at: 1_700_000_000_000,
            categories: Vec::new(),
        }
    }

    #[test]
    fn plain_title_deserializes_from_string() {
        let json = r#"{"_id":"a1","title":"Hello","link":"x","createdAt":1}"#;
        let parsed: Article = serde_json::from_str(json).expect("article");
        assert_eq!(parsed.display_title(), "Hello");
        assert_eq!(parsed.title, ArticleTitle::Plain("Hello".to_string()));
    }

    #[test]
    fn structured_title_deserializes_from_object() {
        let json = r#"{"_id":"a1","title":{"text":"Hello"},"link":"x","createdAt":1}"#;
        let parsed: Article = serde_json::from_str(json).expect("article");
        assert_eq!(parsed.display_title(), "Hello");
        assert!(matches!(parsed.title, ArticleTitle::Structured { .. }));
    }

    #[test]
    fn missing_categories_default_to_empty() {
        let json = r#"{"_id":"a1","title":"Hello","link":"x","createdAt":1}"#;
        let parsed: Article = serde_json::from_str(json).expect("article");
        assert!(parsed.categories.is_empty());
        assert!(!parsed.is_event());
    }

    #[test]
    fn display_time_prefers_event_datetime() {
        assert_eq!(article(Some(42)).display_time_millis(), 42);
        assert_eq!(article(None).display_time_millis(), 1_700_000_000_000);
    }

    #[test]
    fn all_category_has_no_identifier() {
        let all = Category::all();
        assert_eq!(all.id, None);
        assert_eq!(all.name, "All");
        assert_eq!(all.shortname, "");
        assert!(!all.is_events());
    }

    #[test]
    fn events_category_is_recognized_by_shortname() {
        let events: Category =
            serde_json::from_str(r#"{"_id":"E","name":"Events","shortname":"events"}"#)
                .expect("category");
        assert!(events.is_events());
    }

    #[test]
    fn local_timestamp_is_sortable_shape() {
        let formatted = format_local_timestamp(1_700_000_000_000);
        assert_eq!(formatted.len(), 19);
        let bytes = formatted.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert_eq!(bytes[10], b' ');
        assert_eq!(bytes[13], b':');
        assert_eq!(bytes[16], b':');
        assert!(formatted
            .chars()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7 | 10 | 13 | 16) || c.is_ascii_digit()));
    }
}
