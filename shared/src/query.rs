//! Construction of article queries for the remote collections API.
//!
//! The remote speaks a Feathers-style query dialect: `$limit`, per-field
//! `$sort` directions, equality or `$ne` on `categories`, and an optional
//! `$gt` lower bound on `datetime`. A query is built as a typed descriptor
//! and serialized to request pairs only at the HTTP boundary.

use chrono::{DateTime, Local, NaiveTime};

use crate::Category;

/// Fixed page size for every article fetch.
pub const ARTICLE_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire value: 1 ascending, -1 descending.
    pub fn as_param(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Sort directions for the two time fields, applied in order: `datetime`
/// first, `createdAt` as the tie break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub datetime: SortDirection,
    pub created_at: SortDirection,
}

impl SortSpec {
    /// Default feed order, most recent first.
    pub fn newest_first() -> Self {
        SortSpec {
            datetime: SortDirection::Descending,
            created_at: SortDirection::Descending,
        }
    }

    /// Upcoming-events order, soonest first.
    pub fn soonest_first() -> Self {
        SortSpec {
            datetime: SortDirection::Ascending,
            created_at: SortDirection::Ascending,
        }
    }
}

/// Filter on the `categories` field of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Articles carrying the category with this id.
    Is(String),
    /// Articles NOT carrying the category with this id.
    IsNot(String),
}

/// Typed descriptor of one article fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub limit: u32,
    pub sort: SortSpec,
    pub categories: Option<CategoryFilter>,
    /// Exclusive lower bound on `datetime`, epoch milliseconds.
    pub datetime_after: Option<i64>,
}

impl ArticleQuery {
    /// Serialize to Feathers REST query pairs. Values are raw; the HTTP
    /// layer percent-encodes them.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(5);
        pairs.push(("$limit".to_string(), self.limit.to_string()));
        pairs.push(("$sort[datetime]".to_string(), self.sort.datetime.as_param().to_string()));
        pairs.push((
            "$sort[createdAt]".to_string(),
            self.sort.created_at.as_param().to_string(),
        ));
        match &self.categories {
            Some(CategoryFilter::Is(id)) => {
                pairs.push(("categories".to_string(), id.clone()));
            },
            Some(CategoryFilter::IsNot(id)) => {
                pairs.push(("categories[$ne]".to_string(), id.clone()));
            },
            None => {},
        }
        if let Some(after) = self.datetime_after {
            pairs.push(("datetime[$gt]".to_string(), after.to_string()));
        }
        pairs
    }
}

/// Build the query for one article fetch.
///
/// With no usable selection (no category, an empty shortname, or a category
/// without an id, which is the synthetic "All" entry) the default feed is
/// requested: event posts excluded, newest first. The exclusion needs the
/// events category's id; when `all` contains no events category the filter
/// is simply omitted rather than failing.
///
/// An explicit selection filters on the category id. Selecting the events
/// category additionally restricts to events from local midnight of `now`
/// onward and flips the sort to soonest-first.
pub fn build_article_query(
    selected: Option<&Category>,
    all: &[Category],
    now: &DateTime<Local>,
) -> ArticleQuery {
    let mut query = ArticleQuery {
        limit: ARTICLE_LIMIT,
        sort: SortSpec::newest_first(),
        categories: None,
        datetime_after: None,
    };

    match selected {
        Some(category) if !category.shortname.is_empty() && category.id.is_some() => {
            query.categories = category.id.clone().map(CategoryFilter::Is);
            if category.is_events() {
                query.datetime_after = Some(start_of_day_millis(now));
                query.sort = SortSpec::soonest_first();
            }
        },
        _ => {
            // Last match wins, as with the remote's own duplicate handling.
            let events_id = all
                .iter()
                .filter(|category| category.is_events())
                .next_back()
                .and_then(|category| category.id.clone());
            query.categories = events_id.map(CategoryFilter::IsNot);
        },
    }

    query
}

/// Local midnight of the day containing `now`, epoch milliseconds. Falls
/// back to `now` itself when midnight does not exist locally (DST gap).
pub fn start_of_day_millis(now: &DateTime<Local>) -> i64 {
    now.with_time(NaiveTime::MIN)
        .earliest()
        .unwrap_or(*now)
        .timestamp_millis()
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::{
        build_article_query, start_of_day_millis, ArticleQuery, CategoryFilter, SortDirection,
        SortSpec, ARTICLE_LIMIT,
    };
    use crate::Category;

    fn category(id: &str, shortname: &str) -> Category {
        Category {
            id: Some(id.to_string()),
            name: shortname.to_string(),
            shortname: shortname.to_string(),
        }
    }

    fn sample_categories() -> Vec<Category> {
        vec![Category::all(), category("E", "events"), category("N", "news")]
    }

    fn now() -> chrono::DateTime<Local> {
        Local.timestamp_millis_opt(1_700_000_000_000).single().expect("local time")
    }

    #[test]
    fn no_selection_excludes_events_and_sorts_newest_first() {
        let query = build_article_query(None, &sample_categories(), &now());
        assert_eq!(query.limit, ARTICLE_LIMIT);
        assert_eq!(query.categories, Some(CategoryFilter::IsNot("E".to_string())));
        assert_eq!(query.sort, SortSpec::newest_first());
        assert_eq!(query.datetime_after, None);
    }

    #[test]
    fn all_pseudo_category_behaves_like_no_selection() {
        let categories = sample_categories();
        let query = build_article_query(Some(&categories[0]), &categories, &now());
        assert_eq!(query.categories, Some(CategoryFilter::IsNot("E".to_string())));
        assert_eq!(query.datetime_after, None);
    }

    #[test]
    fn missing_events_category_degrades_to_no_exclusion() {
        let categories = vec![Category::all(), category("N", "news")];
        let query = build_article_query(None, &categories, &now());
        assert_eq!(query.categories, None);
        assert_eq!(query.sort, SortSpec::newest_first());
    }

    #[test]
    fn selecting_news_filters_by_id_and_keeps_descending_sort() {
        let categories = sample_categories();
        let query = build_article_query(Some(&categories[2]), &categories, &now());
        assert_eq!(query.categories, Some(CategoryFilter::Is("N".to_string())));
        assert_eq!(query.sort, SortSpec::newest_first());
        assert_eq!(query.datetime_after, None);
    }

    #[test]
    fn selecting_events_bounds_time_and_flips_sort() {
        let categories = sample_categories();
        let at = now();
        let query = build_article_query(Some(&categories[1]), &categories, &at);
        assert_eq!(query.categories, Some(CategoryFilter::Is("E".to_string())));
        assert_eq!(query.sort, SortSpec::soonest_first());
        assert_eq!(query.datetime_after, Some(start_of_day_millis(&at)));
    }

    #[test]
    fn selection_without_id_falls_back_to_default_feed() {
        let unsynced = Category {
            id: None,
            name: "News".to_string(),
            shortname: "news".to_string(),
        };
        let query = build_article_query(Some(&unsynced), &sample_categories(), &now());
        assert_eq!(query.categories, Some(CategoryFilter::IsNot("E".to_string())));
    }

    #[test]
    fn duplicate_events_categories_use_the_last_one() {
        let categories = vec![category("E1", "events"), category("E2", "events")];
        let query = build_article_query(None, &categories, &now());
        assert_eq!(query.categories, Some(CategoryFilter::IsNot("E2".to_string())));
    }

    #[test]
    fn start_of_day_is_at_most_now_and_within_a_day() {
        let at = now();
        let start = start_of_day_millis(&at);
        let now_millis = at.timestamp_millis();
        assert!(start <= now_millis);
        assert!(now_millis - start < 24 * 60 * 60 * 1000 + 60 * 60 * 1000);
    }

    #[test]
    fn sort_directions_use_feathers_wire_values() {
        assert_eq!(SortDirection::Ascending.as_param(), 1);
        assert_eq!(SortDirection::Descending.as_param(), -1);
    }

    #[test]
    fn default_query_serializes_to_expected_pairs() {
        let query = build_article_query(None, &sample_categories(), &now());
        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("$limit".to_string(), "50".to_string()),
                ("$sort[datetime]".to_string(), "-1".to_string()),
                ("$sort[createdAt]".to_string(), "-1".to_string()),
                ("categories[$ne]".to_string(), "E".to_string()),
            ]
        );
    }

    #[test]
    fn events_query_serializes_bound_and_ascending_sort() {
        let categories = sample_categories();
        let at = now();
        let pairs = build_article_query(Some(&categories[1]), &categories, &at).to_query_pairs();
        assert_eq!(pairs[1], ("$sort[datetime]".to_string(), "1".to_string()));
        assert_eq!(pairs[2], ("$sort[createdAt]".to_string(), "1".to_string()));
        assert_eq!(pairs[3], ("categories".to_string(), "E".to_string()));
        assert_eq!(
            pairs[4],
            ("datetime[$gt]".to_string(), start_of_day_millis(&at).to_string())
        );
    }

    #[test]
    fn no_filter_query_omits_category_pair() {
        let query = ArticleQuery {
            limit: ARTICLE_LIMIT,
            sort: SortSpec::newest_first(),
            categories: None,
            datetime_after: None,
        };
        assert_eq!(query.to_query_pairs().len(), 3);
    }
}
