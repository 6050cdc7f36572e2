// 重新导出 shared crate 的数据模型
pub use news_flow_shared::{Article, Category};

#[cfg(feature = "mock")]
use news_flow_shared::{
    query::{ArticleQuery, CategoryFilter, SortDirection},
    ArticleTitle, EVENTS_SHORTNAME,
};

// =============== Mock 数据 ===============

/// Fixture categories: the events category plus two ordinary ones.
#[cfg(feature = "mock")]
pub fn mock_categories() -> Vec<Category> {
    vec![
        Category {
            id: Some("cat-events".to_string()),
            name: "Events".to_string(),
            shortname: EVENTS_SHORTNAME.to_string(),
        },
        Category {
            id: Some("cat-news".to_string()),
            name: "Local news".to_string(),
            shortname: "news".to_string(),
        },
        Category {
            id: Some("cat-culture".to_string()),
            name: "Culture".to_string(),
            shortname: "culture".to_string(),
        },
    ]
}

// 内部函数：构建 12 篇混合文章（新闻 / 文化 / 活动）
#[cfg(feature = "mock")]
fn mock_articles_full() -> Vec<Article> {
    let categories = mock_categories();
    let now_millis = chrono::Local::now().timestamp_millis();
    let hour = 60 * 60 * 1000;

    let mut items: Vec<Article> = Vec::new();
    for i in 1..=12_i64 {
        // Every third article is an upcoming event; the rest alternate
        // between the two ordinary categories.
        let category = if i % 3 == 0 {
            categories[0].clone()
        } else if i % 2 == 0 {
            categories[1].clone()
        } else {
            categories[2].clone()
        };
        let is_event = category.shortname == EVENTS_SHORTNAME;

        // Mix plain and structured titles, as the remote does.
        let title = if i % 2 == 0 {
            ArticleTitle::Structured {
                text: format!("Sample article {i} - {}", category.name),
            }
        } else {
            ArticleTitle::Plain(format!("Sample article {i} - {}", category.name))
        };

        items.push(Article {
            id: format!("post-{i:03}"),
            title,
            link: format!("https://example.org/posts/{i}"),
            datetime: is_event.then_some(now_millis + i * 6 * hour),
            created_at: now_millis - i * 24 * hour,
            categories: vec![category],
        });
    }

    items
}

/// Answer an article query from the fixtures the way the remote would:
/// filter, sort, truncate to the page limit.
#[cfg(feature = "mock")]
pub fn mock_find_articles(query: &ArticleQuery) -> Vec<Article> {
    let mut articles: Vec<Article> = mock_articles_full()
        .into_iter()
        .filter(|article| match &query.categories {
            Some(CategoryFilter::Is(id)) => {
                article.categories.iter().any(|c| c.id.as_deref() == Some(id.as_str()))
            },
            Some(CategoryFilter::IsNot(id)) => {
                !article.categories.iter().any(|c| c.id.as_deref() == Some(id.as_str()))
            },
            None => true,
        })
        .filter(|article| match query.datetime_after {
            // A $gt bound never matches articles without the field.
            Some(after) => article.datetime.is_some_and(|datetime| datetime > after),
            None => true,
        })
        .collect();

    articles.sort_by(|a, b| {
        let primary = match query.sort.datetime {
            SortDirection::Ascending => a.datetime.cmp(&b.datetime),
            SortDirection::Descending => b.datetime.cmp(&a.datetime),
        };
        primary.then_with(|| match query.sort.created_at {
            SortDirection::Ascending => a.created_at.cmp(&b.created_at),
            SortDirection::Descending => b.created_at.cmp(&a.created_at),
        })
    });
    articles.truncate(query.limit as usize);

    articles
}
