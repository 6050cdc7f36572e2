#[cfg(not(feature = "mock"))]
use gloo_net::http::Request;
use news_flow_shared::query::ArticleQuery;
use news_flow_shared::{Article, Category};
#[cfg(not(feature = "mock"))]
use serde::Deserialize;

#[cfg(feature = "mock")]
use crate::models;

// API base URL - 编译时从环境变量读取，默认本地 Feathers 服务地址
#[cfg(not(feature = "mock"))]
pub const API_BASE: &str = match option_env!("NEWSFLOW_API_BASE") {
    Some(url) => url,
    None => "http://localhost:3030",
};

// Feathers 分页响应包装
#[cfg(not(feature = "mock"))]
#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    data: Vec<Article>,
    #[allow(dead_code)]
    total: usize,
    #[allow(dead_code)]
    limit: usize,
    #[allow(dead_code)]
    skip: usize,
}

/// Fetch one page of articles matching the query descriptor.
pub async fn fetch_articles(query: &ArticleQuery) -> Result<Vec<Article>, String> {
    #[cfg(feature = "mock")]
    {
        return Ok(models::mock_find_articles(query));
    }

    #[cfg(not(feature = "mock"))]
    {
        let mut url = format!("{}/articles", API_BASE);
        let params: Vec<String> = query
            .to_query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        let json_response: ArticlesResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))?;

        Ok(json_response.data)
    }
}

/// Fetch all categories. The categories service is not paginated and
/// returns a plain array.
pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    #[cfg(feature = "mock")]
    {
        return Ok(models::mock_categories());
    }

    #[cfg(not(feature = "mock"))]
    {
        let url = format!("{}/categories", API_BASE);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json::<Vec<Category>>()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))
    }
}
