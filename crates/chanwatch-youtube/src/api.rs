//! YouTube Data API search client

use chanwatch_core::{ApiError, get_json};
use serde::Deserialize;

use crate::window::TimeWindow;

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest `maxResults` the search endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 50;

/// One `search.list` call: channels published inside a window, one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub published_after: String,
    pub published_before: String,
    pub page_size: u32,
    pub page_token: Option<String>,
}

impl SearchRequest {
    pub fn new(window: &TimeWindow, page_size: u32, page_token: Option<String>) -> Self {
        Self {
            published_after: window.start.clone(),
            published_before: window.end.clone(),
            page_size,
            page_token,
        }
    }

    /// Query parameters, without the API key
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", "id".to_string()),
            ("type", "channel".to_string()),
            ("q", String::new()),
            ("order", "relevance".to_string()),
            ("maxResults", self.page_size.to_string()),
            ("publishedAfter", self.published_after.clone()),
            ("publishedBefore", self.published_before.clone()),
        ];
        if let Some(token) = &self.page_token {
            params.push(("pageToken", token.clone()));
        }
        params
    }
}

/// `search.list` response, reduced to the fields we consume
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: ResourceId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: Option<String>,
    pub channel_id: Option<String>,
}

impl SearchPage {
    /// Continuation token, treating an empty string as absent
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Anything that can answer a search page request.
pub trait SearchSource {
    fn search(&mut self, request: &SearchRequest) -> Result<SearchPage, ApiError>;
}

/// Live client authenticated with a static API key
pub struct YouTubeClient {
    search_url: String,
    api_key: String,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("search_url", &self.search_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            search_url: format!("{}/search", api_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }
}

impl SearchSource for YouTubeClient {
    fn search(&mut self, request: &SearchRequest) -> Result<SearchPage, ApiError> {
        let params = request.query();
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("key", self.api_key.as_str()));
        get_json(&self.search_url, &query)
    }
}
