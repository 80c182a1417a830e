//! Web researcher scraping a DuckDuckGo-style HTML search page

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::html::{paragraph_brief, result_links, resolve_result_url};
use crate::domain::{NormalizedQuery, Research, Researcher, Summarizer};
use crate::infrastructure::http_client::HttpClientTrait;

/// Settings for search scraping
#[derive(Debug, Clone, Deserialize)]
pub struct WebResearcherConfig {
    /// Search page URL; the query is sent as the `q` parameter
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Result links to follow
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Paragraphs taken from each result page
    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_search_url() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_max_paragraphs() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for WebResearcherConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            user_agent: default_user_agent(),
            max_results: default_max_results(),
            max_paragraphs: default_max_paragraphs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Researcher that scrapes search results, extracts paragraphs from each
/// result page and summarizes them
#[derive(Debug)]
pub struct WebResearcher<C: HttpClientTrait> {
    client: C,
    summarizer: Arc<dyn Summarizer>,
    config: WebResearcherConfig,
}

impl<C: HttpClientTrait> WebResearcher<C> {
    pub fn new(client: C, summarizer: Arc<dyn Summarizer>, config: WebResearcherConfig) -> Self {
        Self {
            client,
            summarizer,
            config,
        }
    }

    /// Fetch the search page and return resolved result URLs
    async fn search(&self, query: &NormalizedQuery) -> Result<Vec<String>, Research> {
        let search_url = Url::parse_with_params(&self.config.search_url, &[("q", query.as_str())])
            .map_err(|e| {
                warn!(url = %self.config.search_url, error = %e, "Invalid search URL");
                Research::SearchFailed
            })?;

        let page = match self.client.get_text(search_url.as_str()).await {
            Ok(page) if page.is_ok() => page,
            Ok(page) => {
                warn!(status = page.status, "Search page returned non-200 status");
                return Err(Research::SearchFailed);
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch search page");
                return Err(Research::SearchFailed);
            }
        };

        let urls: Vec<String> = result_links(&page.body, self.config.max_results)
            .iter()
            .filter_map(|href| resolve_result_url(href, &search_url))
            .collect();

        if urls.is_empty() {
            return Err(Research::NoResults);
        }

        Ok(urls)
    }

    /// Paragraph text of one result page, or `None` if it yields nothing
    async fn brief(&self, url: &str) -> Option<String> {
        let page = match self.client.get_text(url).await {
            Ok(page) if page.is_ok() => page,
            Ok(page) => {
                debug!(url, status = page.status, "Skipping result page");
                return None;
            }
            Err(e) => {
                warn!(url, error = %e, "Failed to fetch result page");
                return None;
            }
        };

        let brief = paragraph_brief(&page.body, self.config.max_paragraphs);
        (!brief.is_empty()).then_some(brief)
    }
}

#[async_trait]
impl<C: HttpClientTrait> Researcher for WebResearcher<C> {
    async fn research(&self, query: &NormalizedQuery) -> Research {
        let urls = match self.search(query).await {
            Ok(urls) => urls,
            Err(outcome) => return outcome,
        };

        let mut briefs = Vec::with_capacity(urls.len());
        for url in &urls {
            if let Some(brief) = self.brief(url).await {
                briefs.push(brief);
            }
        }

        info!(
            query = %query,
            results = urls.len(),
            briefs = briefs.len(),
            "Collected result pages"
        );

        if briefs.is_empty() {
            return Research::NoContent;
        }

        Research::Summary(self.summarizer.summarize(&briefs.join("\n")).await)
    }
}
