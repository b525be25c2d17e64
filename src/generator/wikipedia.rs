use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::FetchError;
use crate::generator::ExtractSource;
use crate::generator::fetch::HttpClient;

pub const DEFAULT_API_URL: &str = "https://ar.wikipedia.org/w/api.php";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    extract: Option<String>,
}

/// Plain-text extracts of random main-namespace articles from a MediaWiki
/// API endpoint.
pub struct WikipediaSource {
    client: HttpClient,
    url: String,
}

impl WikipediaSource {
    pub fn new(api_url: &str, extract_chars: usize, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: HttpClient::new(timeout)?,
            url: random_extract_url(api_url, extract_chars),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ExtractSource for WikipediaSource {
    fn fetch_extract(&mut self) -> Result<String, FetchError> {
        let body = self.client.get_text(&self.url)?;
        parse_extract(&body)
    }
}

pub fn random_extract_url(api_url: &str, extract_chars: usize) -> String {
    format!(
        "{api_url}?action=query&format=json&generator=random&grnnamespace=0\
         &prop=extracts&exchars={extract_chars}&explaintext=1"
    )
}

/// Pulls the extract of the first returned page out of an API response body.
pub fn parse_extract(body: &str) -> Result<String, FetchError> {
    let response: ApiResponse = serde_json::from_str(body)?;
    response
        .query
        .and_then(|q| q.pages.into_values().find_map(|page| page.extract))
        .ok_or(FetchError::NoPages)
}
