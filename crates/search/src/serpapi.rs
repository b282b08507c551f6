use std::time::Duration;

use scout_core::SearchHit;
use serde::Deserialize;

use crate::error::SearchError;

const SERPAPI_BASE_URL: &str = "https://serpapi.com";

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

/// Client for the SerpAPI Google engine.
pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for SerpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SerpApiClient {
    /// Creates a client with the default SerpAPI endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, timeout_secs: u64) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, SERPAPI_BASE_URL.to_owned(), timeout_secs)
    }

    /// Creates a client against a custom endpoint. Tests point this at a
    /// local mock server.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SearchError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Run a Google search and map organic results into canonical hits,
    /// truncated to `max_results`. Missing provider fields become empty
    /// strings rather than dropped hits.
    ///
    /// # Errors
    /// Returns an error if the request fails, the provider returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("num", &max_results.to_string()),
                ("api_key", &self.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::HttpStatus { code: status.as_u16(), body });
        }

        let parsed: SerpApiResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::JsonParse {
                context: "serpapi search response".to_owned(),
                source: e,
            })?;

        let hits = parsed
            .organic_results
            .into_iter()
            .take(max_results as usize)
            .map(|r| SearchHit {
                title: r.title.unwrap_or_default(),
                snippet: r.snippet.unwrap_or_default(),
                url: r.link.unwrap_or_default(),
            })
            .collect();
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> SerpApiClient {
        SerpApiClient::with_base_url("serp-key".to_owned(), server.uri(), 5)
            .expect("client builds")
    }

    #[tokio::test]
    async fn test_maps_provider_fields_into_canonical_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("engine", "google"))
            .and(query_param("q", "quantum batteries"))
            .and(query_param("api_key", "serp-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organic_results": [
                    {"title": "Quantum batteries", "snippet": "An overview", "link": "https://example.com/qb"},
                    {"title": "Charging dynamics", "link": "https://example.com/cd"}
                ]
            })))
            .mount(&server)
            .await;

        let hits = test_client(&server).search("quantum batteries", 5).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Quantum batteries");
        assert_eq!(hits[0].snippet, "An overview");
        assert_eq!(hits[0].url, "https://example.com/qb");
        // missing snippet becomes an empty string, not a dropped hit
        assert_eq!(hits[1].snippet, "");
    }

    #[tokio::test]
    async fn test_truncates_to_max_results() {
        let server = MockServer::start().await;
        let results: Vec<serde_json::Value> = (1..=6)
            .map(|i| {
                serde_json::json!({
                    "title": format!("r{i}"),
                    "snippet": "s",
                    "link": format!("https://example.com/{i}")
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"organic_results": results})),
            )
            .mount(&server)
            .await;

        let hits = test_client(&server).search("anything", 3).await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let err = test_client(&server).search("anything", 3).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_missing_organic_results_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let hits = test_client(&server).search("anything", 3).await.unwrap();
        assert!(hits.is_empty());
    }
}
