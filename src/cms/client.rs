//! HTTP client for the content source API

use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

use crate::cms::document::{Document, PagedResponse};
use crate::cms::error::{CmsError, Result};
use crate::config::SiteConfig;
use crate::content::{DetailData, SummaryData};

/// A network-backed content source client
///
/// Constructed from the site configuration and passed explicitly to every
/// entry point that needs it; there is no ambient client state.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_url: Url,
    kind: String,
    access_token: Option<String>,
}

impl CmsClient {
    /// Create a client from the site configuration
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Self::from_parts(
            &config.cms.api_url,
            &config.cms.document_kind,
            config.cms.access_token.as_deref(),
            Duration::from_secs(config.cms.timeout_secs),
        )
    }

    /// Create a client from explicit parts
    pub fn from_parts(
        api_url: &str,
        kind: &str,
        access_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        if api_url.is_empty() {
            return Err(CmsError::MissingApiUrl);
        }

        let api_url = Url::parse(api_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url,
            kind: kind.to_string(),
            access_token: access_token.map(|t| t.to_string()),
        })
    }

    /// The document kind this client queries
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Fetch the first page of post summaries for the configured kind
    pub async fn get_by_type(&self, page_size: usize) -> Result<PagedResponse<SummaryData>> {
        tracing::debug!(kind = %self.kind, page_size, "Listing documents by type");

        let mut url = self.join("documents")?;
        url.query_pairs_mut()
            .append_pair("type", &self.kind)
            .append_pair("page_size", &page_size.to_string());
        self.append_token(&mut url);

        self.fetch_page(url).await
    }

    /// Fetch a single document by its unique id
    pub async fn get_by_uid(&self, uid: &str) -> Result<Document<DetailData>> {
        tracing::debug!(kind = %self.kind, uid, "Getting document by uid");

        let mut url = self.join(&format!("documents/{}/{}", self.kind, uid))?;
        self.append_token(&mut url);

        let response = self.http.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CmsError::NotFound {
                kind: self.kind.clone(),
                uid: uid.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(CmsError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }

    /// Resolve a pagination cursor into the next page of results
    ///
    /// The cursor is an opaque URL handed back by the previous page; it is
    /// fetched with a plain GET and returns the same shape as `get_by_type`.
    pub async fn resolve(&self, cursor: &str) -> Result<PagedResponse<SummaryData>> {
        tracing::debug!(cursor, "Resolving pagination cursor");

        let url = Url::parse(cursor)?;
        self.fetch_page(url).await
    }

    async fn fetch_page(&self, url: Url) -> Result<PagedResponse<SummaryData>> {
        let response = self.http.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(CmsError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }

    fn join(&self, path: &str) -> Result<Url> {
        // Url::join drops the last path segment of a base without a
        // trailing slash, so build the path by hand.
        let mut url = self.api_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CmsError::MissingApiUrl)?;
            segments.pop_if_empty();
            for segment in path.split('/') {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    fn append_token(&self, url: &mut Url) {
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_body(next_page: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "page": 1,
            "total_pages": 2,
            "next_page": next_page,
            "results": [{
                "uid": "hello-world",
                "first_publication_date": "2021-03-15T19:25:28+00:00",
                "data": {
                    "title": "Hello world",
                    "subtitle": "An introduction",
                    "author": "Jane Roe"
                }
            }]
        })
    }

    async fn client_for(server: &MockServer) -> CmsClient {
        CmsClient::from_parts(
            &format!("{}/api/v2", server.uri()),
            "posts",
            None,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_by_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents"))
            .and(query_param("type", "posts"))
            .and(query_param("page_size", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(Some("next"))))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.get_by_type(5).await.unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].uid.as_deref(), Some("hello-world"));
        assert_eq!(page.results[0].data.title, "Hello world");
        assert_eq!(page.next_page.as_deref(), Some("next"));
    }

    #[tokio::test]
    async fn test_access_token_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents"))
            .and(query_param("access_token", "s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(None)))
            .expect(1)
            .mount(&server)
            .await;

        let client = CmsClient::from_parts(
            &format!("{}/api/v2", server.uri()),
            "posts",
            Some("s3cret"),
            Duration::from_secs(5),
        )
        .unwrap();
        client.get_by_type(5).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_by_uid_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/posts/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_by_uid("missing").await.unwrap_err();
        assert!(matches!(err, CmsError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(None)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let cursor = format!("{}/api/v2/documents?page=2", server.uri());
        let page = client.resolve(&cursor).await.unwrap();

        assert_eq!(page.results.len(), 1);
        assert!(page.next_page.is_none());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_by_type(5).await.unwrap_err();
        assert!(matches!(err, CmsError::Status { .. }));
    }

    #[test]
    fn test_missing_api_url() {
        let err = CmsClient::from_parts("", "posts", None, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, CmsError::MissingApiUrl));
    }
}
