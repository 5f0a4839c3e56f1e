//! Post listing
//!
//! Ordered accumulation of post summaries plus the pagination cursor.
//! Pages append in arrival order, never reordering or de-duplicating
//! what is already there. Each cursor can be consumed exactly once, so a
//! repeated `load_more` for the same cursor is a no-op instead of a
//! duplicate append.

use std::collections::HashSet;

use crate::cms::{CmsClient, PagedResponse, Result};
use crate::content::{PostSummary, SummaryData};

/// An accumulating, paginated listing of post summaries
#[derive(Debug, Default)]
pub struct Listing {
    posts: Vec<PostSummary>,
    next_page: Option<String>,
    consumed: HashSet<String>,
}

impl Listing {
    /// Create a listing from an already-fetched first page
    pub fn new(first_page: PagedResponse<SummaryData>) -> Self {
        let mut listing = Self::default();
        listing.append(first_page);
        listing
    }

    /// The accumulated summaries, in arrival order
    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// The current pagination cursor, if any
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Whether a further page can be loaded
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Resolve the stored cursor and append the resulting page
    ///
    /// Returns the number of summaries appended. Without a cursor, or with
    /// a cursor that was already consumed, this is a no-op returning 0.
    pub async fn load_more(&mut self, client: &CmsClient) -> Result<usize> {
        let Some(cursor) = self.next_page.clone() else {
            return Ok(0);
        };
        if self.consumed.contains(&cursor) {
            tracing::debug!(cursor, "Cursor already consumed, skipping");
            return Ok(0);
        }

        let page = client.resolve(&cursor).await?;
        self.consumed.insert(cursor);

        Ok(self.append(page))
    }

    /// Walk the cursor chain until exhausted
    pub async fn load_all(&mut self, client: &CmsClient) -> Result<()> {
        while self.has_more() {
            let appended = self.load_more(client).await?;
            if appended == 0 && self.has_more() {
                // A page that appends nothing but still advertises a next
                // cursor would loop forever on a misbehaving CMS.
                tracing::warn!("Empty page with a next cursor, stopping pagination");
                break;
            }
        }
        Ok(())
    }

    /// The uids of every accumulated post
    pub fn uids(&self) -> impl Iterator<Item = &str> {
        self.posts.iter().map(|p| p.uid.as_str())
    }

    fn append(&mut self, page: PagedResponse<SummaryData>) -> usize {
        let appended = page.results.len();
        self.posts
            .extend(page.results.into_iter().map(PostSummary::from));
        self.next_page = page.next_page;
        appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::Document;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summary_doc(uid: &str) -> Document<SummaryData> {
        Document {
            uid: Some(uid.to_string()),
            first_publication_date: None,
            data: SummaryData {
                title: format!("Post {}", uid),
                subtitle: String::new(),
                author: "Jane Roe".to_string(),
            },
        }
    }

    fn page(uids: &[&str], next_page: Option<&str>) -> PagedResponse<SummaryData> {
        PagedResponse {
            page: 1,
            total_pages: 1,
            results: uids.iter().map(|uid| summary_doc(uid)).collect(),
            next_page: next_page.map(|s| s.to_string()),
        }
    }

    async fn test_client(server: &MockServer) -> CmsClient {
        CmsClient::from_parts(
            &format!("{}/api/v2", server.uri()),
            "posts",
            None,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn page_json(uids: &[&str], next_page: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "results": uids.iter().map(|uid| serde_json::json!({
                "uid": uid,
                "data": {"title": format!("Post {}", uid), "subtitle": "", "author": "Jane Roe"}
            })).collect::<Vec<_>>(),
            "next_page": next_page,
        })
    }

    #[test]
    fn test_first_page_sets_posts_and_cursor() {
        let listing = Listing::new(page(&["a", "b"], Some("cursor-2")));
        assert_eq!(listing.posts().len(), 2);
        assert_eq!(listing.next_page(), Some("cursor-2"));
        assert!(listing.has_more());
    }

    #[test]
    fn test_empty_cursor_means_no_more() {
        let listing = Listing::new(page(&["a"], None));
        assert!(!listing.has_more());
    }

    #[tokio::test]
    async fn test_load_more_appends_preserving_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["c", "d"], None)))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let cursor = format!("{}/api/v2/documents?page=2", server.uri());
        let mut listing = Listing::new(page(&["a", "b"], Some(cursor.as_str())));

        let appended = listing.load_more(&client).await.unwrap();

        assert_eq!(appended, 2);
        let uids: Vec<_> = listing.uids().collect();
        assert_eq!(uids, vec!["a", "b", "c", "d"]);
        assert!(!listing.has_more());
    }

    #[tokio::test]
    async fn test_load_more_without_cursor_is_noop() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        let mut listing = Listing::new(page(&["a"], None));
        assert_eq!(listing.load_more(&client).await.unwrap(), 0);
        assert_eq!(listing.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_consumed_cursor_is_not_fetched_twice() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(&["c"], Some("https://stale.example/cursor"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let cursor = format!("{}/api/v2/documents?page=2", server.uri());
        let mut listing = Listing::new(page(&["a"], Some(cursor.as_str())));

        assert_eq!(listing.load_more(&client).await.unwrap(), 1);

        // Simulate the race: the CMS hands back a cursor we already used.
        listing.next_page = Some(cursor);
        assert_eq!(listing.load_more(&client).await.unwrap(), 0);
        assert_eq!(listing.posts().len(), 2);
    }

    #[tokio::test]
    async fn test_load_all_walks_to_exhaustion() {
        let server = MockServer::start().await;
        let cursor2 = format!("{}/api/v2/documents?page=2", server.uri());
        let cursor3 = format!("{}/api/v2/documents?page=3", server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v2/documents"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page_json(&["b"], Some(cursor3.as_str()))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["c"], None)))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let mut listing = Listing::new(page(&["a"], Some(cursor2.as_str())));
        listing.load_all(&client).await.unwrap();

        let uids: Vec<_> = listing.uids().collect();
        assert_eq!(uids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_load_more_propagates_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let cursor = format!("{}/api/v2/documents?page=2", server.uri());
        let mut listing = Listing::new(page(&["a"], Some(cursor.as_str())));

        assert!(listing.load_more(&client).await.is_err());
        // A failed fetch leaves the listing untouched and retryable.
        assert_eq!(listing.posts().len(), 1);
        assert!(listing.has_more());
    }
}
