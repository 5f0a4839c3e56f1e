//! Development server
//!
//! Serves the generated site, resolves pagination cursors for the listing
//! page's load-more control, and renders posts that were not known at
//! build time on demand.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::cms::{CmsClient, CmsError};
use crate::content::{PostDetail, PostSummary};
use crate::generator::Generator;
use crate::helpers::format_publication_date;
use crate::Orbit;

/// Server state
struct ServerState {
    orbit: Orbit,
    generator: Generator,
    /// CMS client; absent in static mode, which disables the pagination
    /// proxy and fallback rendering
    client: Option<CmsClient>,
}

/// Start the development server
pub async fn start(orbit: &Orbit, ip: &str, port: u16, dynamic: bool, open: bool) -> Result<()> {
    let client = if dynamic {
        Some(orbit.cms_client()?)
    } else {
        None
    };

    let state = Arc::new(ServerState {
        orbit: orbit.clone(),
        generator: Generator::new(orbit)?,
        client,
    });

    let app = Router::new()
        .route("/api/page", get(page_handler))
        .fallback(fallback_handler)
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    cursor: String,
}

/// One post summary in a pagination proxy response
///
/// Text fields are raw (the listing script inserts them as text, not
/// HTML); the date is pre-formatted server-side.
#[derive(Debug, Serialize)]
struct PageItem {
    uid: String,
    title: String,
    subtitle: String,
    author: String,
    date: String,
}

#[derive(Debug, Serialize)]
struct PageResponse {
    results: Vec<PageItem>,
    next_page: Option<String>,
}

#[derive(Debug, Serialize)]
struct PageError {
    error: String,
}

/// Resolve a pagination cursor on behalf of the listing page
async fn page_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(client) = &state.client else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    if query.cursor.is_empty() {
        let error = PageError {
            error: "missing cursor".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    match client.resolve(&query.cursor).await {
        Ok(page) => {
            let language = &state.orbit.config.language;
            let results = page
                .results
                .into_iter()
                .map(PostSummary::from)
                .map(|post| PageItem {
                    date: format_publication_date(
                        post.first_publication_date.as_ref(),
                        language,
                    ),
                    uid: post.uid,
                    title: post.title,
                    subtitle: post.subtitle,
                    author: post.author,
                })
                .collect();

            Json(PageResponse {
                results,
                next_page: page.next_page,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!("Cursor resolution failed: {}", e);
            let error = PageError {
                error: e.to_string(),
            };
            (StatusCode::BAD_GATEWAY, Json(error)).into_response()
        }
    }
}

/// Serve generated files, rendering unknown posts on demand
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    // Fallback path: a post page that was not pre-rendered.
    if let Some(uid) = post_uid_from_path(&path) {
        let page_path = state
            .orbit
            .public_dir
            .join("post")
            .join(&uid)
            .join("index.html");

        if !page_path.exists() {
            if let Some(client) = &state.client {
                tracing::info!("Rendering {} on demand", uid);
                match client.get_by_uid(&uid).await {
                    Ok(document) => {
                        let detail = PostDetail::from(document);
                        if let Err(e) = render_on_demand(&state, &uid, &detail) {
                            tracing::error!("On-demand render of {} failed: {}", uid, e);
                            return (StatusCode::INTERNAL_SERVER_ERROR, "Render error")
                                .into_response();
                        }
                    }
                    Err(CmsError::NotFound { .. }) => {
                        return (StatusCode::NOT_FOUND, "Not found").into_response();
                    }
                    Err(e) => {
                        tracing::error!("On-demand fetch of {} failed: {}", uid, e);
                        return (StatusCode::BAD_GATEWAY, "CMS unavailable").into_response();
                    }
                }
            }
        }
    }

    // Serve static files using tower-http
    let mut service =
        ServeDir::new(&state.orbit.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Render and write a post page that was missing from the build
fn render_on_demand(state: &Arc<ServerState>, uid: &str, detail: &PostDetail) -> Result<()> {
    let html = state.generator.render_post(detail)?;
    state.generator.write_post(uid, &html)?;
    Ok(())
}

/// Extract the post uid from a `/post/{uid}` or `/post/{uid}/` path
fn post_uid_from_path(path: &str) -> Option<String> {
    let rest = path.strip_prefix("/post/")?;
    let uid = rest.trim_end_matches('/');
    if uid.is_empty() || uid.contains('/') {
        return None;
    }
    percent_decode_str(uid)
        .decode_utf8()
        .ok()
        .map(|s| s.to_string())
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
