//! CMS client errors

use thiserror::Error;

/// Errors raised while talking to the content source
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("CMS api_url is not configured")]
    MissingApiUrl,

    #[error("invalid CMS URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("document not found: {kind}/{uid}")]
    NotFound { kind: String, uid: String },
}

pub type Result<T> = std::result::Result<T, CmsError>;
