//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Environment variable that overrides the configured CMS access token
pub const TOKEN_ENV_VAR: &str = "ORBIT_API_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    // Content source
    pub cms: CmsConfig,

    // Listing
    /// Number of post summaries per listing page
    pub per_page: usize,

    // Reading time
    /// Average adult reading speed used for the reading-time estimate
    pub words_per_minute: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Content source (headless CMS) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the CMS REST API
    pub api_url: String,
    /// Document kind queried for posts
    pub document_kind: String,
    /// Access token, sent as a query parameter (overridable via ORBIT_API_TOKEN)
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Orbit".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            cms: CmsConfig::default(),

            per_page: 5,

            words_per_minute: 200,

            extra: HashMap::new(),
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            document_kind: "posts".to_string(),
            access_token: None,
            timeout_secs: 30,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment variable overrides (access token)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                self.cms.access_token = Some(token);
            }
        }
    }
}
