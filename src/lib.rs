//! orbit: a static blog generator backed by a headless CMS
//!
//! This crate builds a blog front-end from documents stored in a headless
//! content-management API: a paginated listing page and one pre-rendered
//! page per post, using embedded Tera templates.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main Orbit application
#[derive(Clone)]
pub struct Orbit {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Orbit {
    /// Create a new Orbit instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env_overrides();

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Build a CMS client from the site configuration
    pub fn cms_client(&self) -> Result<cms::CmsClient> {
        Ok(cms::CmsClient::new(&self.config)?)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
