//! Generator module - renders the listing and post pages to static HTML

use anyhow::{Context as _, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fs;
use std::path::PathBuf;

use tera::Context;

use crate::cms::CmsClient;
use crate::content::{PostDetail, PostSummary};
use crate::helpers::{format_publication_date, html_escape};
use crate::listing::Listing;
use crate::templates::{
    ListingItem, PostView, SectionView, SiteData, TemplateRenderer, LOGO_SVG, STYLE_CSS,
};
use crate::Orbit;

/// Page size used when walking the cursor chain to enumerate every post
const ENUMERATION_PAGE_SIZE: usize = 100;

/// Characters escaped inside a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'/');

/// Static site generator using the embedded Tera templates
pub struct Generator {
    orbit: Orbit,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(orbit: &Orbit) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            orbit: orbit.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    ///
    /// A CMS failure here is fatal: a page whose data cannot be fetched is
    /// not generated, and the whole run aborts with context.
    pub async fn generate(&self, client: &CmsClient) -> Result<()> {
        fs::create_dir_all(&self.orbit.public_dir)?;
        self.write_assets()?;

        // Listing page: first page of summaries plus its cursor.
        let first_page = client
            .get_by_type(self.orbit.config.per_page)
            .await
            .context("fetching the first page of posts")?;
        let listing = Listing::new(first_page);

        let index_html = self.render_index(&listing)?;
        fs::write(self.orbit.public_dir.join("index.html"), index_html)?;

        // Post pages: enumerate every known uid by walking the cursor
        // chain, then pre-render one page per uid. Uids unknown here are
        // still served on demand by the dev server.
        let mut all_posts = Listing::new(
            client
                .get_by_type(ENUMERATION_PAGE_SIZE)
                .await
                .context("enumerating posts")?,
        );
        all_posts
            .load_all(client)
            .await
            .context("enumerating posts")?;

        tracing::info!("Rendering {} post pages", all_posts.posts().len());

        for uid in all_posts.uids().filter(|uid| !uid.is_empty()) {
            let document = client
                .get_by_uid(uid)
                .await
                .with_context(|| format!("fetching post {}", uid))?;
            let detail = PostDetail::from(document);

            let html = self.render_post(&detail)?;
            self.write_post(uid, &html)?;
        }

        Ok(())
    }

    /// Render the listing page
    pub fn render_index(&self, listing: &Listing) -> Result<String> {
        let items: Vec<ListingItem> = listing
            .posts()
            .iter()
            .map(|post| self.listing_item(post))
            .collect();

        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context.insert("posts", &items);
        context.insert("next_page", &listing.next_page().unwrap_or(""));

        self.renderer.render("index.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, detail: &PostDetail) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context.insert("post", &self.post_view(detail));

        self.renderer.render("post.html", &context)
    }

    /// Write a rendered post page under `post/{uid}/index.html`
    pub fn write_post(&self, uid: &str, html: &str) -> Result<PathBuf> {
        let dir = self.orbit.public_dir.join("post").join(uid);
        fs::create_dir_all(&dir)?;
        let path = dir.join("index.html");
        fs::write(&path, html)?;
        Ok(path)
    }

    /// Build the listing-page view of a post summary
    pub fn listing_item(&self, post: &PostSummary) -> ListingItem {
        let language = &self.orbit.config.language;
        ListingItem {
            uid: post.uid.clone(),
            url: self.post_url(&post.uid),
            title: html_escape(&post.title),
            subtitle: html_escape(&post.subtitle),
            author: html_escape(&post.author),
            date: format_publication_date(post.first_publication_date.as_ref(), language),
        }
    }

    /// Build the page view of a post detail
    pub fn post_view(&self, detail: &PostDetail) -> PostView {
        let config = &self.orbit.config;
        let sections = detail
            .content
            .iter()
            .map(|section| SectionView {
                heading: html_escape(&section.heading),
                body_html: section
                    .body
                    .iter()
                    .map(|block| block.render_html())
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect();

        PostView {
            title: html_escape(&detail.title),
            banner_url: html_escape(&detail.banner_url),
            author: html_escape(&detail.author),
            date: format_publication_date(detail.first_publication_date.as_ref(), &config.language),
            reading_time: detail.reading_time(config.words_per_minute),
            sections,
        }
    }

    fn site_data(&self) -> SiteData {
        let config = &self.orbit.config;
        SiteData {
            title: html_escape(&config.title),
            subtitle: html_escape(&config.subtitle),
            description: html_escape(&config.description),
            author: html_escape(&config.author),
            language: config.language.clone(),
            root: config.root.clone(),
        }
    }

    fn post_url(&self, uid: &str) -> String {
        format!(
            "{}post/{}/",
            self.orbit.config.root,
            utf8_percent_encode(uid, PATH_SEGMENT)
        )
    }

    fn write_assets(&self) -> Result<()> {
        fs::write(self.orbit.public_dir.join("logo.svg"), LOGO_SVG)?;
        fs::write(self.orbit.public_dir.join("style.css"), STYLE_CSS)?;
        Ok(())
    }
}
