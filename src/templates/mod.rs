//! Built-in theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; the rendered pages
//! receive pre-formatted, pre-escaped data built by the generator.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Embedded logo asset, written to the public directory at generate time
pub const LOGO_SVG: &str = include_str!("orbit/logo.svg");

/// Embedded stylesheet
pub const STYLE_CSS: &str = include_str!("orbit/style.css");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping is off: the generator escapes user-facing strings
        // and body HTML is already rendered/escaped block by block.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("orbit/layout.html")),
            ("index.html", include_str!("orbit/index.html")),
            ("post.html", include_str!("orbit/post.html")),
            (
                "partials/header.html",
                include_str!("orbit/partials/header.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Site-wide data available to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
}

/// One post summary as rendered on the listing page
#[derive(Debug, Clone, Serialize)]
pub struct ListingItem {
    pub uid: String,
    pub url: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

/// One content section as rendered on a post page
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub heading: String,
    pub body_html: String,
}

/// A full post as rendered on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub date: String,
    pub reading_time: usize,
    pub sections: Vec<SectionView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_loads_all_templates() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_index_renders_load_more_only_with_cursor() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: "Blog".to_string(),
                subtitle: String::new(),
                description: String::new(),
                author: "Jane Roe".to_string(),
                language: "en".to_string(),
                root: "/".to_string(),
            },
        );
        context.insert("posts", &Vec::<ListingItem>::new());
        context.insert("next_page", "");

        let html = renderer.render("index.html", &context).unwrap();
        assert!(!html.contains("load-more"));

        context.insert("next_page", "https://cms.example.com/page2");
        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("load-more"));
    }

    #[test]
    fn test_post_renders_sections_in_order() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: "Blog".to_string(),
                subtitle: String::new(),
                description: String::new(),
                author: "Jane Roe".to_string(),
                language: "en".to_string(),
                root: "/".to_string(),
            },
        );
        context.insert(
            "post",
            &PostView {
                title: "Hello".to_string(),
                banner_url: "https://images.example.com/banner.png".to_string(),
                author: "Jane Roe".to_string(),
                date: "15 Mar 2021".to_string(),
                reading_time: 2,
                sections: vec![
                    SectionView {
                        heading: "First".to_string(),
                        body_html: "<p>one</p>".to_string(),
                    },
                    SectionView {
                        heading: "Second".to_string(),
                        body_html: "<p>two</p>".to_string(),
                    },
                ],
            },
        );

        let html = renderer.render("post.html", &context).unwrap();
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert!(html.contains("2 min"));
        assert!(html.contains("banner.png"));
    }
}
