//! List CMS content

use anyhow::Result;

use crate::helpers::format_publication_date;
use crate::listing::Listing;
use crate::Orbit;

/// List CMS content by type
pub async fn run(orbit: &Orbit, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let client = orbit.cms_client()?;
            let mut listing = Listing::new(client.get_by_type(100).await?);
            listing.load_all(&client).await?;

            println!("Posts ({}):", listing.posts().len());
            for post in listing.posts() {
                println!(
                    "  {} - {} [{}]",
                    format_publication_date(
                        post.first_publication_date.as_ref(),
                        &orbit.config.language
                    ),
                    post.title,
                    post.uid
                );
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: posts", content_type);
        }
    }

    Ok(())
}
