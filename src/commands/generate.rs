//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Orbit;

/// Generate the static site from the CMS
pub async fn run(orbit: &Orbit) -> Result<()> {
    let start = std::time::Instant::now();

    let client = orbit.cms_client()?;
    let generator = Generator::new(orbit)?;

    generator.generate(&client).await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
