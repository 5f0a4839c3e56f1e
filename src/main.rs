//! CLI entry point for orbit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "orbit")]
#[command(version)]
#[command(about = "A static blog generator backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch posts from the CMS and generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no pagination proxy, no fallback rendering)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List posts known to the CMS
    List {
        /// Type of content to list (posts)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "orbit=debug,info"
    } else {
        "orbit=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Generate => {
            let orbit = orbit::Orbit::new(&base_dir)?;
            tracing::info!("Generating static files...");

            orbit.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let orbit = orbit::Orbit::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            orbit.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            orbit::server::start(&orbit, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let orbit = orbit::Orbit::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            orbit.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let orbit = orbit::Orbit::new(&base_dir)?;
            orbit::commands::list::run(&orbit, &r#type).await?;
        }

        Commands::Version => {
            println!("orbit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
