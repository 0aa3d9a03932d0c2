//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{commands, server, Folio};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A small static site generator for a personal site", long_about = None)]
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
    /// Build the site into the output directory
    #[command(alias = "b")]
    Build {
        /// Rebuild on file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Build, then serve the output directory
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Delete the output directory
    Clean,

    /// List site content
    List {
        /// What to list (blog, pages, all, or a collection name)
        #[arg(default_value = "blog")]
        r#type: String,
    },

    /// Create a new content file
    New {
        /// Title of the new entry
        title: String,

        /// Collection to create it in
        #[arg(short, long, default_value = "blog")]
        collection: String,
    },

    /// Generate missing OG images for blog posts
    Og,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "folio=debug,info" } else { "folio=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Build { watch } => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Building site...");
            let report = folio.build()?;
            println!(
                "Built {} pages ({} posts) into {}",
                report.pages,
                report.posts,
                folio.output_dir.display()
            );

            if watch {
                tokio::task::spawn_blocking(move || commands::build::watch(&folio)).await??;
            }
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Building site...");
            folio.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&folio, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let folio = Folio::new(&base_dir)?;
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let folio = Folio::new(&base_dir)?;
            commands::list::run(&folio, &r#type)?;
        }

        Commands::New { title, collection } => {
            let folio = Folio::new(&base_dir)?;
            let path = commands::new::run(&folio, &title, &collection)?;
            println!("Created: {}", path.display());
        }

        Commands::Og => {
            let folio = Folio::new(&base_dir)?;
            commands::og::run(&folio);
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
