//! CLI entry point for techtips

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use techtips::content::{ContentKind, ContentStore};
use techtips::Site;

#[derive(Parser)]
#[command(name = "techtips")]
#[command(version)]
#[command(about = "A fast self-hosted blog engine for markdown articles, tips, and dashboards", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article, tip, or dashboard
    New {
        /// Content kind (article, tip, dashboard)
        #[arg(short, long, default_value = "article")]
        kind: String,

        /// Title of the new item
        title: String,
    },

    /// Start the server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List site content
    List {
        /// Type of content to list (article, tip, dashboard, tag)
        #[arg(default_value = "article")]
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
        "techtips=debug,info"
    } else {
        "techtips=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            techtips::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { kind, title } => {
            let site = Site::new(&base_dir)?;
            let kind = ContentKind::parse(&kind).ok_or_else(|| {
                anyhow::anyhow!("unknown kind: {}. Available: article, tip, dashboard", kind)
            })?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            techtips::commands::new::create_item(&site, kind, &title)?;
        }

        Commands::Serve { port, ip } => {
            let site = Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Loading content from {:?}", site.content_dir);
            let store = ContentStore::load(&site)?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            techtips::server::start(site, store, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            techtips::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("techtips version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
