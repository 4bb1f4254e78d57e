use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_server::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,
}

pub fn serve(args: ServeArgs, cwd: &Path) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let root = cwd.join(&args.path);
    let mut config = Config::load(&root)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if config.admin_tokens.is_empty() {
        println!(
            "{} No adminTokens configured; saving is disabled",
            "⚠️".yellow()
        );
    }

    println!("{}", "🚀 Starting Pagecraft server...".bright_blue().bold());
    println!("   Site:   {}", root.display());
    println!("   Listen: http://{}:{}", config.host, config.port);
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(pagecraft_server::serve(config, &root))
}
