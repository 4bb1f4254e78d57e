use clap::Parser;
use pagecraft_server::{serve, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagecraft layout server
#[derive(Parser, Debug)]
#[command(name = "pagecraft-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project directory containing pagecraft.config.json
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind (overrides the config file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = Config::load(&args.root)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    println!("Starting Pagecraft server...");
    println!("Root directory: {:?}", args.root);
    println!("HTTP listening on {}:{}", config.host, config.port);

    serve(config, &args.root).await
}
