mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, init, render, serve, CheckArgs, InitArgs, RenderArgs, ServeArgs};

/// Pagecraft CLI - section-based page builder
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft site
    Init(InitArgs),

    /// Render a layout file to HTML
    Render(RenderArgs),

    /// Lint layout files
    Check(CheckArgs),

    /// Start the layout server
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Check(args) => check(args, &cwd),
            Command::Serve(args) => serve(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
