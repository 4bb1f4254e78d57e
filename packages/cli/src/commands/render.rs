use super::read_layout;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Mode, Registry};
use pagecraft_server::{render_layout_page, Config};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Layout JSON file to render
    pub input: PathBuf,

    /// Write HTML to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render the editing view (working sections with field controls)
    #[arg(long)]
    pub edit: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let layout = read_layout(&args.input)?;
    let mode = if args.edit { Mode::Editing } else { Mode::Viewing };

    let html = render_layout_page(&layout, &config.navigation, &Registry::new(), mode);

    match args.output {
        Some(path) => {
            fs::write(&path, html)?;
            eprintln!("{} {} → {}", "✓".green(), args.input.display(), path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
