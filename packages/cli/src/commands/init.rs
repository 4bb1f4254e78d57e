use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_model::{ContentMap, Layout, NavigationItem, Section, SectionKind};
use pagecraft_server::{Config, DEFAULT_CONFIG_NAME};
use serde_json::json;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for layout files
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Port the server listens on
    #[arg(short, long, default_value = "3030")]
    pub port: u16,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagecraft site...".bright_blue().bold());

    let data_dir = cwd.join(&args.data_dir);
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
        println!("  {} Created {}/", "✓".green(), args.data_dir);
    }

    let home_file = data_dir.join("home.json");
    if !home_file.exists() {
        let layout = sample_layout();
        fs::write(&home_file, serde_json::to_string_pretty(&layout)?)?;
        println!("  {} Created {}/home.json", "✓".green(), args.data_dir);
    }

    let config = Config {
        data_dir: args.data_dir.clone(),
        port: args.port,
        admin_tokens: vec!["change-me".to_string()],
        navigation: sample_navigation(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Replace the admin token in {}", DEFAULT_CONFIG_NAME);
    println!("  2. Run: pagecraft check {}", args.data_dir);
    println!("  3. Run: pagecraft serve");

    Ok(())
}

fn sample_navigation() -> Vec<NavigationItem> {
    let item = |id: &str, name: &str, slug: &str| NavigationItem {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        submenu: vec![],
        image_url: None,
        tag_line: None,
    };

    vec![item("nav-home", "Home", "home"), item("nav-services", "Services", "services")]
}

/// Home page with a few built-in sections and one custom type
fn sample_layout() -> Layout {
    let mut sections: Vec<Section> = [
        ("home-hero", SectionKind::Hero),
        ("home-services", SectionKind::HomeServices),
        ("home-stats", SectionKind::StatCards),
    ]
    .into_iter()
    .map(|(id, kind)| Section::with_content(id, kind.as_str(), kind.default_content()))
    .collect();

    let mut pricing = ContentMap::new();
    pricing.insert("heading".to_string(), json!("Plans"));
    pricing.insert("plans".to_string(), json!([{ "name": "Basic", "price": 10 }]));
    sections.push(Section::with_content("home-pricing", "pricing-table", pricing));

    let mut layout = Layout::new("home", "home", "Home");
    layout.record_save(sections, false, Some("Initial content".to_string()), "pagecraft init");
    layout
}
