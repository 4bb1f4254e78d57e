use super::read_layout;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_linter::{lint_layout, Diagnostic, DiagnosticLevel, LintOptions};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Layout JSON file or directory to lint
    #[arg(default_value = "data")]
    pub input: PathBuf,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub verbose: bool,

    /// Also lint every stored version snapshot
    #[arg(long)]
    pub versions: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Default, PartialEq)]
struct Totals {
    files: usize,
    diagnostics: usize,
    errors: usize,
    warnings: usize,
}

pub fn check(args: CheckArgs, cwd: &Path) -> Result<()> {
    let input = cwd.join(&args.input);
    println!("🔍 {} Pagecraft layout check", "Starting".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let totals = check_path(&input, &args)?;

    println!();
    println!(
        "✨ {} Check complete!",
        if totals.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", totals.files);
    println!("   Total diagnostics: {}", totals.diagnostics);

    if totals.errors > 0 {
        println!("   {} {}", "Errors:".red(), totals.errors);
    }
    if totals.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), totals.warnings);
    }
    if totals.errors == 0 && totals.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    if totals.errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn check_path(input: &Path, args: &CheckArgs) -> Result<Totals> {
    let files = if input.is_file() {
        vec![input.to_path_buf()]
    } else if input.is_dir() {
        let files = find_layout_files(input);
        println!("   Found {} layout files", files.len());
        println!();
        files
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            input.display()
        ));
    };

    let mut totals = Totals::default();
    for file in files {
        check_file(&file, args, &mut totals)?;
    }
    Ok(totals)
}

fn check_file(file_path: &Path, args: &CheckArgs, totals: &mut Totals) -> Result<()> {
    totals.files += 1;

    let layout = match read_layout(file_path) {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            totals.errors += 1;
            return Ok(());
        }
    };

    let options = LintOptions {
        include_versions: args.versions,
        ..LintOptions::default()
    };
    let diagnostics = lint_layout(&layout, options);

    totals.diagnostics += diagnostics.len();
    totals.errors += count(&diagnostics, DiagnosticLevel::Error);
    totals.warnings += count(&diagnostics, DiagnosticLevel::Warning);

    if diagnostics.is_empty() {
        if args.verbose {
            println!("{} {}", "✓".green(), file_path.display());
        }
        return Ok(());
    }

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(());
    }

    println!("{} ({})", file_path.display(), layout.slug.dimmed());
    for diagnostic in &diagnostics {
        if !args.verbose && diagnostic.level == DiagnosticLevel::Info {
            continue;
        }

        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };
        println!(
            "  {} [{}] {}: {}",
            level_str, diagnostic.rule, diagnostic.location, diagnostic.message
        );

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }
    println!();

    Ok(())
}

fn count(diagnostics: &[Diagnostic], level: DiagnosticLevel) -> usize {
    diagnostics.iter().filter(|d| d.level == level).count()
}

fn find_layout_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{ContentMap, Layout, Section};
    use serde_json::json;
    use std::fs;

    fn args(input: &Path) -> CheckArgs {
        CheckArgs {
            input: input.to_path_buf(),
            verbose: true,
            versions: false,
            format: "text".to_string(),
        }
    }

    fn write_layout(dir: &Path, name: &str, sections: Vec<Section>) {
        let mut layout = Layout::new(name, name, name);
        layout.record_save(sections, false, None, "admin");
        fs::write(dir.join(format!("{}.json", name)), serde_json::to_string(&layout).unwrap()).unwrap();
    }

    #[test]
    fn test_counts_duplicate_ids_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        let hero = Section::with_content("dup", "hero", ContentMap::new());
        write_layout(dir.path(), "home", vec![hero.clone(), hero]);

        let totals = check_path(dir.path(), &args(dir.path())).unwrap();

        assert_eq!(totals.files, 1);
        assert!(totals.errors >= 1);
    }

    #[test]
    fn test_clean_layout_and_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = ContentMap::new();
        content.insert("title".to_string(), json!("Welcome"));
        write_layout(dir.path(), "about", vec![Section::with_content("hero-1", "hero", content)]);
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        fs::write(dir.path().join("readme.md"), "# notes").unwrap();

        let totals = check_path(dir.path(), &args(dir.path())).unwrap();

        assert_eq!(totals.files, 2);
        assert_eq!(totals.errors, 1);
        assert_eq!(totals.warnings, 0);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(check_path(&missing, &args(&missing)).is_err());
    }
}
