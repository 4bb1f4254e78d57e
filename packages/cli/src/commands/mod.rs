pub mod check;
pub mod init;
pub mod render;
pub mod serve;

pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};

use anyhow::{Context, Result};
use pagecraft_model::Layout;
use std::path::Path;

/// Read and decode a stored layout file
pub fn read_layout(path: &Path) -> Result<Layout> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid layout JSON in {}", path.display()))
}
