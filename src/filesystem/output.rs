use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Creates the directory that will hold `output` (0755 on Unix).
/// An already existing directory is fine.
pub async fn ensure_parent_dir(output: &Path) -> Result<()> {
    let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(target_family = "unix")]
    builder.mode(0o755);
    match builder.create(parent).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && parent.is_dir() => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to create directory {}", parent.display())),
    }
}

/// Truncates and rewrites `output`.
pub async fn write_output(output: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(output).await?;
    fs::write(output, contents.as_bytes())
        .await
        .with_context(|| format!("Failed to write output file {}", output.display()))
}
