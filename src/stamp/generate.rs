use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::filesystem::output::write_output;
use crate::stamp::format::VarFormat;
use crate::stamp::resolver::{render, Resolver, VarMap};

/// Inputs of one `gen` run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub output: PathBuf,
    pub template: PathBuf,
    pub var_format: String,
    pub status_files: Vec<PathBuf>,
}

/// Reads every status file and resolves the final mapping.
pub async fn resolve_files(resolver: &Resolver, status_files: &[PathBuf]) -> Result<VarMap> {
    let mut contents = Vec::with_capacity(status_files.len());
    for path in status_files {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read status file {}", path.display()))?;
        contents.push(text);
    }
    let sources = status_files
        .iter()
        .map(PathBuf::as_path)
        .zip(contents.iter().map(String::as_str));
    Ok(resolver.resolve(sources)?)
}

/// Resolves, renders and writes the output file. Nothing is written unless
/// every input parsed and the template rendered.
pub async fn generate(resolver: &Resolver, req: &GenerateRequest) -> Result<VarMap> {
    let format = VarFormat::parse(&req.var_format)
        .with_context(|| format!("Invalid --var_format {:?}", req.var_format))?;
    let template = read_template(&req.template).await?;
    let vars = resolve_files(resolver, &req.status_files).await?;

    println!(
        "INFO: Formatting buildstamp variables with format: {}",
        format.as_str()
    );
    let rendered = render(&template, &format, &vars)
        .with_context(|| format!("Failed to render template {}", req.template.display()))?;
    write_output(&req.output, &rendered).await?;
    info!(output = %req.output.display(), vars = vars.len(), "wrote buildstamp output");
    Ok(vars)
}

async fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template {}", path.display()))
}
