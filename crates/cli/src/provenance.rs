use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Sidecar describing how an output file was produced.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub version: &'static str,
    pub command: String,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(command: &str, params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            version: geopath::VERSION,
            command: command.to_string(),
            params,
            outputs: Vec::new(),
        }
    }
}

/// Write `<artifact stem>.provenance.json` next to `artifact`.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, mut record: Provenance) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);
    record.outputs.push(artifact.to_string_lossy().into_owned());
    fs::write(&path, serde_json::to_vec_pretty(&record)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "provenance_written");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit from the build or runtime `GIT_COMMIT`, else `unknown`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
