use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn bundled_catalog() -> PathBuf {
    repo_root().join(refcat::DEFAULT_CATALOG_RELATIVE_PATH)
}

/// `refcat` invocation pinned to `catalog`, with ambient log config cleared.
pub fn refcat_cmd(catalog: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_refcat"));
    cmd.arg("--catalog")
        .arg(catalog)
        .env_remove("RUST_LOG")
        .env_remove("REFCAT_CATALOG");
    cmd
}

/// `refcat` invocation with no catalog override at all, so the binary has to
/// discover the repository root itself.
pub fn refcat_cmd_without_catalog() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_refcat"));
    cmd.env_remove("RUST_LOG")
        .env_remove("REFCAT_CATALOG")
        .env_remove("REFCAT_ROOT");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn write_catalog(document: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate catalog file")?;
    serde_json::to_writer(&mut file, document)?;
    file.flush()?;
    Ok(file)
}

pub fn stdout_ids(output: &Output) -> Result<Vec<String>> {
    let value: Value =
        serde_json::from_slice(&output.stdout).context("stdout is not JSON")?;
    let Some(items) = value.as_array() else {
        bail!("expected a JSON array, got {value}");
    };
    Ok(items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}
