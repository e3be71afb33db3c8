use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

const BIN: &str = "sp-api-mcp";
const ENV_KEYS: &[&str] = &[
    "SP_API_CLIENT_ID",
    "SP_API_CLIENT_SECRET",
    "SP_API_REFRESH_TOKEN",
    "SP_API_ENDPOINT",
    "SP_API_LWA_ENDPOINT",
    "MCP_SERVER_NAME",
    "MCP_SERVER_VERSION",
    "MCP_SERVER_INSTRUCTIONS",
    "VERBOSE",
];

pub fn locate_sp_api_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_sp-api-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` → `.../target/{debug|release}/sp-api-mcp`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join(BIN);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in ["target/debug", "target/release"] {
        let candidate = repo_root.join(rel).join(BIN);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("failed to locate {BIN} binary")
}

/// Server command with a clean configuration, run from `dir` so no stray `.env` is picked up.
pub fn server_command(dir: &Path) -> Result<Command> {
    let mut cmd = Command::new(locate_sp_api_mcp_bin()?);
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.env("RUST_LOG", "warn");
    cmd.current_dir(dir);
    Ok(cmd)
}
