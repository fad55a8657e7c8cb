//! Optional TOML configuration and resolution of the sessions and output roots.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::{RenderError, RenderResult};

/// Output root used by batch mode when neither the CLI nor the config names one.
pub const DEFAULT_BATCH_OUTPUT: &str = "session-html";

/// Environment variable pointing at the agent's home directory.
pub const CODEX_HOME_ENV: &str = "CODEX_HOME";

/// Optional settings read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default)]
    pub sessions_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Title of the batch index page.
    #[serde(default)]
    pub title: Option<String>,
}

pub fn load_config(path: &Path) -> RenderResult<RenderConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&s).map_err(|e| RenderError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config file when one was given, else use defaults.
pub fn load_optional(path: Option<&Path>) -> RenderResult<RenderConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(RenderConfig::default()),
    }
}

/// Pick the sessions root: CLI flag, then config, then `$CODEX_HOME/sessions`,
/// then `<home>/.codex/sessions`.
pub fn resolve_sessions_dir(
    cli: Option<PathBuf>,
    config: &RenderConfig,
    codex_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> RenderResult<PathBuf> {
    if let Some(dir) = cli.or_else(|| config.sessions_dir.clone()) {
        return Ok(dir);
    }
    if let Some(codex_home) = codex_home.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(codex_home.join("sessions"));
    }
    home.map(|h| h.join(".codex").join("sessions")).ok_or_else(|| {
        RenderError::Message(
            "cannot determine the sessions directory; pass --sessions-dir".to_string(),
        )
    })
}

/// [`resolve_sessions_dir`] against the process environment.
pub fn sessions_dir_from_env(cli: Option<PathBuf>, config: &RenderConfig) -> RenderResult<PathBuf> {
    resolve_sessions_dir(
        cli,
        config,
        std::env::var_os(CODEX_HOME_ENV).map(PathBuf::from),
        dirs::home_dir(),
    )
}

pub fn resolve_batch_output(cli: Option<PathBuf>, config: &RenderConfig) -> PathBuf {
    cli.or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BATCH_OUTPUT))
}
