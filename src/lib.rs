pub mod batch;
pub mod batch_cmd;
pub mod config;
pub mod convert_cmd;
pub mod core;
pub mod render;
pub mod storage;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("sessions root not found: {}", .0.display())]
    SessionsRootNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no events could be parsed from {}", .0.display())]
    NoEvents(PathBuf),
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_output(path: &std::path::Path, contents: &str) -> RenderResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    std::fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}
