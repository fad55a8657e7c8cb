//! Discovery of session logs under a sessions root.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{RenderError, RenderResult};

pub const SESSION_EXTENSION: &str = "jsonl";
pub const OUTPUT_EXTENSION: &str = "html";

/// One input log and where its page goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    pub source: PathBuf,
    /// Path of the source relative to the sessions root.
    pub relative: PathBuf,
    /// Mirrored output path under the output root.
    pub output: PathBuf,
}

impl SessionFile {
    /// Relative link from the output root to this page, with `/` separators.
    pub fn href(&self) -> String {
        href_for(&self.relative.with_extension(OUTPUT_EXTENSION))
    }
}

/// Join the normal components of a relative path with `/`.
pub fn href_for(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_session_log(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SESSION_EXTENSION))
}

/// Recursively find session logs under `root`, in file-name order.
///
/// Files under `out_root` are skipped when the output tree lives inside the
/// sessions root.
///
/// # Errors
/// Returns `SessionsRootNotFound` if `root` is not a directory. Unreadable
/// entries below the root are logged and skipped.
pub fn discover_sessions(root: &Path, out_root: &Path) -> RenderResult<Vec<SessionFile>> {
    if !root.is_dir() {
        return Err(RenderError::SessionsRootNotFound(root.to_path_buf()));
    }

    let out_canonical = out_root.canonicalize().ok();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_session_log(entry.path()) {
            continue;
        }

        if let Some(out) = &out_canonical {
            let inside_output = entry
                .path()
                .canonicalize()
                .map(|p| p.starts_with(out))
                .unwrap_or(false);
            if inside_output {
                debug!(path = %entry.path().display(), "skipping file inside output root");
                continue;
            }
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        let output = out_root.join(relative.with_extension(OUTPUT_EXTENSION));

        files.push(SessionFile {
            source: entry.path().to_path_buf(),
            relative,
            output,
        });
    }

    Ok(files)
}
