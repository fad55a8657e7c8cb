//! CLI command handler for batch conversion.
//!
//! Converts every session log under a sessions root into a mirrored HTML
//! tree and writes `index.html` and `index.json` at the output root.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::batch::{
    IndexEntry, SessionFile, discover_sessions, href_for, write_index_html, write_index_json,
};
use crate::batch::index::format_modified;
use crate::convert_cmd::render_file;
use crate::{RenderError, RenderResult, write_output};

pub const DEFAULT_INDEX_TITLE: &str = "Session Logs";

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Index entries of converted files, in traversal order.
    pub entries: Vec<IndexEntry>,
    /// Files that failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn converted(&self) -> usize {
        self.entries.len()
    }
}

/// Convert one discovered file and describe it for the index.
fn convert_one(file: &SessionFile) -> RenderResult<IndexEntry> {
    let (rendered, stats) = render_file(&file.source)?;
    if stats.events == 0 && stats.non_blank() > 0 {
        return Err(RenderError::NoEvents(file.source.clone()));
    }

    write_output(&file.output, &rendered.html)?;

    let source = href_for(&file.relative);
    let modified = std::fs::metadata(&file.source)
        .and_then(|m| m.modified())
        .ok()
        .and_then(format_modified);

    Ok(IndexEntry {
        title: rendered.session_id.clone().unwrap_or_else(|| source.clone()),
        href: file.href(),
        source,
        session_id: rendered.session_id,
        events: rendered.events,
        modified,
    })
}

/// Run batch conversion.
///
/// # Errors
/// Fails only when the sessions root is missing or the index cannot be
/// written. Per-file failures are logged and reported in the summary.
pub fn run(sessions_dir: &Path, out_dir: &Path, title: Option<&str>) -> RenderResult<BatchSummary> {
    let files = discover_sessions(sessions_dir, out_dir)?;
    info!(
        "Found {} session log(s) under {}",
        files.len(),
        sessions_dir.display()
    );

    let mut summary = BatchSummary::default();
    for file in &files {
        match convert_one(file) {
            Ok(entry) => {
                info!("Wrote {}", file.output.display());
                summary.entries.push(entry);
            }
            Err(e) => {
                warn!("skipping {}: {e}", file.source.display());
                summary.failed.push((file.source.clone(), e.to_string()));
            }
        }
    }

    let title = title.unwrap_or(DEFAULT_INDEX_TITLE);
    let html_path = out_dir.join("index.html");
    write_index_html(title, &summary.entries, &html_path)?;
    write_index_json(&summary.entries, &out_dir.join("index.json"))?;
    info!(
        "Converted {} file(s), {} failed; index at {}",
        summary.converted(),
        summary.failed.len(),
        html_path.display()
    );

    Ok(summary)
}
