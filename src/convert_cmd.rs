//! CLI command handler for single-file conversion.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::render::{DocumentMeta, RenderedSession, render_session};
use crate::storage::{ReadStats, SessionReader};
use crate::{RenderError, RenderResult, write_output};

/// Page title for a session log.
pub fn title_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Session Log - {name}")
}

/// Read and render one session log into a complete document.
///
/// Nothing is written; callers decide where the document goes.
pub fn render_file(path: &Path) -> RenderResult<(RenderedSession, ReadStats)> {
    let reader = SessionReader::new(path);
    let mut stream = reader.events()?;
    let meta = DocumentMeta::new(title_for(path)).with_source(path.display().to_string());

    let rendered = render_session(&meta, stream.by_ref());
    if let Some(message) = stream.read_error() {
        return Err(RenderError::Message(format!(
            "failed to read {}: {message}",
            path.display()
        )));
    }

    let stats = stream.stats();
    debug!(
        path = %path.display(),
        lines = stats.lines,
        blank = stats.blank,
        malformed = stats.malformed,
        events = stats.events,
        "parsed session log"
    );
    Ok((rendered, stats))
}

/// Run single-file conversion.
///
/// Writes the document to `output`, or to stdout when no output is given.
/// The input is fully rendered before anything is written.
pub fn run(input: PathBuf, output: Option<PathBuf>) -> RenderResult<()> {
    let (rendered, _stats) = render_file(&input)?;

    match output {
        Some(path) => {
            write_output(&path, &rendered.html)?;
            info!(
                "Wrote {} block(s) from {} to {}",
                rendered.blocks,
                input.display(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(rendered.html.as_bytes())
                .and_then(|_| lock.flush())
                .map_err(|source| RenderError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_writes_output_file() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("rollout.jsonl");
        std::fs::write(
            &input,
            "{\"type\":\"message\",\"role\":\"user\",\"content\":[{\"type\":\"input_text\",\"text\":\"Hello there\"}]}\n",
        )
        .unwrap();
        let output = temp.path().join("nested/out.html");

        let result = run(input, Some(output.clone()));
        assert!(result.is_ok(), "run should succeed: {:?}", result.err());

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Hello there"));
        assert!(html.contains("<title>Session Log - rollout.jsonl</title>"));
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.html");

        let err = run(temp.path().join("missing.jsonl"), Some(output.clone())).unwrap_err();
        assert!(matches!(err, RenderError::InputNotFound(_)));
        assert!(err.to_string().contains("missing.jsonl"));
        assert!(!output.exists());
    }

    #[test]
    fn test_render_file_reports_stats() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("s.jsonl");
        std::fs::write(&input, "garbage\n\n{\"type\":\"other\"}\n").unwrap();

        let (rendered, stats) = render_file(&input).unwrap();
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.blank, 1);
        assert_eq!(rendered.events, 1);
        assert!(rendered.html.contains("Event: other"));
    }
}
