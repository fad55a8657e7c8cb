//! JSONL (JSON Lines) reader for session logs.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::event::{Event, ParsedLine, parse_line};
use crate::{RenderError, RenderResult};

/// Counters collected while streaming a session log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub lines: usize,
    pub blank: usize,
    pub malformed: usize,
    pub events: usize,
}

impl ReadStats {
    /// Lines that carried content, whether or not they decoded.
    pub fn non_blank(&self) -> usize {
        self.lines - self.blank
    }
}

/// Reader for a single session log file.
///
/// The file is not opened until [`SessionReader::events`] is called.
#[derive(Debug, Clone)]
pub struct SessionReader {
    path: PathBuf,
}

impl SessionReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        SessionReader {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Open the log and return a lazy, single-pass stream of events.
    ///
    /// # Errors
    /// Returns `InputNotFound` if the path does not exist and `Read` if it
    /// cannot be opened.
    pub fn events(&self) -> RenderResult<EventStream<BufReader<File>>> {
        if !self.path.exists() {
            return Err(RenderError::InputNotFound(self.path.clone()));
        }

        let file = File::open(&self.path).map_err(|source| RenderError::Read {
            path: self.path.clone(),
            source,
        })?;

        Ok(EventStream::new(BufReader::new(file)))
    }

    /// Read every event into memory.
    pub fn read_all(&self) -> RenderResult<(Vec<Event>, ReadStats)> {
        let mut stream = self.events()?;
        let events: Vec<Event> = stream.by_ref().collect();
        if let Some(message) = stream.read_error() {
            return Err(RenderError::Message(format!(
                "failed to read {}: {message}",
                self.path.display()
            )));
        }
        Ok((events, stream.stats()))
    }
}

/// Lazy iterator over the events of a session log.
///
/// Blank lines and lines that do not decode to a JSON object are skipped.
pub struct EventStream<R> {
    lines: Lines<R>,
    stats: ReadStats,
    read_error: Option<String>,
}

impl<R: BufRead> EventStream<R> {
    pub fn new(reader: R) -> Self {
        EventStream {
            lines: reader.lines(),
            stats: ReadStats::default(),
            read_error: None,
        }
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> ReadStats {
        self.stats
    }

    /// I/O error that ended the stream early, if any.
    pub fn read_error(&self) -> Option<&str> {
        self.read_error.as_deref()
    }
}

impl<R: BufRead> Iterator for EventStream<R> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if self.read_error.is_some() {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.stats.lines += 1;
                    self.stats.malformed += 1;
                    debug!(line = self.stats.lines, "skipping line that is not valid UTF-8");
                    continue;
                }
                Err(e) => {
                    warn!("stopped reading session log: {e}");
                    self.read_error = Some(e.to_string());
                    return None;
                }
            };
            self.stats.lines += 1;

            match parse_line(&line) {
                ParsedLine::Blank => self.stats.blank += 1,
                ParsedLine::Malformed(reason) => {
                    self.stats.malformed += 1;
                    debug!(line = self.stats.lines, "skipping malformed line: {reason}");
                }
                ParsedLine::Event(event) => {
                    self.stats.events += 1;
                    return Some(event);
                }
            }
        }
    }
}
