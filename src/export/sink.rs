//! Output Sink
//!
//! A destination for scene text. A sink either accumulates text in memory
//! (buffered mode, used for dry runs and tests) or streams it straight into
//! a file through a [`BufWriter`] (streamed mode).
//!
//! Both modes count the bytes written, which is how the exporter decides
//! whether an auxiliary file deserves an `Include` directive. Nothing is
//! transactional: once a line is written it stays written, even if the
//! session later fails.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{ExportError, Result};

#[derive(Debug)]
enum SinkTarget {
    Buffer(String),
    File(BufWriter<File>),
}

/// One output stream of an export session.
#[derive(Debug)]
pub struct OutputSink {
    target: SinkTarget,
    /// File this stream represents, even in buffered mode.
    path: PathBuf,
    bytes_written: u64,
}

/// What remains of a sink after it has been closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// Accumulated text of a buffered sink.
    pub text: Option<String>,
}

impl StreamSummary {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes_written == 0
    }
}

impl OutputSink {
    /// Creates an in-memory sink standing in for `path`.
    #[must_use]
    pub fn buffered(path: impl Into<PathBuf>) -> Self {
        Self {
            target: SinkTarget::Buffer(String::new()),
            path: path.into(),
            bytes_written: 0,
        }
    }

    /// Creates (or truncates) `path` and streams into it.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| ExportError::StreamOpen {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            target: SinkTarget::File(BufWriter::new(file)),
            path,
            bytes_written: 0,
        })
    }

    pub fn write(&mut self, text: &str) -> Result<()> {
        match &mut self.target {
            SinkTarget::Buffer(buffer) => buffer.push_str(text),
            SinkTarget::File(writer) => writer.write_all(text.as_bytes())?,
        }
        self.bytes_written += text.len() as u64;
        Ok(())
    }

    pub fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// Lets `write!` and `writeln!` target a sink directly.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        match args.as_str() {
            Some(text) => self.write(text),
            None => self.write(&fmt::format(args)),
        }
    }

    /// Text accumulated so far; `None` in streamed mode.
    #[must_use]
    pub fn exported_text(&self) -> Option<&str> {
        match &self.target {
            SinkTarget::Buffer(buffer) => Some(buffer),
            SinkTarget::File(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes_written == 0
    }

    #[inline]
    #[must_use]
    pub fn is_streamed(&self) -> bool {
        matches!(self.target, SinkTarget::File(_))
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and closes the stream.
    pub fn finish(self) -> Result<StreamSummary> {
        let text = match self.target {
            SinkTarget::Buffer(buffer) => Some(buffer),
            SinkTarget::File(mut writer) => {
                writer.flush()?;
                None
            }
        };
        Ok(StreamSummary {
            path: self.path,
            bytes_written: self.bytes_written,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_sink_accumulates_and_counts() {
        let mut sink = OutputSink::buffered("scene.pbrt");
        assert!(sink.is_empty());

        sink.write_line("WorldBegin").unwrap();
        writeln!(sink, "Include \"{}\"", "a.pbrt").unwrap();

        assert_eq!(sink.exported_text(), Some("WorldBegin\nInclude \"a.pbrt\"\n"));
        assert_eq!(sink.bytes_written(), 28);
        assert!(!sink.is_streamed());
    }

    #[test]
    fn streamed_sink_writes_file() {
        let path = std::env::temp_dir().join(format!("pbrt_export_sink_{}.pbrt", std::process::id()));
        let mut sink = OutputSink::create(&path).unwrap();
        writeln!(sink, "WorldEnd").unwrap();
        assert_eq!(sink.exported_text(), None);

        let summary = sink.finish().unwrap();
        assert_eq!(summary.bytes_written, 9);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "WorldEnd\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unopenable_path_is_a_stream_open_error() {
        let path = std::env::temp_dir().join("pbrt_export_missing_dir").join("x").join("scene.pbrt");
        let err = OutputSink::create(&path).unwrap_err();
        assert!(matches!(err, ExportError::StreamOpen { .. }));
    }
}
