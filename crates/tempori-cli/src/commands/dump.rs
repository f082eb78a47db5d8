//! Occurrence dumping: one line per occurrence, appended to a file and echoed.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tempori_core::LabelTable;
use tempori_engine::{Occurrence, OccurrenceSink};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DumpFormat {
    /// `(node:label),…<TAB>(src,dst,time:label),…`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Writes every occurrence to the dump file and to `echo`.
///
/// Each line is written and flushed as its occurrence arrives. A failed write
/// is reported on stderr and counted; the search goes on.
pub struct DumpSink<'a, F: Write, W: Write> {
    labels: &'a LabelTable,
    format: DumpFormat,
    path: PathBuf,
    file: F,
    echo: &'a mut W,
    failures: u64,
}

impl<'a, W: Write> DumpSink<'a, File, W> {
    /// Open `path` for appending, creating it if needed.
    pub fn create(
        path: &Path,
        format: DumpFormat,
        labels: &'a LabelTable,
        echo: &'a mut W,
    ) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file, path, format, labels, echo))
    }
}

impl<'a, F: Write, W: Write> DumpSink<'a, F, W> {
    /// Dump into `file`; `path` only names it in error messages.
    pub fn new(
        file: F,
        path: &Path,
        format: DumpFormat,
        labels: &'a LabelTable,
        echo: &'a mut W,
    ) -> Self {
        Self {
            labels,
            format,
            path: path.to_owned(),
            file,
            echo,
            failures: 0,
        }
    }

    /// Number of occurrences that failed to reach the file or the echo.
    pub fn finish(self) -> u64 {
        self.failures
    }

    fn line(&self, occurrence: &Occurrence<'_>) -> String {
        match self.format {
            DumpFormat::Text => occurrence.display(self.labels).to_string(),
            DumpFormat::Json => {
                let record = occurrence.to_record(self.labels);
                serde_json::to_string(&record).expect("occurrence records always serialize")
            }
        }
    }
}

impl<F: Write, W: Write> OccurrenceSink for DumpSink<'_, F, W> {
    fn accept(&mut self, occurrence: &Occurrence<'_>) -> ControlFlow<()> {
        let mut line = self.line(occurrence);
        line.push('\n');
        let written = self
            .file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.flush());
        let echoed = self.echo.write_all(line.as_bytes());

        if let Err(e) = &written {
            eprintln!("error: failed to write '{}': {e}", self.path.display());
        }
        if let Err(e) = &echoed {
            eprintln!("error: failed to echo occurrence: {e}");
        }
        if written.is_err() || echoed.is_err() {
            self.failures += 1;
        }
        ControlFlow::Continue(())
    }
}
