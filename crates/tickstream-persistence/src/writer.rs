//! JSON Lines sink for price entries.
//!
//! One file per UTC day (`ticks_YYYY-MM-DD.jsonl`), opened in append mode.
//! Each line is a complete JSON object, so an interrupted write only loses
//! the line being written.

use crate::error::PersistenceResult;
use crate::sink::RecordSink;
use chrono::Utc;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tickstream_core::PriceEntry;
use tracing::{debug, info, warn};

/// Open file for the current day.
struct ActiveFile {
    writer: BufWriter<File>,
    date: String,
    records_written: usize,
}

/// Buffered JSON Lines writer for price entries.
pub struct JsonLinesSink {
    base_dir: PathBuf,
    buffer: Vec<PriceEntry>,
    /// Flush once this many entries are buffered.
    max_buffer_size: usize,
    active: Option<ActiveFile>,
}

impl JsonLinesSink {
    /// Create a sink writing under `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>, max_buffer_size: usize) -> PersistenceResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)?;

        Ok(Self {
            base_dir,
            buffer: Vec::with_capacity(max_buffer_size),
            max_buffer_size: max_buffer_size.max(1),
            active: None,
        })
    }

    /// Entries waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Path of the file for a given date.
    pub fn file_path(&self, date: &str) -> PathBuf {
        self.base_dir.join(format!("ticks_{date}.jsonl"))
    }

    /// Buffer an entry, flushing when the buffer is full.
    pub fn add_record(&mut self, entry: PriceEntry) -> PersistenceResult<()> {
        self.buffer.push(entry);

        if self.buffer.len() >= self.max_buffer_size {
            self.flush()?;
        }

        Ok(())
    }

    fn close_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            if let Err(e) = active.writer.flush() {
                warn!(?e, "Failed to flush writer on close");
            }
            info!(
                date = %active.date,
                records = active.records_written,
                "Closed tick file"
            );
        }
    }

    fn open(&self, date: &str) -> PersistenceResult<ActiveFile> {
        let path = self.file_path(date);
        info!(path = %path.display(), "Opening tick file (append mode)");

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(ActiveFile {
            writer: BufWriter::new(file),
            date: date.to_string(),
            records_written: 0,
        })
    }

    /// Write buffered entries to today's file.
    pub fn flush(&mut self) -> PersistenceResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let today = Utc::now().format("%Y-%m-%d").to_string();

        if self.active.as_ref().is_some_and(|a| a.date != today) {
            self.close_active();
        }

        let mut active = match self.active.take() {
            Some(active) => active,
            None => self.open(&today)?,
        };

        let (written, result) = write_lines(&mut active.writer, &mut self.buffer);
        active.records_written += written;
        self.active = Some(active);
        result?;

        debug!(date = %today, records = written, "Flushed ticks to JSON Lines");

        Ok(())
    }

    /// Flush pending entries and close the current file.
    pub fn close(&mut self) -> PersistenceResult<()> {
        self.flush()?;
        self.close_active();
        Ok(())
    }
}

/// Write buffered entries as lines, removing each one the writer accepts.
///
/// On error the buffer keeps only the entries not yet written, so a retry
/// never duplicates lines.
fn write_lines<W: Write>(
    writer: &mut W,
    buffer: &mut Vec<PriceEntry>,
) -> (usize, PersistenceResult<()>) {
    let mut written = 0;
    let result = buffer
        .iter()
        .try_for_each(|entry| -> PersistenceResult<()> {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{json}")?;
            written += 1;
            Ok(())
        })
        .and_then(|()| Ok(writer.flush()?));
    buffer.drain(..written);
    (written, result)
}

impl RecordSink for JsonLinesSink {
    fn store(&mut self, entry: PriceEntry) -> PersistenceResult<()> {
        self.add_record(entry)
    }

    fn close(&mut self) -> PersistenceResult<()> {
        JsonLinesSink::close(self)
    }
}

impl Drop for JsonLinesSink {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(?e, "Failed to flush buffer on drop");
        }
        self.close_active();
    }
}
