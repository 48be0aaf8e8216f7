//! Record sink trait and in-process sinks.

use crate::error::PersistenceResult;
use parking_lot::Mutex;
use std::sync::Arc;
use tickstream_core::PriceEntry;

/// Destination for normalized price entries.
pub trait RecordSink: Send {
    /// Store one entry.
    fn store(&mut self, entry: PriceEntry) -> PersistenceResult<()>;

    /// Flush buffered entries and release resources. Called once on shutdown.
    fn close(&mut self) -> PersistenceResult<()> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn store(&mut self, entry: PriceEntry) -> PersistenceResult<()> {
        (**self).store(entry)
    }

    fn close(&mut self) -> PersistenceResult<()> {
        (**self).close()
    }
}

/// Sink that accepts and discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl RecordSink for NoopSink {
    fn store(&mut self, _entry: PriceEntry) -> PersistenceResult<()> {
        Ok(())
    }
}

/// In-memory sink. Clones share the same buffer, so a caller can keep a
/// handle while the collector owns the sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<PriceEntry>>>,
    closed: Arc<Mutex<bool>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of stored entries in arrival order.
    pub fn entries(&self) -> Vec<PriceEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

impl RecordSink for MemorySink {
    fn store(&mut self, entry: PriceEntry) -> PersistenceResult<()> {
        self.entries.lock().push(entry);
        Ok(())
    }

    fn close(&mut self) -> PersistenceResult<()> {
        *self.closed.lock() = true;
        Ok(())
    }
}
