//! Output plumbing for console reporters
//!
//! - `Output`: the one physical stream every unit writes to. All writes go
//!   through a single mutex so chunks from different units never interleave.
//! - `PrefixSink`: per-unit view of an `Output` that prefixes every line.
//! - `WriterRegistry`: unit name -> sink, guarded by a reader/writer lock.

mod registry;
mod sink;

pub use registry::WriterRegistry;
pub use sink::PrefixSink;

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Shared, serialized handle to an output stream.
///
/// Cloning is cheap; all clones write to the same stream.
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Process standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// In-memory output, for tests and for embedding reports elsewhere.
    pub fn capture() -> (Self, Capture) {
        let capture = Capture::default();
        (Self::new(capture.clone()), capture)
    }

    /// Write `buf` as one uninterrupted chunk, then flush.
    pub fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writer.write_all(buf)?;
        writer.flush()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}

/// Thread-safe in-memory collector. Implements `Write`.
#[derive(Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    failing: Arc<AtomicBool>,
}

impl Capture {
    /// Everything written so far (lossy UTF-8).
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buf.lock().clone()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }

    /// While set, every write fails with `BrokenPipe` and nothing is kept.
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
        }
        self.buf.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("len", &self.buf.lock().len())
            .finish()
    }
}
