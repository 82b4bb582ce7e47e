//! PrefixSink - per-unit line prefixing over a shared `Output`

use std::fmt;
use std::io;

use parking_lot::Mutex;

use super::Output;

/// Writes to an [`Output`], placing `prefix` before every line.
///
/// Line state survives across writes: a chunk ending mid-line is continued
/// by the next chunk without a second prefix. Writes to one sink are
/// serialized by its own lock, and each one reaches the output as a single
/// chunk.
pub struct PrefixSink {
    prefix: String,
    output: Output,
    at_line_start: Mutex<bool>,
}

impl PrefixSink {
    pub fn new(output: Output, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            output,
            at_line_start: Mutex::new(true),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn write(&self, buf: &[u8]) -> io::Result<()> {
        if buf.is_empty() {
            return Ok(());
        }

        // held across the output write so same-unit chunks keep their order
        let mut at_line_start = self.at_line_start.lock();
        let mut next = *at_line_start;
        let framed = frame(&self.prefix, buf, &mut next);
        // a dropped chunk must not move the line state
        self.output.write_all(&framed)?;
        *at_line_start = next;
        Ok(())
    }

    pub fn write_str(&self, s: &str) -> io::Result<()> {
        self.write(s.as_bytes())
    }
}

/// Insert `prefix` at the start of every line of `buf`.
fn frame(prefix: &str, buf: &[u8], at_line_start: &mut bool) -> Vec<u8> {
    let lines = buf.iter().filter(|b| **b == b'\n').count() + 1;
    let mut framed = Vec::with_capacity(buf.len() + lines * prefix.len());

    for line in buf.split_inclusive(|b| *b == b'\n') {
        if *at_line_start {
            framed.extend_from_slice(prefix.as_bytes());
        }
        framed.extend_from_slice(line);
        *at_line_start = line.ends_with(b"\n");
    }
    framed
}

impl fmt::Debug for PrefixSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixSink")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
