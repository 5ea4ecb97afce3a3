//! Output stream with nested capture buffers
//!
//! Rendered text goes to the innermost open capture buffer, or to the sink
//! when no capture is open. Captures nest strictly: each one is released in
//! reverse order of acquisition, and a [`CaptureGuard`] releases its buffer
//! on drop so a failed render never leaves a capture open.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::Result;

struct State {
    sink: Box<dyn Write + Send>,
    buffers: Vec<String>,
}

/// The active output stream
pub struct Output {
    state: Mutex<State>,
}

impl Output {
    /// Create an output stream writing to `sink`
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            state: Mutex::new(State {
                sink: Box::new(sink),
                buffers: Vec::new(),
            }),
        }
    }

    /// Output stream writing to stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Write text to the innermost capture, or to the sink
    pub fn write(&self, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match state.buffers.last_mut() {
            Some(buffer) => buffer.push_str(text),
            None => {
                state.sink.write_all(text.as_bytes())?;
                state.sink.flush()?;
            }
        }
        Ok(())
    }

    /// Open a capture buffer; everything written until the guard finishes is collected
    pub fn start_capture(&self) -> CaptureGuard<'_> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.buffers.push(String::new());
        let depth = state.buffers.len();
        debug!(depth, "Output::start_capture");
        CaptureGuard {
            output: self,
            depth,
            released: false,
        }
    }

    /// Run `f` inside a capture and return what it wrote
    ///
    /// The capture is released whether or not `f` succeeds.
    pub fn capture<F>(&self, f: F) -> Result<String>
    where
        F: FnOnce() -> Result<()>,
    {
        let guard = self.start_capture();
        f()?;
        Ok(guard.finish())
    }

    /// Number of open captures
    pub fn depth(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.buffers.len()
    }

    fn release(&self, depth: usize) -> String {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        // Anything an inner capture left open is folded into this one
        let mut text = String::new();
        while state.buffers.len() >= depth {
            let Some(buffer) = state.buffers.pop() else {
                break;
            };
            text.insert_str(0, &buffer);
        }
        debug!(depth, bytes = text.len(), "Output::release");
        text
    }
}

/// An open capture buffer
pub struct CaptureGuard<'a> {
    output: &'a Output,
    depth: usize,
    released: bool,
}

impl CaptureGuard<'_> {
    /// Close the capture and return its contents
    pub fn finish(mut self) -> String {
        self.released = true;
        self.output.release(self.depth)
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            let discarded = self.output.release(self.depth);
            debug!(bytes = discarded.len(), "CaptureGuard::drop: discarded capture");
        }
    }
}

/// Cloneable in-memory sink, handy for collecting what reached the stream
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Drain and return everything written so far
    pub fn take(&self) -> String {
        let mut bytes = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        let text = String::from_utf8_lossy(&bytes).into_owned();
        bytes.clear();
        text
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut bytes = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
