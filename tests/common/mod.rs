//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::Value as Json;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory sink for the JSON formatter.
#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` under a thread-local JSON subscriber and returns its result
/// together with every event emitted, one JSON object per event.
pub fn capture_events<R>(f: impl FnOnce() -> R) -> (R, Vec<Json>) {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(buffer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    let events = String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (result, events)
}

/// Events at `level` (`"ERROR"`, `"DEBUG"`, ...).
pub fn at_level<'a>(events: &'a [Json], level: &str) -> Vec<&'a Json> {
    events.iter().filter(|e| e["level"] == level).collect()
}
