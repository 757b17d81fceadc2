use std::sync::Mutex;

pub const TRACE_TARGET: &str = "pathmark::trace";

/// Append-only trace sink. Implementations must tolerate interleaved writes.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// Forwards every trace line to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, message: &str) {
        log::debug!(target: TRACE_TARGET, "{}", message);
    }
}

/// Keeps trace lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(message.to_string());
    }
}
