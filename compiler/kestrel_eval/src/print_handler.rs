//! Output sink behind the `print` native.
//!
//! `print` renders its arguments and hands one line to the session's sink:
//! - `Stdout` for command-line hosts
//! - `Buffer` for tests and embedders that inspect output afterwards
//! - `Forward` for hosts that route lines elsewhere (a UI, a channel)
//! - `Silent` to drop output
//!
//! Enum dispatch keeps the common sinks free of vtable calls.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::Value;

/// Callback for [`PrintHandlerImpl::Forward`].
pub type LineCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Captures printed lines in order.
#[derive(Default)]
pub struct BufferPrintHandler {
    lines: Mutex<Vec<String>>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }

    /// Captured lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Captured output with each line newline-terminated.
    pub fn output(&self) -> String {
        let lines = self.lines.lock();
        let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines.iter() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Print sink.
pub enum PrintHandlerImpl {
    Stdout,
    Buffer(BufferPrintHandler),
    Forward(LineCallback),
    Silent,
}

impl PrintHandlerImpl {
    /// Emit one line of output.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(buffer) => buffer.push_line(line),
            Self::Forward(callback) => callback(line),
            Self::Silent => {}
        }
    }

    /// Render values space-separated and emit them as one line.
    pub fn print_values(&self, values: &[Value]) {
        if matches!(self, Self::Silent) {
            return;
        }
        let line = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.println(&line);
    }

    /// Captured output; empty for sinks that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.output(),
            Self::Stdout | Self::Forward(_) | Self::Silent => String::new(),
        }
    }

    /// Captured lines; empty for sinks that do not capture.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Buffer(buffer) => buffer.lines(),
            Self::Stdout | Self::Forward(_) | Self::Silent => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.clear();
        }
    }
}

/// Print sink shared between the interpreter, natives and the host.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Sink that hands each line to `callback`.
pub fn forward_handler(callback: impl Fn(&str) + Send + Sync + 'static) -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Forward(Box::new(callback)))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
