use std::fmt::{self, Display, Formatter};

/// Severity of a parser diagnostic, using the host's numeric levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error = 1,
    Warn = 2,
    Info = 3,
    Detail = 4,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Fire-and-forget sink for parser complaints.
pub trait Diagnostics {
    fn report(&mut self, level: Severity, msg: &str);
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, level: Severity, msg: &str) {
        match level {
            Severity::Error => log::error!("{}", msg),
            Severity::Warn => log::warn!("{}", msg),
            Severity::Info => log::info!("{}", msg),
            Severity::Detail => log::debug!("{}", msg),
        }
    }
}

/// Keeps every message, handy for tests and the REPL `diag` command.
#[derive(Debug, Default, Clone)]
pub struct CollectingDiagnostics {
    pub messages: Vec<(Severity, String)>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages
            .iter()
            .filter(|(_, msg)| msg.contains(needle))
            .count()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&mut self, level: Severity, msg: &str) {
        log::trace!("collected [{}] {}", level, msg);
        self.messages.push((level, msg.to_string()));
    }
}
