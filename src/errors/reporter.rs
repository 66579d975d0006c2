//! Diagnostic sinks.
//!
//! The parser never prints anything itself: it hands every diagnostic to a
//! [`Reporter`], which decides whether and how to show it.

use log::debug;

use crate::config::Options;

use super::errors::{Diagnostic, Severity};

/// Output layer for diagnostics.
pub trait Reporter {
    fn print_message(&mut self, diagnostic: &Diagnostic);
    fn print_warning(&mut self, diagnostic: &Diagnostic);
    fn print_error(&mut self, diagnostic: &Diagnostic);

    /// Routes `diagnostic` to the sink matching its severity.
    fn report(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity() {
            Severity::Message => self.print_message(diagnostic),
            Severity::Warning => self.print_warning(diagnostic),
            Severity::Error => self.print_error(diagnostic),
        }
    }
}

/// Prints rendered diagnostics to standard error, honouring the
/// suppression flags of the options snapshot.
pub struct ConsoleReporter {
    options: Options,
}

impl ConsoleReporter {
    pub fn new(options: Options) -> Self {
        ConsoleReporter { options }
    }
}

impl Reporter for ConsoleReporter {
    fn print_message(&mut self, diagnostic: &Diagnostic) {
        if self.options.print_messages {
            eprintln!("{}", diagnostic.render());
        } else {
            debug!("suppressed message: {}", diagnostic);
        }
    }

    fn print_warning(&mut self, diagnostic: &Diagnostic) {
        if self.options.print_warnings {
            eprintln!("{}", diagnostic.render());
        } else {
            debug!("suppressed warning: {}", diagnostic);
        }
    }

    fn print_error(&mut self, diagnostic: &Diagnostic) {
        if self.options.print_errors {
            eprintln!("{}", diagnostic.render());
        } else {
            debug!("suppressed error: {}", diagnostic);
        }
    }
}

/// Keeps every diagnostic in memory, in report order.
#[derive(Debug, Default)]
pub struct DiagnosticBuffer {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBuffer {
    pub fn new() -> Self {
        DiagnosticBuffer::default()
    }

    pub fn of_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.severity() == severity)
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.of_severity(Severity::Error).collect()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.of_severity(Severity::Warning).collect()
    }

    pub fn messages(&self) -> Vec<&Diagnostic> {
        self.of_severity(Severity::Message).collect()
    }

    /// Whether a diagnostic with the given name was reported.
    pub fn contains(&self, name: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.get_error_name() == name)
    }
}

impl Reporter for DiagnosticBuffer {
    fn print_message(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn print_warning(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn print_error(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}
