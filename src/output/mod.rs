//! Console output module
//!
//! Renders received messages and saved files for the operator.

mod formatter;

pub use formatter::ConsoleReporter;
