//! CLI operation handlers.
//!
//! [`audit`] wires configuration to the audit pipeline and report file;
//! [`output`] formats the terminal summary.

pub mod audit;
pub mod output;
