//! quadmaze CLI library.
//!
//! Command handlers, logging setup and output formatting for the `quadmaze`
//! binary.

pub mod commands;
pub mod logging;
pub mod output;
