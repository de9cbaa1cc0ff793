//! Logger setup.
//!
//! Everything in the engine reports through the `log` facade; programs call
//! [`init_logging`] once at the top of `main` to route it to stderr.

mod init;

pub use init::{init_logging, LoggingConfig};
