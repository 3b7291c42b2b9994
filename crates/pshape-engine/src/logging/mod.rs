//! Logging utilities.
//!
//! Shape authoring never panics on misuse; it reports through the `log`
//! facade instead. This module owns the one-time backend setup.

mod init;

pub use init::{init_logging, LoggingConfig};
