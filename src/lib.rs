//! Usage history report for Android bugreports.
//!
//! Locates the `DUMP OF SERVICE usagestats` section, parses its
//! indentation-nested text into [`usagestats::UsageRecord`]s and renders
//! them as a summary table plus one detail table per record.

pub mod bugreport;
pub mod cli_parser;
pub mod diagnostics;
pub mod doc;
pub mod error;
pub mod plugin;
pub mod repl;
pub mod usagestats;
pub mod utils;

pub use error::{Error, Result};
