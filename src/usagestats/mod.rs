//! Parsing and reporting of the `dumpsys usagestats` section.
//!
//! The section is turned into a [`DumpTree`](crate::utils::dump_tree::DumpTree),
//! the [`walker`] splits it into date blocks, the [`extractor`] reads usage
//! and action lines, and the [`renderer`] projects the records into tables.

pub mod extractor;
pub mod model;
pub mod renderer;
pub mod walker;

pub use extractor::UsageStatsExtractor;
pub use model::{ActionRecord, UsageRecord, NO_BUCKET};
pub use renderer::{generate, SortKey};
pub use walker::parse_usage_stats;
