use crate::bugreport::Bugreport;
use crate::diagnostics::Diagnostics;
use crate::doc::Chapter;
use crate::error::Result;

pub mod usage_stats_plugin;

pub use usage_stats_plugin::UsageStatsPlugin;

/// A report section producer: loads data from a bugreport, then renders it.
pub trait Plugin {
    fn name(&self) -> &str;

    /// Lower runs first.
    fn prio(&self) -> i32;

    /// Drops everything loaded by a previous run.
    fn reset(&mut self);

    fn load(&mut self, bugreport: &Bugreport, diag: &mut dyn Diagnostics);

    /// `None` when nothing was loaded.
    fn generate(&self) -> Result<Option<Chapter>>;
}
