use super::Plugin;
use crate::bugreport::{Bugreport, Section, DUMP_OF_SERVICE_USAGESTATS};
use crate::diagnostics::{Diagnostics, Severity};
use crate::doc::Chapter;
use crate::error::Result;
use crate::usagestats::walker::walk;
use crate::usagestats::{generate, SortKey, UsageRecord, UsageStatsExtractor};
use crate::utils::dump_tree::DumpTree;

const TAG: &str = "[UsageStatsPlugin]";

/// Builds the usage history chapter from `dumpsys usagestats`.
pub struct UsageStatsPlugin {
    section_name: String,
    sort: SortKey,
    loaded: bool,
    extractor: UsageStatsExtractor,
}

impl Default for UsageStatsPlugin {
    fn default() -> Self {
        Self::new(DUMP_OF_SERVICE_USAGESTATS, SortKey::default())
    }
}

impl UsageStatsPlugin {
    pub fn new(section_name: &str, sort: SortKey) -> Self {
        Self {
            section_name: section_name.to_string(),
            sort,
            loaded: false,
            extractor: UsageStatsExtractor::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn records(&self) -> &[UsageRecord] {
        self.extractor.records()
    }

    /// Parses an already located section.
    pub fn load_section(&mut self, section: &Section, diag: &mut dyn Diagnostics) {
        if section.is_empty() {
            diag.report(
                Severity::Info,
                &format!("{}Section is empty: {}", TAG, section.name),
            );
        }
        let tree = DumpTree::new(section.lines());
        walk(&tree, &mut self.extractor, diag);
        log::info!(
            "{} {} records from {} lines",
            TAG,
            self.extractor.records().len(),
            section.get_line_numbers()
        );
        self.loaded = true;
    }
}

impl Plugin for UsageStatsPlugin {
    fn name(&self) -> &str {
        "UsageStatsPlugin"
    }

    fn prio(&self) -> i32 {
        91
    }

    fn reset(&mut self) {
        self.loaded = false;
        self.extractor.reset();
    }

    fn load(&mut self, bugreport: &Bugreport, diag: &mut dyn Diagnostics) {
        let Some(section) = bugreport.find_section(&self.section_name) else {
            diag.report(
                Severity::Info,
                &format!(
                    "{}Section not found: {} (aborting plugin)",
                    TAG, self.section_name
                ),
            );
            log::debug!("{} available sections: {:?}", TAG, bugreport.section_names());
            return;
        };
        self.load_section(&section, diag);
    }

    fn generate(&self) -> Result<Option<Chapter>> {
        if !self.loaded {
            return Ok(None);
        }
        generate(self.extractor.records(), self.sort).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bugreport::bugreport::tests::EXAMPLE;
    use crate::diagnostics::CollectingDiagnostics;

    #[test]
    fn test_usage_stats_plugin() {
        let bugreport = Bugreport::from_text(EXAMPLE);
        let mut diag = CollectingDiagnostics::new();
        let mut plugin = UsageStatsPlugin::default();
        plugin.load(&bugreport, &mut diag);

        assert!(plugin.is_loaded());
        assert_eq!(plugin.records().len(), 1);
        assert_eq!(plugin.records()[0].package, "com.foo:");

        let chapter = plugin.generate().unwrap().unwrap();
        assert_eq!(chapter.title, "UsageHistory");
        assert_eq!(chapter.children.len(), 2);
    }

    #[test]
    fn test_missing_section_disables_plugin() {
        let bugreport = Bugreport::from_text("DUMP OF SERVICE wifi:\n  on\n");
        let mut diag = CollectingDiagnostics::new();
        let mut plugin = UsageStatsPlugin::default();
        plugin.load(&bugreport, &mut diag);

        assert!(!plugin.is_loaded());
        assert!(plugin.generate().unwrap().is_none());
        assert_eq!(diag.count_containing("Section not found"), 1);
    }

    #[test]
    fn test_empty_section_gives_empty_report() {
        let mut diag = CollectingDiagnostics::new();
        let mut plugin = UsageStatsPlugin::default();
        plugin.load_section(&Section::from_text(DUMP_OF_SERVICE_USAGESTATS, ""), &mut diag);

        assert!(plugin.is_loaded());
        assert!(plugin.records().is_empty());
        assert_eq!(diag.count_containing("Section is empty"), 1);

        let chapter = plugin.generate().unwrap().unwrap();
        assert_eq!(chapter.all_tables()[0].rows().len(), 0);
    }

    #[test]
    fn test_reload_is_deterministic() {
        let bugreport = Bugreport::from_text(EXAMPLE);
        let mut diag = CollectingDiagnostics::new();
        let mut plugin = UsageStatsPlugin::default();
        plugin.load(&bugreport, &mut diag);
        let first = plugin.records().to_vec();

        plugin.reset();
        assert!(!plugin.is_loaded());
        plugin.load(&bugreport, &mut diag);
        assert_eq!(plugin.records(), first.as_slice());
    }
}
