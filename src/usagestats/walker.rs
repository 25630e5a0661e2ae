use super::extractor::UsageStatsExtractor;
use super::model::UsageRecord;
use crate::diagnostics::{Diagnostics, Severity};
use crate::utils::dump_tree::DumpTree;

pub const OLD_DATA_VERSION_SUFFIX: &str = "(old data version)";
pub const DATE_PREFIX: &str = "Date:";

/// Date token of a `Date: <date> ...` line, if any.
pub fn parse_date_label(line: &str) -> Option<&str> {
    line.strip_prefix(DATE_PREFIX)?.split_whitespace().next()
}

/// Walks the top level of the tree and extracts every date block.
///
/// A date block is the children of a `Date:` line plus, for dumps that
/// do not indent, the top-level lines after it up to the next `Date:`.
/// The old-data-version marker is only reported, the block is still read.
/// Top-level lines before the first `Date:` are ignored.
pub fn walk(tree: &DumpTree, extractor: &mut UsageStatsExtractor, diag: &mut dyn Diagnostics) {
    let mut current_date: Option<&str> = None;

    for item in tree.root().children() {
        let line = item.line();
        let old_data = line.ends_with(OLD_DATA_VERSION_SUFFIX);
        if old_data {
            diag.report(
                Severity::Info,
                &format!("[UsageStats] old data version marker: {}", line),
            );
        }

        if line.starts_with(DATE_PREFIX) {
            let date = match parse_date_label(line) {
                Some(date) => date,
                None => {
                    diag.report(
                        Severity::Warn,
                        &format!("[UsageStats] date header without a date: {}", line),
                    );
                    ""
                }
            };
            log::trace!("date block {} with {} nested entries", date, item.child_count());
            current_date = Some(date);
            for child in item.children() {
                extractor.extract(child, date, diag);
            }
        } else if old_data {
            continue;
        } else if let Some(date) = current_date {
            extractor.extract(item, date, diag);
        }
    }
}

/// Parses a whole usagestats section body with a fresh extractor.
pub fn parse_usage_stats<'a, I>(lines: I, diag: &mut dyn Diagnostics) -> Vec<UsageRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let tree = DumpTree::new(lines);
    if tree.is_empty() {
        log::debug!("usagestats section is empty");
        return Vec::new();
    }
    let mut extractor = UsageStatsExtractor::new();
    walk(&tree, &mut extractor, diag);
    extractor.into_records()
}
