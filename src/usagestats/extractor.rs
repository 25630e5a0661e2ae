use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::model::{ActionRecord, UsageRecord, NO_BUCKET};
use crate::diagnostics::{Diagnostics, Severity};
use crate::doc::Anchor;
use crate::utils::dump_tree::Node;
use crate::utils::time_utils::parse_relative_timestamp;

lazy_static! {
    // com.android.launcher: 1 times, 63280 ms
    pub static ref USAGE_LINE: Regex =
        Regex::new(r"^(.*) ([0-9]+) times, ([0-9]+) ms$").unwrap();
    // com.android.launcher2.Launcher: 1 starts, 1000-1500ms=1
    pub static ref ACTION_WITH_BUCKET: Regex =
        Regex::new(r"^(.*): ([0-9]+) starts, (.*)$").unwrap();
    // com.android.launcher2.Launcher: 1 starts
    pub static ref ACTION_NO_BUCKET: Regex = Regex::new(r"^(.*): ([0-9]+) starts$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionMatch {
    Matched(ActionRecord),
    Unmatched,
}

type ActionRule = (&'static Regex, fn(&Captures) -> Option<ActionRecord>);

fn bucketed_action(caps: &Captures) -> Option<ActionRecord> {
    Some(ActionRecord::new(&caps[1], caps[2].parse().ok()?, &caps[3]))
}

fn plain_action(caps: &Captures) -> Option<ActionRecord> {
    Some(ActionRecord::new(&caps[1], caps[2].parse().ok()?, NO_BUCKET))
}

// first match wins, so the bucketed form must stay in front
fn action_rules() -> [ActionRule; 2] {
    let bucketed: ActionRule = (&*ACTION_WITH_BUCKET, bucketed_action);
    let plain: ActionRule = (&*ACTION_NO_BUCKET, plain_action);
    [bucketed, plain]
}

/// Classifies a single action line.
pub fn match_action(line: &str) -> ActionMatch {
    for (re, build) in action_rules() {
        if let Some(caps) = re.captures(line) {
            if let Some(action) = build(&caps) {
                return ActionMatch::Matched(action);
            }
        }
    }
    ActionMatch::Unmatched
}

/// Package, launch count and usage time of a usage line.
pub fn match_usage(line: &str) -> Option<(String, u64, u64)> {
    let caps = USAGE_LINE.captures(line)?;
    // kept verbatim, a trailing ':' included
    let package = caps[1].to_string();
    let launch_count = caps[2].parse().ok()?;
    let usage_time_ms = parse_relative_timestamp(&caps[3])?;
    Some((package, launch_count, usage_time_ms))
}

/// Turns usage nodes into [`UsageRecord`]s.
///
/// Holds the anchor counter for one report run; call [`reset`](Self::reset)
/// or build a new extractor before parsing another section.
#[derive(Debug, Default)]
pub struct UsageStatsExtractor {
    next_anchor: usize,
    records: Vec<UsageRecord>,
}

impl UsageStatsExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.next_anchor = 0;
        self.records.clear();
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<UsageRecord> {
        self.records
    }

    /// Parses `node` as a usage line and its children as action lines.
    ///
    /// An unparsable usage line drops the whole subtree. The first
    /// unparsable action line ends action parsing for this record; the
    /// record keeps the actions read before it.
    pub fn extract(
        &mut self,
        node: Node<'_>,
        date: &str,
        diag: &mut dyn Diagnostics,
    ) -> Option<Anchor> {
        let Some((package, launch_count, usage_time_ms)) = match_usage(node.line()) else {
            diag.report(
                Severity::Detail,
                &format!("Cannot parse alarm stat: {}", node.line()),
            );
            return None;
        };

        let anchor = Anchor::new(self.next_anchor);
        self.next_anchor += 1;

        let mut actions = Vec::with_capacity(node.child_count());
        for child in node.children() {
            match match_action(child.line()) {
                ActionMatch::Matched(action) => actions.push(action),
                ActionMatch::Unmatched => {
                    diag.report(
                        Severity::Detail,
                        &format!("Cannot parse action stat: {}", child.line()),
                    );
                    break;
                }
            }
        }

        self.records.push(UsageRecord {
            package,
            launch_count,
            usage_time_ms,
            date: date.to_string(),
            actions,
            anchor,
        });
        Some(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::utils::dump_tree::DumpTree;

    #[test]
    fn test_match_action_with_bucket() {
        assert_eq!(
            match_action("com.android.launcher2.Launcher: 1 starts, 1000-1500ms=1"),
            ActionMatch::Matched(ActionRecord::new(
                "com.android.launcher2.Launcher",
                1,
                "1000-1500ms=1"
            ))
        );
    }

    #[test]
    fn test_match_action_without_bucket() {
        assert_eq!(
            match_action("com.foo.Bar: 12 starts"),
            ActionMatch::Matched(ActionRecord::new("com.foo.Bar", 12, "NA"))
        );
    }

    #[test]
    fn test_match_action_rejects() {
        assert_eq!(match_action("com.foo.Bar: many starts"), ActionMatch::Unmatched);
        assert_eq!(match_action("com.foo.Bar 3 starts"), ActionMatch::Unmatched);
        assert_eq!(
            match_action("com.foo.Bar: 99999999999999999999999 starts"),
            ActionMatch::Unmatched
        );
    }

    #[test]
    fn test_match_usage() {
        assert_eq!(
            match_usage("com.foo 2 times, 5000 ms"),
            Some(("com.foo".to_string(), 2, 5000))
        );
        assert_eq!(
            match_usage("com.android.launcher: 1 times, 63280 ms"),
            Some(("com.android.launcher:".to_string(), 1, 63280))
        );
        assert_eq!(match_usage("com.foo 2 times"), None);
        assert_eq!(match_usage("com.foo two times, 5 ms"), None);
    }

    #[test]
    fn test_extract_truncates_after_bad_action() {
        let tree = DumpTree::from_text(
            "com.foo 2 times, 5000 ms\n  a.One: 1 starts\n  a.Two: 2 starts, x=1\n  garbage\n  a.Four: 4 starts",
        );
        let mut diag = CollectingDiagnostics::new();
        let mut extractor = UsageStatsExtractor::new();
        let node = tree.root().child(0).unwrap();

        let anchor = extractor.extract(node, "20240816", &mut diag);
        assert_eq!(anchor, Some(Anchor::new(0)));

        let record = &extractor.records()[0];
        assert_eq!(record.actions.len(), 2);
        assert_eq!(record.actions[1], ActionRecord::new("a.Two", 2, "x=1"));
        assert_eq!(diag.count_containing("Cannot parse action stat: garbage"), 1);
    }

    #[test]
    fn test_unparsable_usage_takes_no_anchor() {
        let tree = DumpTree::from_text("bogus line\n  a.One: 1 starts\ncom.foo 1 times, 1 ms");
        let mut diag = CollectingDiagnostics::new();
        let mut extractor = UsageStatsExtractor::new();

        let first = tree.root().child(0).unwrap();
        let second = tree.root().child(1).unwrap();
        assert_eq!(extractor.extract(first, "d", &mut diag), None);
        assert_eq!(extractor.extract(second, "d", &mut diag), Some(Anchor::new(0)));
        assert_eq!(extractor.records().len(), 1);
        assert_eq!(diag.count_containing("Cannot parse alarm stat"), 1);
    }

    #[test]
    fn test_reset_restarts_anchors() {
        let tree = DumpTree::from_text("com.foo 1 times, 1 ms");
        let node = tree.root().child(0).unwrap();
        let mut diag = CollectingDiagnostics::new();
        let mut extractor = UsageStatsExtractor::new();
        extractor.extract(node, "d", &mut diag);
        extractor.extract(node, "d", &mut diag);
        assert_eq!(extractor.records()[1].anchor, Anchor::new(1));

        extractor.reset();
        assert!(extractor.records().is_empty());
        assert_eq!(extractor.extract(node, "d", &mut diag), Some(Anchor::new(0)));
    }
}
