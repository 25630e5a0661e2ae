use crate::doc::Anchor;

/// Bucket descriptor used when an action line carries none.
pub const NO_BUCKET: &str = "NA";

/// One `<activity>: <n> starts[, <buckets>]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub action: String,
    pub starts: u64,
    pub count: String,
}

impl ActionRecord {
    #[rustfmt::skip]
    pub fn new(action: &str, starts: u64, count: &str) -> Self {
        Self { action: action.to_string(), starts, count: count.to_string() }
    }
}

/// One `<package> <n> times, <t> ms` line and the action lines nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub package: String,
    pub launch_count: u64,
    pub usage_time_ms: u64,
    pub date: String,
    pub actions: Vec<ActionRecord>,
    pub anchor: Anchor,
}
