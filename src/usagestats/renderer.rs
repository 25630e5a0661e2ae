use std::collections::HashSet;

use clap::ValueEnum;

use super::model::UsageRecord;
use crate::doc::{Cell, Chapter, Column, ColumnFlags, Table, TableBuilder};
use crate::error::Result;
use crate::utils::time_utils::format_ts;

pub const CHAPTER_MAIN: &str = "UsageHistory";
pub const CHAPTER_LIST: &str = "UsageHistory List";
pub const CHAPTER_DETAILED: &str = "UsageHistory detailed";

/// Default ordering of the summary table.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    Pkg,
    LaunchCount,
    #[default]
    UsageTime,
    Date,
}

impl SortKey {
    fn column(self) -> usize {
        match self {
            SortKey::Pkg => 0,
            SortKey::LaunchCount => 1,
            SortKey::UsageTime => 2,
            SortKey::Date => 4,
        }
    }
}

/// Fills `table` with one row per record.
pub fn render_summary<T: TableBuilder + ?Sized>(
    records: &[UsageRecord],
    table: &mut T,
) -> Result<()> {
    table.add_column(Column::new("Pkg", ColumnFlags::NONE).with_csv_field("pkg"))?;
    table.add_column(
        Column::new("LaunchCount", ColumnFlags::ALIGN_RIGHT).with_csv_field("LaunchCount int"),
    )?;
    table.add_column(
        Column::new("UsageTime(ms)", ColumnFlags::SORT).with_csv_field("UsageTime_ms int"),
    )?;
    table.add_column(
        Column::new("UsageTime", ColumnFlags::ALIGN_RIGHT).with_csv_field("UsageTime varchar"),
    )?;
    table.add_column(Column::new("Date", ColumnFlags::NONE).with_csv_field("date"))?;
    table.begin()?;

    for record in records {
        table.add_row(vec![
            Cell::Link {
                anchor: record.anchor,
                text: record.package.clone(),
            },
            Cell::Shaded(record.launch_count),
            Cell::Shaded(record.usage_time_ms),
            Cell::Text(format_ts(record.usage_time_ms)),
            Cell::Text(record.date.clone()),
        ])?;
    }
    table.end()
}

/// Fills `table` with the actions of one record.
pub fn render_detail<T: TableBuilder + ?Sized>(record: &UsageRecord, table: &mut T) -> Result<()> {
    table.add_column(Column::new("Action", ColumnFlags::NONE))?;
    table.add_column(Column::new("LaunchTimes", ColumnFlags::ALIGN_RIGHT))?;
    table.add_column(Column::new("Count", ColumnFlags::NONE))?;
    table.begin()?;

    for action in &record.actions {
        table.add_row(vec![
            Cell::Text(action.action.clone()),
            Cell::Shaded(action.starts),
            Cell::Text(action.count.clone()),
        ])?;
    }
    table.end()
}

/// Builds the "UsageHistory" chapter: the summary list and one detail
/// chapter per record, anchored so the summary links resolve.
pub fn generate(records: &[UsageRecord], sort: SortKey) -> Result<Chapter> {
    let mut main = Chapter::new(CHAPTER_MAIN);

    let mut list = Chapter::new(CHAPTER_LIST);
    let mut summary = Table::new();
    summary.set_table_name("UsageHistory");
    summary.set_csv_output("UsageHistory");
    summary.set_sort_column(sort.column())?;
    render_summary(records, &mut summary)?;
    list.add_table(summary);
    main.add_chapter(list);

    let mut detailed = Chapter::new(CHAPTER_DETAILED);
    let mut seen = HashSet::new();
    for record in records {
        let mut child = Chapter::new(&record.package).with_anchor(record.anchor);
        let mut table = Table::new();
        // the same package shows up once per date
        let csv_name = if seen.insert(record.package.as_str()) {
            format!("UsageHistory_detailed_{}", record.package)
        } else {
            format!("UsageHistory_detailed_{}_{}", record.package, record.anchor)
        };
        table.set_csv_output(&csv_name);
        render_detail(record, &mut table)?;
        child.add_table(table);
        detailed.add_chapter(child);
    }
    main.add_chapter(detailed);

    log::debug!("generated usage history for {} records", records.len());
    Ok(main)
}
