use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Chapter, Table};
use crate::error::Result;

/// Replaces anything outside `[A-Za-z0-9._-]` so the name is a safe file stem.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Writes one table as CSV: header row from the columns' csv fields,
/// then the rows in insertion order.
pub fn write_table<W: io::Write>(w: W, table: &Table) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(w);
    wtr.write_record(table.columns().iter().map(|c| c.csv_header()))?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|cell| cell.text()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports every table of `chapter` that has a csv name into `dir`.
///
/// Returns the written paths in document order. Two tables asking for the
/// same name get a numeric suffix.
pub fn export(chapter: &Chapter, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut used = HashSet::new();
    let mut written = Vec::new();
    for table in chapter.all_tables() {
        let Some(name) = table.csv_name() else {
            continue;
        };
        let stem = sanitize_file_name(name);
        let mut file_name = format!("{}.csv", stem);
        let mut n = 1;
        while !used.insert(file_name.clone()) {
            file_name = format!("{}_{}.csv", stem, n);
            n += 1;
        }

        let path = dir.join(&file_name);
        log::debug!("Writing csv: {}", path.display());
        write_table(fs::File::create(&path)?, table)?;
        written.push(path);
    }
    Ok(written)
}
