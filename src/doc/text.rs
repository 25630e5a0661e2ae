use std::io::{self, Write};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell as TermCell, CellAlignment, Color, Table as TermTable};

use super::{Cell, Chapter, Table};

// 256-colour grey ramp, brighter for larger values
const SHADE_BASE: u8 = 236;

/// Writes a chapter tree as an indented plain-text outline.
///
/// With `styled` set, shaded cells carry an ANSI colour whose intensity
/// follows their magnitude.
pub fn write_chapter<W: Write>(w: &mut W, chapter: &Chapter, styled: bool) -> io::Result<()> {
    write_chapter_at(w, chapter, 1, styled)
}

fn write_chapter_at<W: Write>(
    w: &mut W,
    chapter: &Chapter,
    level: usize,
    styled: bool,
) -> io::Result<()> {
    let marker = "#".repeat(level);
    match chapter.anchor {
        Some(anchor) => writeln!(w, "{} {} [{}]", marker, chapter.title, anchor)?,
        None => writeln!(w, "{} {}", marker, chapter.title)?,
    }
    writeln!(w)?;

    for table in &chapter.tables {
        write_table(w, table, styled)?;
        writeln!(w)?;
    }
    for child in &chapter.children {
        write_chapter_at(w, child, level + 1, styled)?;
    }
    Ok(())
}

pub fn shade_color(level: u8) -> Color {
    Color::AnsiValue(SHADE_BASE + level.min(9) * 2)
}

fn term_cell(cell: &Cell) -> TermCell {
    match cell {
        Cell::Link { anchor, text } => TermCell::new(format!("{} -> {}", text, anchor.href())),
        Cell::Shaded(v) => {
            let term = TermCell::new(v);
            match cell.shade() {
                Some(level) => term.fg(shade_color(level)),
                None => term,
            }
        }
        Cell::Text(s) => TermCell::new(s),
    }
}

/// Lays out one table with `comfy_table`, rows in sort order.
pub fn build_table(table: &Table, styled: bool) -> TermTable {
    let mut out = TermTable::new();
    out.load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
    if styled {
        out.enforce_styling();
    } else {
        out.force_no_tty();
    }

    let columns = table.columns();
    out.set_header(columns.iter().map(|c| TermCell::new(&c.name)).collect::<Vec<_>>());

    for row in table.sorted_rows() {
        let cells: Vec<TermCell> = row
            .iter()
            .zip(columns)
            .map(|(cell, column)| {
                let term = term_cell(cell);
                if column.flags.align_right {
                    term.set_alignment(CellAlignment::Right)
                } else {
                    term
                }
            })
            .collect();
        out.add_row(cells);
    }
    out
}

/// Writes one table, preceded by its name when it has one.
pub fn write_table<W: Write>(w: &mut W, table: &Table, styled: bool) -> io::Result<()> {
    if table.columns().is_empty() {
        return Ok(());
    }
    if let Some(name) = table.name() {
        writeln!(w, "{}", name)?;
    }
    writeln!(w, "{}", build_table(table, styled))
}
