//! Minimal report document model.
//!
//! Parsers project their results into [`Chapter`]s holding [`Table`]s;
//! the writers in [`text`] and [`csv`] turn those into output.

use std::fmt::{self, Display, Formatter};

pub mod csv;
pub mod table;
pub mod text;

pub use table::{Table, TableBuilder};

/// Link target shared by a heading and the links pointing at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Anchor {
    id: usize,
}

impl Anchor {
    pub fn new(id: usize) -> Self {
        Self { id }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> String {
        format!("a{}", self.id)
    }

    pub fn href(&self) -> String {
        format!("#{}", self.name())
    }
}

impl Display for Anchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    pub sort: bool,
    pub align_right: bool,
}

impl ColumnFlags {
    pub const NONE: ColumnFlags = ColumnFlags {
        sort: false,
        align_right: false,
    };
    pub const SORT: ColumnFlags = ColumnFlags {
        sort: true,
        align_right: false,
    };
    pub const ALIGN_RIGHT: ColumnFlags = ColumnFlags {
        sort: false,
        align_right: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub flags: ColumnFlags,
    /// Header used when the table is exported as CSV.
    pub csv_field: Option<String>,
}

impl Column {
    pub fn new(name: &str, flags: ColumnFlags) -> Self {
        Self {
            name: name.to_string(),
            flags,
            csv_field: None,
        }
    }

    pub fn with_csv_field(mut self, field: &str) -> Self {
        self.csv_field = Some(field.to_string());
        self
    }

    pub fn csv_header(&self) -> &str {
        self.csv_field.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Link { anchor: Anchor, text: String },
    /// Numeric value drawn with an intensity that grows with its magnitude.
    Shaded(u64),
}

impl Cell {
    pub fn text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Link { text, .. } => text.clone(),
            Cell::Shaded(v) => v.to_string(),
        }
    }

    pub fn numeric(&self) -> Option<u64> {
        match self {
            Cell::Shaded(v) => Some(*v),
            _ => None,
        }
    }

    /// Shade level in `0..=9`, roughly the number of decimal digits minus one.
    pub fn shade(&self) -> Option<u8> {
        self.numeric()
            .map(|v| v.checked_ilog10().unwrap_or(0).min(9) as u8)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<u64> for Cell {
    fn from(v: u64) -> Self {
        Cell::Shaded(v)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chapter {
    pub title: String,
    pub anchor: Option<Anchor>,
    pub tables: Vec<Table>,
    pub children: Vec<Chapter>,
}

impl Chapter {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.children.push(chapter);
    }

    pub fn child(&self, title: &str) -> Option<&Chapter> {
        self.children.iter().find(|c| c.title == title)
    }

    /// Depth-first lookup of the chapter carrying `anchor`.
    pub fn find_anchor(&self, anchor: Anchor) -> Option<&Chapter> {
        if self.anchor == Some(anchor) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_anchor(anchor))
    }

    /// Every table in the chapter tree, in document order.
    pub fn all_tables(&self) -> Vec<&Table> {
        let mut out: Vec<&Table> = self.tables.iter().collect();
        for child in &self.children {
            out.extend(child.all_tables());
        }
        out
    }
}
