//! Fixed-width tables
//!
//! Column widths are fixed per report, never computed from the data.
//! A value wider than its column is printed in full and pushes the rest
//! of the line to the right; nothing is truncated.

use std::fmt::{self, Display};
use std::io::{self, Write};

/// One column: title and fixed width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

impl Column {
    pub const fn new(title: &'static str, width: usize) -> Self {
        Column { title, width }
    }
}

/// Column layout plus the width of the `-` rule under the header
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    columns: &'a [Column],
    rule_width: usize,
}

impl<'a> Table<'a> {
    pub const fn new(columns: &'a [Column], rule_width: usize) -> Self {
        Table {
            columns,
            rule_width,
        }
    }

    /// Titles padded to their widths, single-space separated
    pub fn header_line(&self) -> String {
        let cells: Vec<&dyn Display> = self.columns.iter().map(|c| &c.title as &dyn Display).collect();
        self.format_row(&cells)
    }

    /// Cells left-aligned to the column widths
    ///
    /// Cells beyond the number of columns are ignored; missing cells leave
    /// the line short.
    pub fn format_row(&self, cells: &[&dyn Display]) -> String {
        self.columns
            .iter()
            .zip(cells)
            .map(|(col, cell)| format!("{:<width$}", cell, width = col.width))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Header line followed by the rule
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.header_line())?;
        writeln!(out, "{}", rule('-', self.rule_width))
    }

    pub fn write_row<W: Write>(&self, out: &mut W, cells: &[&dyn Display]) -> io::Result<()> {
        writeln!(out, "{}", self.format_row(cells))
    }
}

/// `ch` repeated `width` times
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// `=` rule, title, `=` rule
pub fn banner<W: Write>(out: &mut W, title: &str, width: usize) -> io::Result<()> {
    writeln!(out, "{}", rule('=', width))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule('=', width))
}

/// Processed flag rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessedMark {
    /// `TRUE` / `FALSE`
    Plain(bool),
    /// `✅ TRUE` / `❌ FALSE`
    Marked(bool),
}

impl Display for ProcessedMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so the mark honours column widths
        match self {
            ProcessedMark::Plain(true) => f.pad("TRUE"),
            ProcessedMark::Plain(false) => f.pad("FALSE"),
            ProcessedMark::Marked(true) => f.pad("✅ TRUE"),
            ProcessedMark::Marked(false) => f.pad("❌ FALSE"),
        }
    }
}
