//! Column-aligned status table
//!
//! Widths are measured on the unstyled text so ANSI escapes never skew the
//! alignment; emoji count as two columns.

use unicode_width::UnicodeWidthStr;

/// One table cell: the text as measured and the text as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    plain: String,
    styled: String,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        let plain = text.into();
        Self {
            styled: plain.clone(),
            plain,
        }
    }

    pub fn styled(plain: impl Into<String>, styled: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            styled: styled.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.plain
    }

    pub fn rendered(&self) -> &str {
        &self.styled
    }

    pub fn width(&self) -> usize {
        self.plain.width()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    cells: Vec<Cell>,
}

impl StatusRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rendered cells joined by tabs; rows sort on this.
    pub fn sort_key(&self) -> String {
        self.cells
            .iter()
            .map(Cell::rendered)
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Sort `rows` by rendered text and lay them out with `padding` spaces
/// between columns. The last column of each row is never padded.
pub fn render_table(mut rows: Vec<StatusRow>, padding: usize) -> String {
    rows.sort_by_cached_key(StatusRow::sort_key);

    let columns = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &rows {
        for (i, cell) in row.cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let last = row.cells.len().saturating_sub(1);
        for (i, cell) in row.cells.iter().enumerate() {
            out.push_str(cell.rendered());
            if i < last {
                let fill = widths[i] - cell.width() + padding;
                out.extend(std::iter::repeat(' ').take(fill));
            }
        }
        out.push('\n');
    }
    out
}
