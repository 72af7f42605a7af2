/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

const COLUMN_SEPARATOR: &str = "   ";
const HEADER_RULE: char = '=';

/// Plain-text table with a header row and an `=` rule under it
///
/// Columns are as wide as their widest cell. Header cells are always centered; body
/// cells use the column alignment. No outer border is drawn.
///
/// Cells are never wrapped, so a table wider than 80 columns stays on one line per
/// row where a texttable renderer would wrap long cells.
#[derive(Debug, Clone)]
pub struct TextTable {
    header: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let align = vec![Align::Left; header.len()];
        Self {
            header,
            align,
            rows: Vec::new(),
        }
    }

    pub fn with_align(mut self, align: &[Align]) -> Self {
        for (slot, value) in self.align.iter_mut().zip(align) {
            *slot = *value;
        }
        self
    }

    pub fn add_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|cell| cell_width(cell)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width(cell));
            }
        }
        widths
    }

    /// Render the table; every line, the last included, ends with a newline
    pub fn draw(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header_align = vec![Align::Center; self.header.len()];
        draw_line(&mut out, &self.header, &widths, &header_align);

        let rule: Vec<String> = widths
            .iter()
            .map(|&width| HEADER_RULE.to_string().repeat(width))
            .collect();
        let separator = HEADER_RULE.to_string().repeat(COLUMN_SEPARATOR.len());
        out.push_str(&rule.join(separator.as_str()));
        out.push('\n');

        for row in &self.rows {
            draw_line(&mut out, row, &widths, &self.align);
        }
        out
    }
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

fn draw_line(out: &mut String, cells: &[String], widths: &[usize], align: &[Align]) {
    let rendered: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(align)
        .map(|((cell, &width), &align)| pad(cell, width, align))
        .collect();
    out.push_str(&rendered.join(COLUMN_SEPARATOR));
    out.push('\n');
}

/// Pad `cell` to `width`; centered cells put the odd space on the right
fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(cell_width(cell));
    match align {
        Align::Left => format!("{}{}", cell, " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), cell, " ".repeat(fill - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_alignments() {
        assert_eq!(pad("ab", 5, Align::Left), "ab   ");
        assert_eq!(pad("ab", 5, Align::Center), " ab  ");
        assert_eq!(pad("abc", 2, Align::Center), "abc");
    }

    #[test]
    fn test_draw_header_only() {
        let table = TextTable::new(["A", "Longer"]);
        assert_eq!(table.draw(), "A   Longer\n==========\n");
    }

    #[test]
    fn test_draw_widens_to_cells() {
        let mut table = TextTable::new(["X", "Y"]).with_align(&[Align::Left, Align::Center]);
        table.add_row(["wide-cell", "1"]);
        table.add_row(["z", "22"]);
        assert_eq!(
            table.draw(),
            "    X       Y \n\
             ==============\n\
             wide-cell   1 \n\
             z           22\n"
        );
    }

    #[test]
    fn test_wide_table_is_not_wrapped() {
        let name = "t".repeat(90);
        let mut table = TextTable::new(["Team"]);
        table.add_row([name.as_str()]);
        let drawn = table.draw();
        assert_eq!(drawn.lines().count(), 3);
        assert_eq!(drawn.lines().nth(2), Some(name.as_str()));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = TextTable::new(["a", "b"]);
        table.add_row(["x"]);
        assert_eq!(table.draw(), "a   b\n=====\nx    \n");
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let mut table = TextTable::new(["T"]);
        table.add_row(["café"]);
        assert_eq!(table.draw(), " T  \n====\ncafé\n");
    }
}
