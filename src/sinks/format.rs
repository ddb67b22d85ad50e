use std::borrow::Cow;

use crate::record::CellValue;

const SEPARATOR: char = ',';

/// Quotes a cell when it holds a separator, quote or line break.
pub(super) fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([SEPARATOR, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Renders cells as one CSV record terminated by a newline.
pub(super) fn format_record(cells: &[CellValue]) -> String {
    let mut line = String::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            line.push(SEPARATOR);
        }
        line.push_str(&escape_cell(&cell.to_string()));
    }
    line.push('\n');
    line
}
