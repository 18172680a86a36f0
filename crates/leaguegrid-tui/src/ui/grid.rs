//! Responsive card grid geometry and selection movement.

use ratatui::layout::Rect;

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: u16 = 5;

/// Placeholder cards shown while loading.
pub const SKELETON_COUNT: usize = 8;

/// Column count for a given terminal width.
pub fn grid_columns(width: u16) -> usize {
    match width {
        0..=59 => 1,
        60..=99 => 2,
        100..=139 => 3,
        _ => 4,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    First,
    Last,
}

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: usize = 3;

/// New selection after `mv` in a grid of `count` cards laid out row-major in
/// `columns` columns. Never leaves the grid.
pub fn navigate(selection: usize, count: usize, columns: usize, mv: Move) -> usize {
    if count == 0 {
        return 0;
    }
    let columns = columns.max(1);
    let last = count - 1;
    let selection = selection.min(last);

    match mv {
        Move::Left => selection.saturating_sub(1),
        Move::Right => (selection + 1).min(last),
        Move::Up => selection.checked_sub(columns).unwrap_or(selection),
        Move::Down => {
            let next = selection + columns;
            if next <= last {
                next
            } else if selection / columns < last / columns {
                // Short last row: land on its final card
                last
            } else {
                selection
            }
        }
        Move::PageUp => selection.saturating_sub(columns * PAGE_ROWS),
        Move::PageDown => (selection + columns * PAGE_ROWS).min(last),
        Move::First => 0,
        Move::Last => last,
    }
}

/// First grid row to draw so the selected card is visible.
pub fn scroll_row(selection: usize, columns: usize, visible_rows: usize) -> usize {
    let row = selection / columns.max(1);
    let visible_rows = visible_rows.max(1);
    if row < visible_rows {
        0
    } else {
        row + 1 - visible_rows
    }
}

/// Rects for each visible cell, row-major, starting at grid row `first_row`.
/// Returns `(index, rect)` pairs for cells that fit in `area`.
pub fn cell_rects(area: Rect, columns: usize, count: usize, first_row: usize) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let visible_rows = (area.height / CARD_HEIGHT) as usize;
    let cell_width = area.width / columns as u16;

    let mut cells = Vec::new();
    for row in 0..visible_rows {
        for col in 0..columns {
            let index = (first_row + row) * columns + col;
            if index >= count {
                return cells;
            }
            let x = area.x + col as u16 * cell_width;
            // Last column absorbs the rounding remainder
            let width = if col == columns - 1 {
                area.width - col as u16 * cell_width
            } else {
                cell_width
            };
            let y = area.y + row as u16 * CARD_HEIGHT;
            cells.push((index, Rect::new(x, y, width, CARD_HEIGHT)));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns_breakpoints() {
        assert_eq!(grid_columns(40), 1);
        assert_eq!(grid_columns(59), 1);
        assert_eq!(grid_columns(60), 2);
        assert_eq!(grid_columns(100), 3);
        assert_eq!(grid_columns(139), 3);
        assert_eq!(grid_columns(140), 4);
        assert_eq!(grid_columns(300), 4);
    }

    #[test]
    fn test_navigate_horizontal() {
        assert_eq!(navigate(0, 10, 3, Move::Left), 0);
        assert_eq!(navigate(0, 10, 3, Move::Right), 1);
        assert_eq!(navigate(9, 10, 3, Move::Right), 9);
    }

    #[test]
    fn test_navigate_vertical() {
        // 10 cards in 3 columns: rows [0,1,2] [3,4,5] [6,7,8] [9]
        assert_eq!(navigate(1, 10, 3, Move::Down), 4);
        assert_eq!(navigate(4, 10, 3, Move::Up), 1);
        assert_eq!(navigate(1, 10, 3, Move::Up), 1);
        assert_eq!(navigate(8, 10, 3, Move::Down), 9);
        assert_eq!(navigate(9, 10, 3, Move::Down), 9);
    }

    #[test]
    fn test_navigate_pages_and_ends() {
        assert_eq!(navigate(0, 20, 2, Move::PageDown), 6);
        assert_eq!(navigate(6, 20, 2, Move::PageUp), 0);
        assert_eq!(navigate(18, 20, 2, Move::PageDown), 19);
        assert_eq!(navigate(5, 20, 2, Move::First), 0);
        assert_eq!(navigate(5, 20, 2, Move::Last), 19);
    }

    #[test]
    fn test_navigate_empty_and_out_of_range() {
        assert_eq!(navigate(3, 0, 3, Move::Down), 0);
        // Selection past the end is clamped first
        assert_eq!(navigate(50, 4, 2, Move::Left), 2);
    }

    #[test]
    fn test_scroll_row() {
        assert_eq!(scroll_row(0, 3, 2), 0);
        assert_eq!(scroll_row(5, 3, 2), 0);
        assert_eq!(scroll_row(6, 3, 2), 1);
        assert_eq!(scroll_row(11, 3, 2), 2);
        assert_eq!(scroll_row(4, 0, 0), 4);
    }

    #[test]
    fn test_cell_rects_fill_area() {
        let area = Rect::new(0, 2, 101, 12);
        let cells = cell_rects(area, 3, 8, 0);
        // 12 rows fit two card rows
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (0, Rect::new(0, 2, 33, CARD_HEIGHT)));
        assert_eq!(cells[2].1.width, 35);
        assert_eq!(cells[3].1.y, 2 + CARD_HEIGHT);
    }

    #[test]
    fn test_cell_rects_with_scroll() {
        let area = Rect::new(0, 0, 60, 10);
        let cells = cell_rects(area, 2, 5, 1);
        let indices: Vec<usize> = cells.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![2, 3, 4]);
    }
}
