//! Grid-to-screen geometry.
//!
//! [`GridLayout`] turns grid cells into screen rectangles.  The screen is cut
//! into `rows × columns` regular cells after subtracting the fixed-pixel
//! [`ScreenMargins`].  A non-zero bottom or right margin gives the nominal
//! grid one extra row or column, the *margin row/column*, whose cells are
//! exactly as tall or wide as the margin itself.
//!
//! ```text
//!  x = left + column * columnWidth
//!  y = top  + row    * rowHeight + menuBarHeight
//!
//!  columnWidth = (screenSizeX - (left + right)) / columns
//!  rowHeight   = (screenSizeY - (top + bottom)) / rows
//! ```
//!
//! All sizes are [`Expr`]s over the live screen size; nothing here is
//! evaluated until a host asks for it.
//!
//! Top and left margins shift every cell and consume a nominal row/column,
//! but the first row/column is *not* resized to match the margin.  That half
//! of the margin model is not implemented.

use crate::expr::{Expr, ScreenSize};
use crate::grid::{Cell, Grid, GridError};
use log::warn;
use serde::{Deserialize, Serialize};

/// Height of the system menu bar, in pixels.
pub const DEFAULT_MENU_BAR_HEIGHT: f64 = 22.0;

/// Fixed-pixel regions reserved at the screen edges (dock, sidebars, …).
///
/// Every field defaults to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl ScreenMargins {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Insets, in cells, applied to the full grid by
/// [`GridLayout::full_with_margin`].
///
/// `top`/`left` count from the grid origin, `bottom`/`right` from the far
/// edge of the regular grid.  Negative values overshoot: `bottom: -1,
/// right: -1` reaches into the margin row and column, i.e. the true screen
/// edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

/// A window rectangle as deferred expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectExpr {
    pub x: Expr,
    pub y: Expr,
    pub width: Expr,
    pub height: Expr,
}

impl RectExpr {
    /// Resolve against a concrete screen.
    pub fn eval(&self, screen: ScreenSize) -> Rect {
        Rect {
            x: self.x.eval(screen),
            y: self.y.eval(screen),
            width: self.width.eval(screen),
            height: self.height.eval(screen),
        }
    }
}

/// A resolved window rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Errors from building a [`GridLayout`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("margin {name} is negative ({value})")]
    NegativeMargin { name: &'static str, value: f64 },
    #[error("margins leave no regular rows in a {0}-row grid")]
    NoRows(usize),
    #[error("margins leave no regular columns in a {0}-column grid")]
    NoColumns(usize),
}

/// Maps grid cells and cell ranges to screen geometry.
#[derive(Debug, Clone)]
pub struct GridLayout {
    grid: Grid,
    margins: ScreenMargins,
    menu_bar_height: f64,
    /// Regular rows (nominal rows minus margin rows).
    rows: usize,
    /// Regular columns (nominal columns minus margin columns).
    columns: usize,
}

impl GridLayout {
    /// Build a layout, checking that the margins leave at least one regular
    /// row and column.
    pub fn new(grid: Grid, margins: ScreenMargins, menu_bar_height: f64) -> Result<Self, LayoutError> {
        for (name, value) in [
            ("top", margins.top),
            ("bottom", margins.bottom),
            ("left", margins.left),
            ("right", margins.right),
        ] {
            if value < 0.0 {
                return Err(LayoutError::NegativeMargin { name, value });
            }
        }
        if margins.top != 0.0 || margins.left != 0.0 {
            warn!("top/left margins shift the grid but do not resize the first row/column");
        }

        let reserved = |a: f64, b: f64| usize::from(a != 0.0) + usize::from(b != 0.0);
        let rows = grid
            .rows()
            .checked_sub(reserved(margins.top, margins.bottom))
            .filter(|&n| n > 0)
            .ok_or(LayoutError::NoRows(grid.rows()))?;
        let columns = grid
            .columns()
            .checked_sub(reserved(margins.left, margins.right))
            .filter(|&n| n > 0)
            .ok_or(LayoutError::NoColumns(grid.columns()))?;

        Ok(Self {
            grid,
            margins,
            menu_bar_height,
            rows,
            columns,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn margins(&self) -> &ScreenMargins {
        &self.margins
    }

    /// Number of regular rows.  With a bottom margin this is also the index
    /// of the margin row.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of regular columns.  With a right margin this is also the
    /// index of the margin column.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row_height(&self) -> Expr {
        (Expr::screen_height() - self.margins.vertical()) / self.rows as f64
    }

    pub fn column_width(&self) -> Expr {
        (Expr::screen_width() - self.margins.horizontal()) / self.columns as f64
    }

    /// Top-left corner of `cell`.
    pub fn coordinates(&self, cell: Cell) -> (Expr, Expr) {
        let x = Expr::constant(self.margins.left) + f64::from(cell.column) * self.column_width();
        let y = Expr::constant(self.margins.top)
            + f64::from(cell.row) * self.row_height()
            + self.menu_bar_height;
        (x, y)
    }

    /// Width and height of the block from `start` to `end`, inclusive.
    ///
    /// Expects `start` to be the top-left corner.  A block ending in the
    /// margin column (row) has that last column (row) sized to the margin
    /// rather than to a regular cell.
    pub fn size(&self, start: Cell, end: Cell) -> (Expr, Expr) {
        let columns = f64::from(1 + end.column - start.column);
        let rows = f64::from(1 + end.row - start.row);

        let mut width = columns * self.column_width();
        if end.column == self.columns as i32 {
            width = width - (self.column_width() - self.margins.right);
        }
        let mut height = rows * self.row_height();
        if end.row == self.rows as i32 {
            height = height - (self.row_height() - self.margins.bottom);
        }
        (width, height)
    }

    /// Rectangle from top-left cell `start` to bottom-right cell `end`.
    pub fn span(&self, start: Cell, end: Cell) -> RectExpr {
        let (x, y) = self.coordinates(start);
        let (width, height) = self.size(start, end);
        RectExpr { x, y, width, height }
    }

    /// Rectangle covering both `a` and `b`, in either order.
    pub fn rect(&self, a: Cell, b: Cell) -> RectExpr {
        let (start, end) = Cell::bounding(a, b);
        self.span(start, end)
    }

    /// The regular grid shrunk by `insets` cells on each side.
    pub fn full_with_margin(&self, insets: Insets) -> RectExpr {
        let start = Cell::new(insets.top, insets.left);
        let end = Cell::new(
            self.rows as i32 - 1 - insets.bottom,
            self.columns as i32 - 1 - insets.right,
        );
        self.span(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn hd() -> ScreenSize {
        ScreenSize::new(1920.0, 1080.0)
    }

    fn stock_grid() -> Grid {
        Grid::from_rows(&["1234567", "qwertyu", "asdfghj", "zxcvbnm"]).unwrap()
    }

    fn stock() -> GridLayout {
        let margins = ScreenMargins {
            bottom: 185.0,
            right: 375.0,
            ..Default::default()
        };
        GridLayout::new(stock_grid(), margins, DEFAULT_MENU_BAR_HEIGHT).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn margins_reserve_one_row_and_column() {
        let l = stock();
        assert_eq!(l.rows(), 3);
        assert_eq!(l.columns(), 6);
    }

    #[test]
    fn cell_sizes_on_hd_screen() {
        let l = stock();
        assert_close(l.column_width().eval(hd()), 257.5);
        assert_close(l.row_height().eval(hd()), 895.0 / 3.0);
        assert_eq!(l.column_width().to_string(), "(screenSizeX - 375) / 6");
        assert_eq!(l.row_height().to_string(), "(screenSizeY - 185) / 3");
    }

    #[test]
    fn origin_sits_below_menu_bar() {
        let l = stock();
        let (x, y) = l.coordinates(Cell::new(0, 0));
        assert_close(x.eval(hd()), 0.0);
        assert_close(y.eval(hd()), 22.0);
    }

    #[test]
    fn coordinates_render_deferred() {
        let l = stock();
        let (x, y) = l.coordinates(Cell::new(1, 2));
        assert_eq!(x.to_string(), "0 + 2 * (screenSizeX - 375) / 6");
        assert_eq!(y.to_string(), "0 + 1 * (screenSizeY - 185) / 3 + 22");
    }

    #[test]
    fn coordinates_strictly_increase() {
        let l = stock();
        let g = l.grid().clone();
        for row in 0..g.rows() as i32 {
            for column in 1..g.columns() as i32 {
                let (a, _) = l.coordinates(Cell::new(row, column - 1));
                let (b, _) = l.coordinates(Cell::new(row, column));
                assert!(b.eval(hd()) > a.eval(hd()));
            }
        }
        for column in 0..g.columns() as i32 {
            for row in 1..g.rows() as i32 {
                let (_, a) = l.coordinates(Cell::new(row - 1, column));
                let (_, b) = l.coordinates(Cell::new(row, column));
                assert!(b.eval(hd()) > a.eval(hd()));
            }
        }
    }

    #[test]
    fn regular_cell_size() {
        let l = stock();
        let c = Cell::new(1, 3);
        let (w, h) = l.size(c, c);
        assert_close(w.eval(hd()), 257.5);
        assert_close(h.eval(hd()), 895.0 / 3.0);
    }

    #[test]
    fn margin_column_cell_is_margin_wide() {
        let l = stock();
        let c = Cell::new(0, 6);
        let (w, h) = l.size(c, c);
        assert_close(w.eval(hd()), 375.0);
        assert_close(h.eval(hd()), 895.0 / 3.0);
        let (x, _) = l.coordinates(c);
        assert_close(x.eval(hd()) + w.eval(hd()), 1920.0);
    }

    #[test]
    fn margin_row_cell_is_margin_tall() {
        let l = stock();
        let c = Cell::new(3, 0);
        let (w, h) = l.size(c, c);
        assert_close(w.eval(hd()), 257.5);
        assert_close(h.eval(hd()), 185.0);
    }

    #[test]
    fn padded_full_covers_regular_grid() {
        let l = stock();
        let r = l.full_with_margin(Insets::default()).eval(hd());
        assert_close(r.x, 0.0);
        assert_close(r.y, 22.0);
        assert_close(r.width, 1920.0 - 375.0);
        assert_close(r.height, 1080.0 - 185.0);
    }

    #[test]
    fn negative_insets_reach_screen_edges() {
        let l = stock();
        let r = l
            .full_with_margin(Insets {
                bottom: -1,
                right: -1,
                ..Default::default()
            })
            .eval(hd());
        assert_close(r.width, 1920.0);
        assert_close(r.height, 1080.0);
    }

    #[test]
    fn upper_left_singleton() {
        let l = stock();
        let r = l
            .full_with_margin(Insets {
                bottom: 1,
                right: l.columns() as i32 - 2,
                ..Default::default()
            })
            .eval(hd());
        assert_close(r.width, 2.0 * 257.5);
        assert_close(r.height, 2.0 * 895.0 / 3.0);
    }

    #[test]
    fn rect_is_order_independent() {
        let l = stock();
        let a = Cell::new(0, 4);
        let b = Cell::new(2, 1);
        assert_eq!(l.rect(a, b), l.rect(b, a));
        let r = l.rect(a, b).eval(hd());
        assert_close(r.x, 257.5);
        assert_close(r.width, 4.0 * 257.5);
        assert_close(r.height, 895.0);
    }

    #[test]
    fn deferred_rect_follows_screen_resize() {
        let l = stock();
        let rect = l.rect(Cell::new(0, 0), Cell::new(3, 6));
        let small = rect.eval(ScreenSize::new(1440.0, 900.0));
        assert_close(small.width, 1440.0);
        assert_close(small.height, 900.0);
    }

    #[test]
    fn no_margins_keep_full_grid() {
        let l = GridLayout::new(stock_grid(), ScreenMargins::default(), 0.0).unwrap();
        assert_eq!((l.rows(), l.columns()), (4, 7));
        let r = l.full_with_margin(Insets::default()).eval(hd());
        assert_close(r.width, 1920.0);
        assert_close(r.height, 1080.0);
    }

    #[test]
    fn top_margin_shrinks_and_shifts() {
        let margins = ScreenMargins {
            top: 40.0,
            ..Default::default()
        };
        let l = GridLayout::new(stock_grid(), margins, 0.0).unwrap();
        assert_eq!(l.rows(), 3);
        let (_, y) = l.coordinates(Cell::new(0, 0));
        assert_close(y.eval(hd()), 40.0);
        assert_close(l.row_height().eval(hd()), (1080.0 - 40.0) / 3.0);
    }

    #[test]
    fn margins_consuming_all_rows_rejected() {
        let grid = Grid::from_rows(&["abc"]).unwrap();
        let margins = ScreenMargins {
            bottom: 10.0,
            ..Default::default()
        };
        let err = GridLayout::new(grid, margins, 0.0).unwrap_err();
        assert_eq!(err, LayoutError::NoRows(1));
    }

    #[test]
    fn margins_consuming_all_columns_rejected() {
        let grid = Grid::from_rows(&["ab", "cd"]).unwrap();
        let margins = ScreenMargins {
            left: 10.0,
            right: 10.0,
            ..Default::default()
        };
        let err = GridLayout::new(grid, margins, 0.0).unwrap_err();
        assert_eq!(err, LayoutError::NoColumns(2));
    }

    #[test]
    fn negative_margin_rejected() {
        let margins = ScreenMargins {
            right: -5.0,
            ..Default::default()
        };
        let err = GridLayout::new(stock_grid(), margins, 0.0).unwrap_err();
        assert!(matches!(err, LayoutError::NegativeMargin { name: "right", .. }));
    }

    #[test]
    fn margins_deserialize_with_defaults() {
        let m: ScreenMargins = serde_json::from_str(r#"{"bottom": 185}"#).unwrap();
        assert_eq!(m.bottom, 185.0);
        assert_eq!(m.top, 0.0);
        assert_eq!(m.right, 0.0);
    }
}
