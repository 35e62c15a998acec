// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Grid builder

use super::align::add_aligned_widget;
use super::{AlignHints, ChainId, Error, Layout, Manager};
use crate::dir::Direction;
use crate::geom::UNLIMITED;
use crate::WidgetId;

/// A grid of rows and columns
///
/// Each column is a parallel chain (horizontal) and each row a parallel chain
/// (vertical). Columns are members of a horizontal serial chain and rows of a
/// vertical serial chain, separated by spacing. Column `k` is thus member
/// `2 * k` of the horizontal chain.
///
/// Widgets spanning several cells are attached as branches of the serial
/// chains: they take the space of the cells they cover but do not affect the
/// size of those cells.
#[derive(Clone, Debug)]
pub struct GridLayout {
    horizontal: ChainId,
    vertical: ChainId,
    cols: Vec<ChainId>,
    rows: Vec<ChainId>,
    spacing: i32,
}

impl GridLayout {
    /// Construct, with spacing from the manager's config
    ///
    /// The new layout is detached; use [`Layout::bind`] to make it the
    /// top-level layout or add it to another layout.
    pub fn new(gm: &mut Manager, rows: usize, cols: usize) -> Self {
        let spacing = gm.config().default_spacing;
        GridLayout::with_spacing(gm, rows, cols, spacing)
    }

    /// Construct with explicit spacing between rows and columns
    pub fn with_spacing(gm: &mut Manager, rows: usize, cols: usize, spacing: i32) -> Self {
        let mut grid = GridLayout {
            horizontal: gm.new_serial_chain(Direction::LeftToRight),
            vertical: gm.new_serial_chain(Direction::Down),
            cols: vec![],
            rows: vec![],
            spacing: spacing.max(0),
        };
        grid.expand(gm, rows, cols);
        grid
    }

    /// Construct and bind as the top-level layout of `gm`
    pub fn top_level(gm: &mut Manager, rows: usize, cols: usize) -> Result<Self, Error> {
        let grid = GridLayout::new(gm, rows, cols);
        grid.bind(gm)?;
        Ok(grid)
    }

    /// Number of rows
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Grow to at least `rows` rows and `cols` columns
    ///
    /// Never shrinks.
    pub fn expand(&mut self, gm: &mut Manager, rows: usize, cols: usize) {
        Self::grow(gm, self.horizontal, &mut self.cols, cols, self.spacing);
        Self::grow(gm, self.vertical, &mut self.rows, rows, self.spacing);
    }

    fn grow(gm: &mut Manager, serial: ChainId, lines: &mut Vec<ChainId>, n: usize, spacing: i32) {
        let Some(dir) = gm.tree().direction(serial) else {
            return;
        };
        while lines.len() < n {
            let line = gm.new_parallel_chain(dir);
            if !lines.is_empty() {
                let res = gm.add_spacing(serial, spacing, 0, spacing);
                debug_assert!(res.is_ok());
            }
            let res = gm.add_chain_to_chain(serial, line, 0);
            debug_assert!(res.is_ok());
            lines.push(line);
        }
    }

    fn check(&self, row: Option<usize>, col: Option<usize>) -> Result<(), Error> {
        let (rows, cols) = (self.rows.len(), self.cols.len());
        if row.is_none_or(|r| r < rows) && col.is_none_or(|c| c < cols) {
            return Ok(());
        }
        let err = Error::CellOutOfRange {
            row: row.unwrap_or(0),
            col: col.unwrap_or(0),
            rows,
            cols,
        };
        log::warn!("layout configuration error: {err}");
        Err(err)
    }

    #[inline]
    fn check_cell(&self, row: usize, col: usize) -> Result<(), Error> {
        self.check(Some(row), Some(col))
    }

    /// Add widget `w` to cell `(row, col)`
    pub fn add_widget(
        &mut self,
        gm: &mut Manager,
        w: WidgetId,
        row: usize,
        col: usize,
        align: AlignHints,
    ) -> Result<(), Error> {
        self.check_cell(row, col)?;
        add_aligned_widget(gm, self.cols[col], w, align.extract(Direction::LeftToRight), 0)?;
        add_aligned_widget(gm, self.rows[row], w, align.extract(Direction::Down), 0)
    }

    /// Add widget `w` spanning rows `from_row..=to_row` and columns
    /// `from_col..=to_col`
    ///
    /// The widget's size does not contribute to the size of the cells
    /// covered.
    #[allow(clippy::too_many_arguments)]
    pub fn add_multi_cell_widget(
        &mut self,
        gm: &mut Manager,
        w: WidgetId,
        from_row: usize,
        to_row: usize,
        from_col: usize,
        to_col: usize,
        align: AlignHints,
    ) -> Result<(), Error> {
        self.check_cell(from_row.max(to_row), from_col.max(to_col))?;
        for (from, to) in [(from_row, to_row), (from_col, to_col)] {
            if from > to {
                let err = Error::InvalidBranch { from, to, len: to + 1 };
                log::warn!("layout configuration error: {err}");
                return Err(err);
            }
        }

        let hor = gm.new_serial_chain(Direction::LeftToRight);
        add_aligned_widget(gm, hor, w, align.extract(Direction::LeftToRight), 0)?;
        gm.add_branch(self.horizontal, hor, 2 * from_col, 2 * to_col)?;

        let ver = gm.new_serial_chain(Direction::Down);
        add_aligned_widget(gm, ver, w, align.extract(Direction::Down), 0)?;
        gm.add_branch(self.vertical, ver, 2 * from_row, 2 * to_row)
    }

    /// Place a nested layout in cell `(row, col)`
    ///
    /// `layout` must be detached.
    pub fn add_layout(
        &mut self,
        gm: &mut Manager,
        layout: &dyn Layout,
        row: usize,
        col: usize,
    ) -> Result<(), Error> {
        self.check_cell(row, col)?;
        let (horiz, vert) = (layout.horizontal_chain(), layout.vertical_chain());
        gm.tree().check_attach(self.cols[col], horiz)?;
        gm.tree().check_attach(self.rows[row], vert)?;
        gm.add_chain_to_chain(self.cols[col], horiz, 0)?;
        gm.add_chain_to_chain(self.rows[row], vert, 0)
    }

    /// Set the stretch of a row
    pub fn set_row_stretch(&mut self, gm: &mut Manager, row: usize, stretch: u32) -> Result<(), Error> {
        self.check(Some(row), None)?;
        gm.set_stretch(self.rows[row], stretch)
    }

    /// Set the stretch of a column
    pub fn set_col_stretch(&mut self, gm: &mut Manager, col: usize, stretch: u32) -> Result<(), Error> {
        self.check(None, Some(col))?;
        gm.set_stretch(self.cols[col], stretch)
    }

    /// Require row `row` to be at least `size` high
    pub fn add_row_spacing(&mut self, gm: &mut Manager, row: usize, size: i32) -> Result<(), Error> {
        self.check(Some(row), None)?;
        gm.add_spacing(self.rows[row], size, 0, UNLIMITED).map(|_| ())
    }

    /// Require column `col` to be at least `size` wide
    pub fn add_col_spacing(&mut self, gm: &mut Manager, col: usize, size: i32) -> Result<(), Error> {
        self.check(None, Some(col))?;
        gm.add_spacing(self.cols[col], size, 0, UNLIMITED).map(|_| ())
    }
}

impl Layout for GridLayout {
    #[inline]
    fn horizontal_chain(&self) -> ChainId {
        self.horizontal
    }

    #[inline]
    fn vertical_chain(&self) -> ChainId {
        self.vertical
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geom::{Rect, Size};
    use crate::headless::HeadlessContainer;
    use crate::layout::{Align, BoxLayout};
    use crate::Container;

    fn grid(rows: usize, cols: usize) -> (Manager, HeadlessContainer, GridLayout) {
        let mut gm = Manager::new();
        let grid = GridLayout::with_spacing(&mut gm, rows, cols, 10);
        grid.bind(&mut gm).unwrap();
        (gm, HeadlessContainer::new(Size(110, 60)), grid)
    }

    #[test]
    fn failed_add_layout_leaves_both_axes_detached() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (mut gm, _, mut g) = grid(2, 2);
        let col = BoxLayout::new(&mut gm, Direction::Down);
        let y = gm.y_chain();
        gm.add_chain_to_chain(y, col.vertical_chain(), 0).unwrap();
        let err = g.add_layout(&mut gm, &col, 0, 0).unwrap_err();
        assert_eq!(err, Error::AlreadyAttached(col.vertical_chain()));
        assert_eq!(gm.tree().parent(col.horizontal_chain()), None);
    }

    #[test]
    fn cells() {
        let (mut gm, mut host, mut g) = grid(2, 2);
        let mut ws = vec![];
        for row in 0..2 {
            for col in 0..2 {
                let w = host.add_flexible_child();
                g.add_widget(&mut gm, w, row, col, AlignHints::NONE).unwrap();
                ws.push(w);
            }
        }
        gm.activate(&mut host);
        assert_eq!(host.rect(ws[0]), Rect::from_xywh(0, 0, 50, 25));
        assert_eq!(host.rect(ws[1]), Rect::from_xywh(60, 0, 50, 25));
        assert_eq!(host.rect(ws[2]), Rect::from_xywh(0, 35, 50, 25));
        assert_eq!(host.rect(ws[3]), Rect::from_xywh(60, 35, 50, 25));
    }

    #[test]
    fn multi_cell_spans_spacing() {
        let (mut gm, mut host, mut g) = grid(2, 2);
        let a = host.add_flexible_child();
        let b = host.add_flexible_child();
        let c = host.add_flexible_child();
        g.add_multi_cell_widget(&mut gm, a, 0, 0, 0, 1, AlignHints::NONE)
            .unwrap();
        g.add_widget(&mut gm, b, 1, 0, AlignHints::NONE).unwrap();
        g.add_widget(&mut gm, c, 1, 1, AlignHints::NONE).unwrap();
        gm.activate(&mut host);
        assert_eq!(host.rect(a), Rect::from_xywh(0, 0, 110, 25));
        assert_eq!(host.rect(b), Rect::from_xywh(0, 35, 50, 25));
        assert_eq!(host.rect(c), Rect::from_xywh(60, 35, 50, 25));
    }

    #[test]
    fn multi_cell_is_aligned_within_span() {
        let (mut gm, mut host, mut g) = grid(2, 2);
        let a = host.add_fixed_child(Size(30, 10));
        let hints = AlignHints::new(Some(Align::End), None);
        g.add_multi_cell_widget(&mut gm, a, 0, 1, 0, 1, hints).unwrap();
        gm.activate(&mut host);
        assert_eq!(host.rect(a), Rect::from_xywh(80, 0, 30, 10));
    }

    #[test]
    fn column_stretch() {
        let mut gm = Manager::new();
        let mut g = GridLayout::with_spacing(&mut gm, 1, 2, 10);
        g.bind(&mut gm).unwrap();
        let mut host = HeadlessContainer::new(Size(130, 20));
        let a = host.add_child(Size(20, 0), Size::UNLIMITED);
        let b = host.add_child(Size(20, 0), Size::UNLIMITED);
        g.add_widget(&mut gm, a, 0, 0, AlignHints::NONE).unwrap();
        g.add_widget(&mut gm, b, 0, 1, AlignHints::NONE).unwrap();
        g.set_col_stretch(&mut gm, 1, 1).unwrap();
        gm.activate(&mut host);
        assert_eq!(host.rect(a), Rect::from_xywh(0, 0, 20, 20));
        assert_eq!(host.rect(b), Rect::from_xywh(30, 0, 100, 20));
    }

    #[test]
    fn row_spacing_sets_minimum() {
        let (mut gm, mut host, mut g) = grid(2, 1);
        g.add_row_spacing(&mut gm, 1, 40).unwrap();
        gm.activate(&mut host);
        assert_eq!(host.minimum_size(), Size(1, 50));
    }

    #[test]
    fn expand_and_range_checks() {
        let mut gm = Manager::new();
        let mut g = GridLayout::new(&mut gm, 1, 1);
        g.expand(&mut gm, 2, 3);
        g.expand(&mut gm, 1, 1);
        assert_eq!((g.num_rows(), g.num_cols()), (2, 3));
        assert_eq!(gm.tree().members(g.horizontal_chain()).count(), 5);
        assert_eq!(gm.tree().members(g.vertical_chain()).count(), 3);

        let w = WidgetId::new(0);
        assert_eq!(
            g.add_widget(&mut gm, w, 2, 0, AlignHints::NONE),
            Err(Error::CellOutOfRange {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(g.add_multi_cell_widget(&mut gm, w, 1, 0, 0, 0, AlignHints::NONE).is_err());
        assert!(g.set_col_stretch(&mut gm, 3, 1).is_err());
    }
}
