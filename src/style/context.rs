//! Query context for style resolution.

use crate::error::Result;
use crate::grid::{CellIndex, GridShape, ItemMeta, PanelGrid, PanelMeta, PropValue};

/// What a style query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The whole figure.
    Figure,
    /// One panel.
    Panel(CellIndex),
    /// One plotted item inside a panel.
    Item(CellIndex, usize),
}

impl Target {
    /// Query level name used in diagnostics.
    #[must_use]
    pub fn level(&self) -> &'static str {
        match self {
            Target::Figure => "figure",
            Target::Panel(_) => "panel",
            Target::Item(..) => "item",
        }
    }
}

/// A bounds-checked view of the grid for one style query.
///
/// Rule predicates receive this; panel and item accessors are infallible
/// because the indices were validated on construction.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    grid: &'a PanelGrid,
    target: Target,
}

impl<'a> StyleContext<'a> {
    /// Figure-level context.
    #[must_use]
    pub fn figure(grid: &'a PanelGrid) -> Self {
        Self { grid, target: Target::Figure }
    }

    /// Panel-level context.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] when the panel is outside the grid.
    pub fn panel(grid: &'a PanelGrid, row: usize, col: usize) -> Result<Self> {
        grid.panel(row, col)?;
        Ok(Self { grid, target: Target::Panel(CellIndex::new(row, col)) })
    }

    /// Item-level context.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error when the panel or item does not exist.
    pub fn item(grid: &'a PanelGrid, row: usize, col: usize, item: usize) -> Result<Self> {
        grid.item(row, col, item)?;
        Ok(Self { grid, target: Target::Item(CellIndex::new(row, col), item) })
    }

    /// The grid being styled.
    #[must_use]
    pub fn grid(&self) -> &'a PanelGrid {
        self.grid
    }

    /// Grid dimensions.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.grid.shape()
    }

    /// Query target.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Panel address, for panel and item queries.
    #[must_use]
    pub fn cell(&self) -> Option<CellIndex> {
        match self.target {
            Target::Figure => None,
            Target::Panel(cell) | Target::Item(cell, _) => Some(cell),
        }
    }

    /// Panel row, for panel and item queries.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        self.cell().map(|c| c.row)
    }

    /// Panel column, for panel and item queries.
    #[must_use]
    pub fn col(&self) -> Option<usize> {
        self.cell().map(|c| c.col)
    }

    /// Item index, for item queries.
    #[must_use]
    pub fn item_index(&self) -> Option<usize> {
        match self.target {
            Target::Item(_, k) => Some(k),
            _ => None,
        }
    }

    /// Panel metadata, for panel and item queries.
    #[must_use]
    pub fn panel_meta(&self) -> Option<&'a PanelMeta> {
        let cell = self.cell()?;
        self.grid.panels().get(cell.row, cell.col)
    }

    /// Item metadata, for item queries.
    #[must_use]
    pub fn item_meta(&self) -> Option<&'a ItemMeta> {
        self.panel_meta()?.items.get(self.item_index()?)
    }

    /// Row property value of the queried panel, when the panel records one.
    #[must_use]
    pub fn row_value(&self) -> Option<&'a PropValue> {
        self.panel_meta()?.row_value.as_ref()
    }

    /// Column property value of the queried panel, when the panel records one.
    #[must_use]
    pub fn col_value(&self) -> Option<&'a PropValue> {
        self.panel_meta()?.col_value.as_ref()
    }

    /// Classification tags at the query's own level, in application order.
    #[must_use]
    pub fn tags(&self) -> &'a [String] {
        match self.target {
            Target::Figure => self.grid.figure_tags(),
            Target::Panel(_) => self.panel_meta().map(|p| p.tags.as_slice()).unwrap_or_default(),
            Target::Item(..) => self.item_meta().map(|i| i.tags.as_slice()).unwrap_or_default(),
        }
    }

    /// True for panels in the bottom row.
    #[must_use]
    pub fn is_bottom_row(&self) -> bool {
        self.row().is_some_and(|r| r + 1 == self.shape().rows())
    }

    /// True for panels in the leftmost column.
    #[must_use]
    pub fn is_left_col(&self) -> bool {
        self.col() == Some(0)
    }
}
