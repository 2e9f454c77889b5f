//! Panel grid bookkeeping.
//!
//! [`Grid`] is a bounds-checked row-major arena addressed by `(row, col)`.
//! [`PanelGrid`] is the metadata style resolution reads from: figure tags,
//! per-panel tags and grouping property, and the items plotted in each panel.
//! Row 0 is the top row of the figure.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

/// Number of rows and columns in a figure grid.
///
/// Only [`GridShape::new`] builds one, so both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    /// Create a shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShape`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::InvalidShape { rows, cols }.into());
        }
        Ok(Self { rows, cols })
    }

    /// Panel rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Panel columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a validated shape.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `(row, col)` lies inside the grid.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Bounds check with a descriptive error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the cell is outside the grid.
    pub fn check(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(Error::OutOfBounds { row, col, rows: self.rows, cols: self.cols })
        }
    }

    /// All cell indices in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        let cols = self.cols;
        (0..self.len()).map(move |i| CellIndex::new(i / cols, i % cols))
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Address of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    /// Row, 0 at the top.
    pub row: usize,
    /// Column, 0 at the left.
    pub col: usize,
}

impl CellIndex {
    /// Create a cell index.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Row-major two-dimensional arena with bounds-checked access.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    shape: GridShape,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` for every cell in row-major order.
    pub fn from_fn(shape: GridShape, mut f: impl FnMut(CellIndex) -> T) -> Self {
        let cells = shape.cells().map(&mut f).collect();
        Self { shape, cells }
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if there are no rows, no columns, or the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let shape = GridShape::new(rows.len(), cols)?;
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(ConfigError::InvalidValue {
                key: format!("row {bad}"),
                message: format!("expected {cols} panel(s), got {}", rows[bad].len()),
            }
            .into());
        }
        Ok(Self { shape, cells: rows.into_iter().flatten().collect() })
    }

    /// Grid dimensions.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Cell at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.shape.contains(row, col).then(|| &self.cells[row * self.shape.cols + col])
    }

    /// Mutable cell at `(row, col)`, or `None` when out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if self.shape.contains(row, col) {
            Some(&mut self.cells[row * self.shape.cols + col])
        } else {
            None
        }
    }

    /// Cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the cell is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Result<&T> {
        self.shape.check(row, col)?;
        Ok(&self.cells[row * self.shape.cols + col])
    }

    /// Iterate cells with their indices, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &T)> {
        self.shape.cells().zip(self.cells.iter())
    }

    /// Transform every cell.
    pub fn map<U>(&self, mut f: impl FnMut(CellIndex, &T) -> U) -> Grid<U> {
        Grid { shape: self.shape, cells: self.iter().map(|(idx, v)| f(idx, v)).collect() }
    }

    /// Cells of one row, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.shape.rows)
            .then(|| &self.cells[row * self.shape.cols..(row + 1) * self.shape.cols])
    }
}

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `value`.
    #[must_use]
    pub fn filled(shape: GridShape, value: T) -> Self {
        Self { shape, cells: vec![value; shape.len()] }
    }
}

/// Discrete property value attached to a plotted item (e.g. a condition or genotype).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Int(i64::from(v))
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

/// Accepted values per property, used by match rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropFilter {
    accepted: BTreeMap<String, Vec<PropValue>>,
}

impl PropFilter {
    /// Empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a single value for `prop`.
    #[must_use]
    pub fn only(self, prop: &str, value: impl Into<PropValue>) -> Self {
        self.any_of(prop, [value])
    }

    /// Accept any of `values` for `prop`.
    #[must_use]
    pub fn any_of<V: Into<PropValue>>(
        mut self,
        prop: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.accepted
            .entry(prop.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// True when no property is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    fn entries(&self) -> impl Iterator<Item = (&String, &Vec<PropValue>)> {
        self.accepted.iter()
    }
}

/// One plotted item (a line, contour, scatter series) inside a panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemMeta {
    /// Plot-type tags, applied in order.
    pub tags: Vec<String>,
    /// Descriptive properties.
    pub props: BTreeMap<String, PropValue>,
}

impl ItemMeta {
    /// Item with no tags or properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plot-type tag (duplicates are ignored).
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
        self
    }

    /// Set a property.
    #[must_use]
    pub fn prop(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    /// Whether the item carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Property value, if set.
    #[must_use]
    pub fn get_prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// Whether the item satisfies `include` and avoids `exclude`.
    ///
    /// Properties the item does not carry are not checked.
    #[must_use]
    pub fn matches(&self, include: &PropFilter, exclude: &PropFilter) -> bool {
        let excluded = exclude
            .entries()
            .any(|(k, vals)| self.props.get(k).is_some_and(|v| vals.contains(v)));
        if excluded {
            return false;
        }
        include
            .entries()
            .all(|(k, vals)| self.props.get(k).map_or(true, |v| vals.contains(v)))
    }
}

/// Metadata for one panel cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelMeta {
    /// Axis-type tags, applied in order.
    pub tags: Vec<String>,
    /// Property being compared between the items of this panel.
    pub group_prop: Option<String>,
    /// Value of the row property this panel belongs to.
    pub row_value: Option<PropValue>,
    /// Value of the column property this panel belongs to.
    pub col_value: Option<PropValue>,
    /// Items plotted in the panel.
    pub items: Vec<ItemMeta>,
}

impl PanelMeta {
    /// Empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-type tag (duplicates are ignored).
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.add_tag(tag);
        self
    }

    /// Set the grouping property.
    #[must_use]
    pub fn group_by(mut self, prop: &str) -> Self {
        self.group_prop = Some(prop.to_string());
        self
    }

    /// Set the row and column values.
    #[must_use]
    pub fn position_values(
        mut self,
        row_value: impl Into<PropValue>,
        col_value: impl Into<PropValue>,
    ) -> Self {
        self.row_value = Some(row_value.into());
        self.col_value = Some(col_value.into());
        self
    }

    /// Append an item.
    #[must_use]
    pub fn item(mut self, item: ItemMeta) -> Self {
        self.items.push(item);
        self
    }

    /// Add an axis-type tag in place (duplicates are ignored).
    pub fn add_tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Remove an axis-type tag; returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Whether the panel carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Grouping value of item `k`, if the panel has a grouping property and the item sets it.
    #[must_use]
    pub fn group_value(&self, k: usize) -> Option<&PropValue> {
        let prop = self.group_prop.as_deref()?;
        self.items.get(k)?.get_prop(prop)
    }
}

/// The grid context style resolution is queried against.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGrid {
    figure_tags: Vec<String>,
    panels: Grid<PanelMeta>,
}

impl PanelGrid {
    /// Wrap a grid of panel metadata.
    #[must_use]
    pub fn new(panels: Grid<PanelMeta>) -> Self {
        Self { figure_tags: Vec::new(), panels }
    }

    /// Grid of empty panels.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShape`] if either dimension is zero.
    pub fn empty(rows: usize, cols: usize) -> Result<Self> {
        let shape = GridShape::new(rows, cols)?;
        Ok(Self::new(Grid::filled(shape, PanelMeta::new())))
    }

    /// Build from nested rows of panels.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty or ragged layout.
    pub fn from_rows(rows: Vec<Vec<PanelMeta>>) -> Result<Self> {
        Ok(Self::new(Grid::from_rows(rows)?))
    }

    /// Add a figure-type tag (duplicates are ignored).
    #[must_use]
    pub fn figure_tag(mut self, tag: &str) -> Self {
        if !self.figure_tags.iter().any(|t| t == tag) {
            self.figure_tags.push(tag.to_string());
        }
        self
    }

    /// Figure-type tags, in order.
    #[must_use]
    pub fn figure_tags(&self) -> &[String] {
        &self.figure_tags
    }

    /// Grid dimensions.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.panels.shape()
    }

    /// All panels.
    #[must_use]
    pub fn panels(&self) -> &Grid<PanelMeta> {
        &self.panels
    }

    /// Panel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the cell is outside the grid.
    pub fn panel(&self, row: usize, col: usize) -> Result<&PanelMeta> {
        self.panels.cell(row, col)
    }

    /// Mutable panel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the cell is outside the grid.
    pub fn panel_mut(&mut self, row: usize, col: usize) -> Result<&mut PanelMeta> {
        let shape = self.panels.shape();
        self.panels
            .get_mut(row, col)
            .ok_or(Error::OutOfBounds { row, col, rows: shape.rows, cols: shape.cols })
    }

    /// Item `k` of panel `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] or [`Error::ItemOutOfBounds`].
    pub fn item(&self, row: usize, col: usize, k: usize) -> Result<&ItemMeta> {
        let panel = self.panel(row, col)?;
        panel
            .items
            .get(k)
            .ok_or(Error::ItemOutOfBounds { row, col, item: k, len: panel.items.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_rejects_zero() {
        assert!(GridShape::new(0, 3).is_err());
        assert!(GridShape::new(2, 0).is_err());
        let shape = GridShape::new(2, 3).unwrap();
        assert_eq!((shape.rows(), shape.cols(), shape.len()), (2, 3, 6));
    }

    #[test]
    fn test_grid_row_major() {
        let shape = GridShape::new(2, 3).unwrap();
        let grid = Grid::from_fn(shape, |idx| idx.row * 10 + idx.col);
        assert_eq!(grid.get(1, 2), Some(&12));
        assert_eq!(grid.row(1), Some(&[10, 11, 12][..]));
        let order: Vec<_> = grid.iter().map(|(_, v)| *v).collect();
        assert_eq!(order, vec![0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_grid_bounds_checked() {
        let grid = Grid::filled(GridShape::new(2, 2).unwrap(), 0u8);
        assert!(grid.get(2, 0).is_none());
        assert!(matches!(grid.cell(0, 5), Err(Error::OutOfBounds { row: 0, col: 5, .. })));
    }

    #[test]
    fn test_grid_from_rows_ragged() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
        assert!(Grid::<u8>::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_item_match_include_exclude() {
        let item = ItemMeta::new().prop("genotype", "wt").prop("day", 3);
        let include = PropFilter::new().any_of("genotype", ["wt", "ko"]);
        assert!(item.matches(&include, &PropFilter::new()));

        let exclude = PropFilter::new().only("day", 3);
        assert!(!item.matches(&include, &exclude));

        let wrong = PropFilter::new().only("genotype", "ko");
        assert!(!item.matches(&wrong, &PropFilter::new()));
    }

    #[test]
    fn test_item_match_ignores_missing_props() {
        let item = ItemMeta::new().prop("genotype", "wt");
        let include = PropFilter::new().only("sex", "f");
        assert!(item.matches(&include, &PropFilter::new()));
    }

    #[test]
    fn test_panel_tags() {
        let mut panel = PanelMeta::new().tag("log").tag("log").tag("polar");
        assert_eq!(panel.tags, vec!["log", "polar"]);
        assert!(panel.remove_tag("log"));
        assert!(!panel.remove_tag("log"));
        assert!(!panel.has_tag("log"));
    }

    #[test]
    fn test_group_value() {
        let panel = PanelMeta::new()
            .group_by("condition")
            .item(ItemMeta::new().prop("condition", "ctrl"))
            .item(ItemMeta::new());
        assert_eq!(panel.group_value(0), Some(&PropValue::from("ctrl")));
        assert_eq!(panel.group_value(1), None);
        assert_eq!(panel.group_value(7), None);
    }

    #[test]
    fn test_panel_grid_item_lookup() {
        let mut grid = PanelGrid::empty(1, 2).unwrap();
        grid.panel_mut(0, 1).unwrap().items.push(ItemMeta::new().tag("line"));
        assert!(grid.item(0, 1, 0).unwrap().has_tag("line"));
        assert!(matches!(grid.item(0, 0, 0), Err(Error::ItemOutOfBounds { len: 0, .. })));
        assert!(matches!(grid.panel(1, 0), Err(Error::OutOfBounds { .. })));
    }
}
