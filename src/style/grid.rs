//! Resolved styles for one figure build.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::grid::{CellIndex, Grid, GridShape, PanelGrid};

use super::element::{Scope, StyleElement, TextField};
use super::value::StyleMap;

/// Resolved styles keyed by element name.
pub type ElementStyles = BTreeMap<String, StyleMap>;

/// What the rendering boundary needs to know about an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    /// Element scope.
    pub scope: Scope,
    /// Keys consumed by the engine.
    pub reserved: Vec<String>,
    /// Annotation field, for text elements.
    pub text: Option<TextField>,
}

/// Every resolved style of one figure build.
///
/// Produced by [`crate::style::StyleManager::resolve`] and read by the
/// rendering boundary; nothing is recomputed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleGrid {
    shape: GridShape,
    figure: ElementStyles,
    panels: Grid<ElementStyles>,
    items: Grid<Vec<ElementStyles>>,
    shared: BTreeSet<String>,
    info: BTreeMap<String, ElementInfo>,
}

impl StyleGrid {
    pub(crate) fn new(grid: &PanelGrid) -> Self {
        let panels = grid.panels();
        Self {
            shape: grid.shape(),
            figure: ElementStyles::new(),
            panels: panels.map(|_, _| ElementStyles::new()),
            items: panels.map(|_, panel| vec![ElementStyles::new(); panel.items.len()]),
            shared: BTreeSet::new(),
            info: BTreeMap::new(),
        }
    }

    pub(crate) fn register(&mut self, element: &StyleElement) {
        self.info.insert(
            element.name().to_string(),
            ElementInfo {
                scope: element.scope(),
                reserved: element.reserved_keys(),
                text: element.text_field(),
            },
        );
    }

    pub(crate) fn set_figure(&mut self, name: &str, style: StyleMap) {
        self.figure.insert(name.to_string(), style);
    }

    pub(crate) fn set_panel(&mut self, cell: CellIndex, name: &str, style: StyleMap) {
        if let Some(panel) = self.panels.get_mut(cell.row, cell.col) {
            panel.insert(name.to_string(), style);
        }
    }

    /// Store one map for every panel.
    pub(crate) fn set_shared(&mut self, name: &str, style: &StyleMap) {
        for cell in self.shape.cells() {
            self.set_panel(cell, name, style.clone());
        }
        self.shared.insert(name.to_string());
    }

    pub(crate) fn set_item(&mut self, cell: CellIndex, k: usize, name: &str, style: StyleMap) {
        let slot = self.items.get_mut(cell.row, cell.col).and_then(|items| items.get_mut(k));
        if let Some(item) = slot {
            item.insert(name.to_string(), style);
        }
    }

    /// Grid dimensions.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Figure-level styles.
    #[must_use]
    pub fn figure(&self) -> &ElementStyles {
        &self.figure
    }

    /// One figure-level element's style.
    #[must_use]
    pub fn figure_style(&self, name: &str) -> Option<&StyleMap> {
        self.figure.get(name)
    }

    /// Panel-level styles of one cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for cells outside the grid.
    pub fn panel(&self, row: usize, col: usize) -> Result<&ElementStyles> {
        self.panels.cell(row, col)
    }

    /// One panel-level element's style in one cell.
    #[must_use]
    pub fn panel_style(&self, row: usize, col: usize, name: &str) -> Option<&StyleMap> {
        self.panels.get(row, col)?.get(name)
    }

    /// Item-level styles of one cell, one entry per item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for cells outside the grid.
    pub fn items(&self, row: usize, col: usize) -> Result<&[ElementStyles]> {
        self.items.cell(row, col).map(Vec::as_slice)
    }

    /// One item-level element's style for item `k` of a cell.
    #[must_use]
    pub fn item_style(&self, row: usize, col: usize, k: usize, name: &str) -> Option<&StyleMap> {
        self.items.get(row, col)?.get(k)?.get(name)
    }

    /// Whether the panel element `name` resolved identically for every cell.
    #[must_use]
    pub fn is_shared(&self, name: &str) -> bool {
        self.shared.contains(name)
    }

    /// Metadata of a resolved element.
    #[must_use]
    pub fn element_info(&self, name: &str) -> Option<&ElementInfo> {
        self.info.get(name)
    }

    /// Copy of `style` without the reserved keys of element `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownElement`] if `name` was not part of this build.
    pub fn render_args(&self, name: &str, style: &StyleMap) -> Result<StyleMap> {
        let info = self.info.get(name).ok_or_else(|| Error::UnknownElement(name.to_string()))?;
        Ok(style
            .iter()
            .filter(|(k, _)| !info.reserved.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

fn write_styles(f: &mut fmt::Formatter<'_>, indent: &str, styles: &ElementStyles) -> fmt::Result {
    for (name, style) in styles {
        writeln!(f, "{indent}{name}:")?;
        for (key, value) in style {
            writeln!(f, "{indent}\t{key} = {value}")?;
        }
    }
    Ok(())
}

impl fmt::Display for StyleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FIGURE-LEVEL STYLES:\n")?;
        write_styles(f, "", &self.figure)?;

        writeln!(f, "\nSTYLES FOR ALL PANELS:\n")?;
        if let Some((_, first)) = self.panels.iter().next() {
            let shared: ElementStyles = first
                .iter()
                .filter(|(name, _)| self.shared.contains(*name))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            write_styles(f, "", &shared)?;
        }

        writeln!(f, "\nSTYLES FOR SPECIFIC PANELS:\n")?;
        for (cell, styles) in self.panels.iter() {
            writeln!(f, "Panel ({}, {})", cell.row, cell.col)?;
            let specific: ElementStyles = styles
                .iter()
                .filter(|(name, _)| !self.shared.contains(*name))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            write_styles(f, "\t", &specific)?;
        }

        writeln!(f, "\nITEM-LEVEL STYLES:\n")?;
        for (cell, items) in self.items.iter() {
            for (k, styles) in items.iter().enumerate() {
                writeln!(f, "Panel ({}, {}) item {k}", cell.row, cell.col)?;
                write_styles(f, "\t", styles)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::elements;
    use crate::style_map;

    fn sample() -> StyleGrid {
        let grid = PanelGrid::empty(1, 2).unwrap();
        let mut styles = StyleGrid::new(&grid);
        let label = elements::x_label();
        styles.register(&label);
        styles.set_figure(
            label.name(),
            style_map! { "text" => "Time", "pos" => (0.5, 0.0), "fontsize" => 9 },
        );
        styles.register(&elements::edges());
        styles.set_shared(elements::EDGES, &style_map! { "lw" => 1 });
        styles.register(&elements::ticks());
        let ticks = style_map! { "labelleft" => false };
        styles.set_panel(CellIndex::new(0, 1), elements::TICKS, ticks);
        styles
    }

    #[test]
    fn test_shared_styles_reach_every_panel() {
        let styles = sample();
        assert!(styles.is_shared(elements::EDGES));
        assert_eq!(
            styles.panel_style(0, 0, elements::EDGES),
            styles.panel_style(0, 1, elements::EDGES)
        );
        assert!(styles.panel_style(0, 0, elements::TICKS).is_none());
        assert!(styles.panel(0, 2).is_err());
    }

    #[test]
    fn test_render_args_strip_reserved() {
        let styles = sample();
        let fig = styles.figure_style(elements::X_LABEL).unwrap();
        let args = styles.render_args(elements::X_LABEL, fig).unwrap();
        assert_eq!(args, style_map! { "fontsize" => 9 });
        assert!(styles.render_args("nope", fig).is_err());
    }

    #[test]
    fn test_display_sections() {
        let text = sample().to_string();
        assert!(text.starts_with("FIGURE-LEVEL STYLES:"));
        let all = text.find("STYLES FOR ALL PANELS").unwrap();
        let specific = text.find("STYLES FOR SPECIFIC PANELS").unwrap();
        assert!(all < specific);
        assert!(text.contains("Panel (0, 1)\n\tticks:\n\t\tlabelleft = false"));
        assert_eq!(text.matches("edges:").count(), 1);
    }
}
