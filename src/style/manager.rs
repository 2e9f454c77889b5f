//! Style manager.
//!
//! Holds the named element collection, offers setters for the common
//! configuration patterns (labels, legend panels, group colors) and turns a
//! [`PanelGrid`] into a [`StyleGrid`] once per figure build.
//!
//! # Example
//!
//! ```rust
//! use gridfig::grid::PanelGrid;
//! use gridfig::style::{elements, Condition, StyleManager};
//! use gridfig::style_map;
//!
//! let mut styles = StyleManager::with_defaults();
//! styles.set_xy_labels(Some("Time (s)"), Some("Voltage (mV)"), Condition::Default)?;
//! styles.set_args(elements::EDGES, &style_map! { "linewidth" => 0.8 }, Condition::Default)?;
//!
//! let grid = PanelGrid::empty(2, 3)?;
//! let resolved = styles.resolve(&grid)?;
//! assert!(resolved.panel_style(1, 2, elements::EDGES).is_some());
//! # Ok::<(), gridfig::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ConfigError, Error, Result};
use crate::grid::{PanelGrid, PropValue};
use crate::layout::DEFAULT_PANEL_SIZE;

use super::context::StyleContext;
use super::element::{PanelSelection, Scope, StyleElement};
use super::elements;
use super::grid::StyleGrid;
use super::rule::{predicate, Predicate, StyleRule};
use super::value::{StyleMap, StyleValue};

/// Default gap between panels, in panel units.
pub const DEFAULT_SPACING: f64 = 0.05;
/// Default figure margin, in panel units.
pub const DEFAULT_MARGIN: f64 = 0.2;

/// Where [`StyleManager::set_args`] files a set of arguments.
#[derive(Clone)]
pub enum Condition {
    /// Element defaults.
    Default,
    /// Override for one classification tag.
    Tag(String),
    /// Override applied when the predicate holds.
    Rule(Predicate),
}

impl Condition {
    /// Tag condition.
    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Condition::Tag(tag.to_string())
    }

    /// Rule condition from a closure.
    #[must_use]
    pub fn rule(f: impl Fn(&StyleContext<'_>) -> bool + Send + Sync + 'static) -> Self {
        Condition::Rule(predicate(f))
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Default => f.write_str("Default"),
            Condition::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Condition::Rule(_) => f.write_str("Rule(..)"),
        }
    }
}

/// Which figure-level axis labels a setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLabel {
    /// Both labels.
    #[default]
    Both,
    /// The x-axis label only.
    X,
    /// The y-axis label only.
    Y,
}

/// Which panel labels a setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLabel {
    /// Row and column labels.
    #[default]
    Both,
    /// Row labels only.
    Row,
    /// Column labels only.
    Col,
}

/// Named collection of style elements.
#[derive(Debug, Clone)]
pub struct StyleManager {
    elements: Vec<StyleElement>,
    prop_text: BTreeMap<String, BTreeMap<PropValue, String>>,
    label_key: String,
    color_key: String,
}

impl Default for StyleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleManager {
    /// Manager with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            prop_text: BTreeMap::new(),
            label_key: "label".to_string(),
            color_key: "color".to_string(),
        }
    }

    /// Manager holding `elements`; later elements replace earlier ones of the same name.
    #[must_use]
    pub fn with_elements(elements: impl IntoIterator<Item = StyleElement>) -> Self {
        let mut manager = Self::new();
        for element in elements {
            manager.add_element(element);
        }
        manager
    }

    /// Stock elements with a usable default layout: 3-inch square panels,
    /// 0.05 spacing and 0.2 margins.
    #[must_use]
    pub fn with_defaults() -> Self {
        let layout = elements::layout()
            .with_default("panel_width", DEFAULT_PANEL_SIZE)
            .with_default("panel_height", DEFAULT_PANEL_SIZE)
            .with_default("wspace", DEFAULT_SPACING)
            .with_default("hspace", DEFAULT_SPACING)
            .with_default("top", DEFAULT_MARGIN)
            .with_default("bottom", DEFAULT_MARGIN)
            .with_default("left", DEFAULT_MARGIN)
            .with_default("right", DEFAULT_MARGIN);
        let mut manager = Self::with_elements(elements::stock());
        manager.add_element(layout);
        manager
    }

    /// Use `key` instead of `label` for item labels.
    #[must_use]
    pub fn with_label_key(mut self, key: &str) -> Self {
        self.label_key = key.to_string();
        self
    }

    /// Use `key` instead of `color` for item colors.
    #[must_use]
    pub fn with_color_key(mut self, key: &str) -> Self {
        self.color_key = key.to_string();
        self
    }

    /// Add an element, returning the one it replaced.
    pub fn add_element(&mut self, element: StyleElement) -> Option<StyleElement> {
        match self.elements.iter_mut().find(|e| e.name() == element.name()) {
            Some(slot) => Some(std::mem::replace(slot, element)),
            None => {
                self.elements.push(element);
                None
            }
        }
    }

    /// Remove an element by name.
    pub fn remove_element(&mut self, name: &str) -> Option<StyleElement> {
        let idx = self.elements.iter().position(|e| e.name() == name)?;
        Some(self.elements.remove(idx))
    }

    /// Elements in resolution order.
    #[must_use]
    pub fn elements(&self) -> &[StyleElement] {
        &self.elements
    }

    /// Element by name.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&StyleElement> {
        self.elements.iter().find(|e| e.name() == name)
    }

    /// Mutable element by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownElement`] if no element is named `name`.
    pub fn element_mut(&mut self, name: &str) -> Result<&mut StyleElement> {
        self.elements
            .iter_mut()
            .find(|e| e.name() == name)
            .ok_or_else(|| Error::UnknownElement(name.to_string()))
    }

    /// File `args` under element `name` as defaults, a tag override or a rule.
    /// Empty `args` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownElement`] for unknown names and the element's
    /// key-policy errors.
    pub fn set_args(&mut self, name: &str, args: &StyleMap, condition: Condition) -> Result<()> {
        if args.is_empty() {
            return Ok(());
        }
        let element = self.element_mut(name)?;
        match condition {
            Condition::Default => element.update_defaults(args),
            Condition::Tag(tag) => element.add_tag_style(&tag, args),
            Condition::Rule(pred) => {
                element.add_rule(StyleRule::from_predicate(pred, args.clone()))
            }
        }
    }

    /// Set the shared x and y label text.
    ///
    /// # Errors
    ///
    /// Fails if the label elements are missing.
    pub fn set_xy_labels(
        &mut self,
        x: Option<&str>,
        y: Option<&str>,
        condition: Condition,
    ) -> Result<()> {
        if let Some(text) = x {
            self.set_text(elements::X_LABEL, text, condition.clone())?;
        }
        if let Some(text) = y {
            self.set_text(elements::Y_LABEL, text, condition)?;
        }
        Ok(())
    }

    /// Set arguments on one or both of the shared axis labels.
    ///
    /// # Errors
    ///
    /// Fails if a targeted label element is missing.
    pub fn set_xy_label_args(
        &mut self,
        args: &StyleMap,
        condition: Condition,
        which: AxisLabel,
    ) -> Result<()> {
        if matches!(which, AxisLabel::Both | AxisLabel::X) {
            self.set_args(elements::X_LABEL, args, condition.clone())?;
        }
        if matches!(which, AxisLabel::Both | AxisLabel::Y) {
            self.set_args(elements::Y_LABEL, args, condition)?;
        }
        Ok(())
    }

    /// Set row and column label text. Typically used with a rule so that
    /// each row or column gets its own text.
    ///
    /// # Errors
    ///
    /// Fails if the label elements are missing.
    pub fn set_rc_labels(
        &mut self,
        row: Option<&str>,
        col: Option<&str>,
        condition: Condition,
    ) -> Result<()> {
        if let Some(text) = row {
            self.set_text(elements::ROW_LABEL, text, condition.clone())?;
        }
        if let Some(text) = col {
            self.set_text(elements::COL_LABEL, text, condition)?;
        }
        Ok(())
    }

    /// Set arguments on row labels, column labels or both.
    ///
    /// # Errors
    ///
    /// Fails if a targeted label element is missing.
    pub fn set_rc_label_args(
        &mut self,
        args: &StyleMap,
        condition: Condition,
        which: GridLabel,
    ) -> Result<()> {
        if matches!(which, GridLabel::Both | GridLabel::Row) {
            self.set_args(elements::ROW_LABEL, args, condition.clone())?;
        }
        if matches!(which, GridLabel::Both | GridLabel::Col) {
            self.set_args(elements::COL_LABEL, args, condition)?;
        }
        Ok(())
    }

    /// Show legends on the selected panels.
    ///
    /// # Errors
    ///
    /// Fails if the legend element is missing.
    pub fn set_legend_panels(&mut self, selection: PanelSelection) -> Result<()> {
        self.element_mut(elements::LEGEND)?.set_visible_panels(selection)
    }

    /// Display `values` of `prop` as `names`: records the text and sets the
    /// label key of matching items.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the two lists differ in
    /// length and [`Error::UnknownElement`] if the plot element is missing.
    pub fn display_as<V: Into<PropValue>>(
        &mut self,
        prop: &str,
        values: Vec<V>,
        names: &[&str],
    ) -> Result<()> {
        check_pairing(prop, values.len(), names.len(), "names")?;
        let label_key = self.label_key.clone();
        for (value, name) in values.into_iter().map(Into::into).zip(names) {
            let mut args = StyleMap::new();
            args.insert(label_key.clone(), StyleValue::from(*name));
            self.element_mut(elements::PLOT)?.add_group_style(prop, [value.clone()], &args)?;
            self.prop_text.entry(prop.to_string()).or_default().insert(value, (*name).to_string());
        }
        Ok(())
    }

    /// Color items by their value of `prop`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the two lists differ in
    /// length and [`Error::UnknownElement`] if the plot element is missing.
    pub fn set_colors<V: Into<PropValue>>(
        &mut self,
        prop: &str,
        values: Vec<V>,
        colors: &[&str],
    ) -> Result<()> {
        check_pairing(prop, values.len(), colors.len(), "colors")?;
        let color_key = self.color_key.clone();
        let plot = self.element_mut(elements::PLOT)?;
        for (value, color) in values.into_iter().zip(colors) {
            let mut args = StyleMap::new();
            args.insert(color_key.clone(), StyleValue::from(*color));
            plot.add_group_style(prop, [value], &args)?;
        }
        Ok(())
    }

    /// Display text for `value` of `prop`; the value itself when none was set.
    #[must_use]
    pub fn label_for(&self, prop: &str, value: &PropValue) -> String {
        self.prop_text
            .get(prop)
            .and_then(|names| names.get(value))
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }

    /// Set all four layout margins.
    ///
    /// # Errors
    ///
    /// Fails for negative margins or a missing layout element.
    pub fn set_all_margins(&mut self, margin: f64) -> Result<()> {
        let mut args = StyleMap::new();
        for side in ["top", "bottom", "left", "right"] {
            args.insert(side.to_string(), StyleValue::Float(margin));
        }
        self.element_mut(elements::LAYOUT)?.update_defaults(&args)
    }

    /// Use square panels of `size`.
    ///
    /// # Errors
    ///
    /// Fails for non-positive sizes or a missing layout element.
    pub fn set_square_panels(&mut self, size: f64) -> Result<()> {
        let mut args = StyleMap::new();
        args.insert("panel_width".to_string(), StyleValue::Float(size));
        args.insert("panel_height".to_string(), StyleValue::Float(size));
        self.element_mut(elements::LAYOUT)?.update_defaults(&args)
    }

    /// Use the same uniform gap between rows and columns.
    ///
    /// # Errors
    ///
    /// Fails for negative gaps or a missing layout element.
    pub fn set_padding(&mut self, pad: f64) -> Result<()> {
        let mut args = StyleMap::new();
        args.insert("wspace".to_string(), StyleValue::Float(pad));
        args.insert("hspace".to_string(), StyleValue::Float(pad));
        self.element_mut(elements::LAYOUT)?.update_defaults(&args)
    }

    /// Resolve every element against `grid`.
    ///
    /// # Errors
    ///
    /// Propagates the first resolution error, e.g. [`Error::MissingConfig`].
    pub fn resolve(&self, grid: &PanelGrid) -> Result<StyleGrid> {
        let shape = grid.shape();
        log::debug!("resolving {} style elements over a {shape} grid", self.elements.len());

        let mut styles = StyleGrid::new(grid);
        for element in &self.elements {
            styles.register(element);
            let name = element.name();
            match element.scope() {
                Scope::Figure => styles.set_figure(name, element.figure_styles(grid)?),
                Scope::Panel if element.is_uniform() => {
                    let style = element.panel_styles(grid, 0, 0)?;
                    styles.set_shared(name, &style);
                }
                Scope::Panel => {
                    for cell in shape.cells() {
                        let style = element.panel_styles(grid, cell.row, cell.col)?;
                        styles.set_panel(cell, name, style);
                    }
                }
                Scope::Item => {
                    for (cell, panel) in grid.panels().iter() {
                        for k in 0..panel.items.len() {
                            let style = element.item_styles(grid, cell.row, cell.col, k)?;
                            styles.set_item(cell, k, name, style);
                        }
                    }
                }
            }
        }
        Ok(styles)
    }

    fn set_text(&mut self, name: &str, text: &str, condition: Condition) -> Result<()> {
        let key = self
            .element(name)
            .and_then(StyleElement::text_field)
            .ok_or_else(|| Error::UnknownElement(name.to_string()))?
            .text_key;
        let mut args = StyleMap::new();
        args.insert(key.to_string(), StyleValue::from(text));
        self.set_args(name, &args, condition)
    }
}

fn check_pairing(prop: &str, values: usize, given: usize, what: &str) -> Result<()> {
    if values == given {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: prop.to_string(),
            message: format!("{values} values but {given} {what}"),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, GridShape, ItemMeta, PanelMeta};
    use crate::style_map;

    fn grid() -> PanelGrid {
        let shape = GridShape::new(2, 2).unwrap();
        PanelGrid::new(Grid::from_fn(shape, |_| {
            PanelMeta::new()
                .group_by("genotype")
                .item(ItemMeta::new().prop("genotype", "wt"))
                .item(ItemMeta::new().prop("genotype", "ko"))
        }))
    }

    #[test]
    fn test_defaults_resolve() {
        let styles = StyleManager::with_defaults().resolve(&grid()).unwrap();
        let layout = styles.figure_style(elements::LAYOUT).unwrap();
        assert_eq!(layout["panel_width"].as_f64(), Some(3.0));
        assert_eq!(
            styles.panel_style(1, 1, elements::LEGEND).unwrap()["visible"],
            StyleValue::Bool(false)
        );
        assert_eq!(styles.items(0, 0).unwrap().len(), 2);
    }

    #[test]
    fn test_stock_without_layout_defaults_fails() {
        let manager = StyleManager::with_elements(elements::stock());
        assert!(matches!(manager.resolve(&grid()), Err(Error::MissingConfig { .. })));
    }

    #[test]
    fn test_set_args_routes_condition() {
        let mut m = StyleManager::with_defaults();
        m.set_args(elements::EDGES, &style_map! { "lw" => 1 }, Condition::Default).unwrap();
        m.set_args(elements::EDGES, &style_map! { "lw" => 2 }, Condition::tag("log")).unwrap();
        m.set_args(
            elements::EDGES,
            &style_map! { "lw" => 3 },
            Condition::rule(|ctx| ctx.row() == Some(1)),
        )
        .unwrap();
        let mut g = grid();
        g.panel_mut(0, 1).unwrap().add_tag("log");
        let styles = m.resolve(&g).unwrap();
        assert_eq!(styles.panel_style(0, 0, elements::EDGES).unwrap()["lw"], StyleValue::Int(1));
        assert_eq!(styles.panel_style(0, 1, elements::EDGES).unwrap()["lw"], StyleValue::Int(2));
        assert_eq!(styles.panel_style(1, 0, elements::EDGES).unwrap()["lw"], StyleValue::Int(3));
        assert!(!styles.is_shared(elements::EDGES));
    }

    #[test]
    fn test_set_args_unknown_element() {
        let mut m = StyleManager::new();
        let err = m.set_args("ticks", &style_map! { "a" => 1 }, Condition::Default).unwrap_err();
        assert!(matches!(err, Error::UnknownElement(name) if name == "ticks"));
        assert!(m.set_args("ticks", &StyleMap::new(), Condition::Default).is_ok());
    }

    #[test]
    fn test_rc_label_args_target_the_right_element() {
        let mut m = StyleManager::with_defaults();
        let args = style_map! { "fontsize" => 8 };
        m.set_rc_label_args(&args, Condition::Default, GridLabel::Row).unwrap();
        assert!(m.element(elements::ROW_LABEL).unwrap().defaults().contains_key("fontsize"));
        assert!(!m.element(elements::COL_LABEL).unwrap().defaults().contains_key("fontsize"));
    }

    #[test]
    fn test_xy_labels() {
        let mut m = StyleManager::with_defaults();
        m.set_xy_labels(Some("Time"), None, Condition::Default).unwrap();
        let args = style_map! { "fontsize" => 12 };
        m.set_xy_label_args(&args, Condition::Default, AxisLabel::Y).unwrap();
        let styles = m.resolve(&grid()).unwrap();
        assert_eq!(
            styles.figure_style(elements::X_LABEL).unwrap()["text"],
            StyleValue::from("Time")
        );
        assert!(styles.figure_style(elements::Y_LABEL).unwrap().contains_key("fontsize"));
    }

    #[test]
    fn test_colors_and_display_names() {
        let mut m = StyleManager::with_defaults();
        m.set_colors("genotype", vec!["wt", "ko"], &["black", "red"]).unwrap();
        m.display_as("genotype", vec!["ko"], &["knockout"]).unwrap();
        let styles = m.resolve(&grid()).unwrap();
        let ko = styles.item_style(1, 0, 1, elements::PLOT).unwrap();
        assert_eq!(ko["color"], StyleValue::from("red"));
        assert_eq!(ko["label"], StyleValue::from("knockout"));
        assert_eq!(m.label_for("genotype", &PropValue::from("ko")), "knockout");
        assert_eq!(m.label_for("genotype", &PropValue::from("wt")), "wt");
        assert!(m.set_colors("genotype", vec!["wt"], &["a", "b"]).is_err());
    }

    #[test]
    fn test_legend_panels() {
        let mut m = StyleManager::with_defaults();
        m.set_legend_panels(PanelSelection::Cells(vec![(0, 1).into()])).unwrap();
        let styles = m.resolve(&grid()).unwrap();
        assert_eq!(
            styles.panel_style(0, 1, elements::LEGEND).unwrap()["visible"],
            StyleValue::Bool(true)
        );
        assert_eq!(
            styles.panel_style(1, 1, elements::LEGEND).unwrap()["visible"],
            StyleValue::Bool(false)
        );
    }

    #[test]
    fn test_layout_helpers() {
        let mut m = StyleManager::with_defaults();
        m.set_all_margins(0.1).unwrap();
        m.set_square_panels(2.0).unwrap();
        m.set_padding(0.0).unwrap();
        assert!(m.set_all_margins(-1.0).is_err());
        let layout = m.element(elements::LAYOUT).unwrap().defaults();
        assert_eq!(layout["left"].as_f64(), Some(0.1));
        assert_eq!(layout["panel_height"].as_f64(), Some(2.0));
        assert_eq!(layout["hspace"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_add_element_replaces() {
        let mut m = StyleManager::with_defaults();
        let count = m.elements().len();
        assert!(m.add_element(elements::ticks()).is_some());
        assert_eq!(m.elements().len(), count);
        assert!(m.remove_element(elements::TICKS).is_some());
        assert!(m.element(elements::TICKS).is_none());
    }
}
