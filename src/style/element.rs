//! Style elements.
//!
//! A [`StyleElement`] is one named, independently configurable category of
//! styling (ticks, edges, legend, x-label, ...). It is configured once and
//! then queried per figure build. Resolution layers four tiers, lowest
//! precedence first:
//!
//! 1. static defaults,
//! 2. tag overrides, applied in the order the context lists its tags,
//! 3. group overrides (item-level only), keyed by the item's value of the
//!    panel's grouping property,
//! 4. rules, in insertion order.
//!
//! Resolution never mutates the element and always returns a fresh map.
//!
//! Behaviors that older designs expressed through subclassing are small
//! components here: [`TextField`] reserves the `text` and `pos` keys of
//! annotations, [`PanelGate`] restricts a panel element to a single row or
//! column, and [`KeyPolicy`] restricts and validates keys.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::error::{ConfigError, Error, Result};
use crate::grid::{CellIndex, GridShape, PanelGrid, PropFilter, PropValue};

use super::context::{StyleContext, Target};
use super::rule::StyleRule;
use super::value::{merge_layers, StyleMap, StyleValue};

/// How many instances of an element a figure has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// One per figure.
    Figure,
    /// One per panel cell.
    Panel,
    /// One per plotted item.
    Item,
}

impl Scope {
    /// Scope name used in diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Figure => "figure",
            Scope::Panel => "panel",
            Scope::Item => "item",
        }
    }

    fn accepts(self, target: Target) -> bool {
        matches!(
            (self, target),
            (Scope::Figure, Target::Figure)
                | (Scope::Panel, Target::Panel(_))
                | (Scope::Item, Target::Item(..))
        )
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved text and position keys of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField {
    /// Key holding the annotation text.
    pub text_key: &'static str,
    /// Key holding the annotation position.
    pub pos_key: &'static str,
}

impl Default for TextField {
    fn default() -> Self {
        Self { text_key: "text", pos_key: "pos" }
    }
}

impl TextField {
    /// Annotation text from a resolved map; `None` when unset or empty.
    #[must_use]
    pub fn text<'m>(&self, style: &'m StyleMap) -> Option<&'m str> {
        style.get(self.text_key).and_then(StyleValue::as_str).filter(|s| !s.is_empty())
    }

    /// Annotation position from a resolved map.
    #[must_use]
    pub fn position(&self, style: &StyleMap) -> Option<(f64, f64)> {
        style.get(self.pos_key).and_then(StyleValue::as_pair)
    }
}

/// Which panel index a [`PanelGate`] compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAxis {
    /// Admit only panels whose row equals the gate index.
    Row,
    /// Admit only panels whose column equals the gate index.
    Column,
}

/// Restricts a panel element to one row or one column of the grid.
///
/// The index is read from the reserved `_idx` key of the resolved style, so
/// it can be set by defaults or rules like any other key. Panels outside the
/// gate resolve to an empty map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGate {
    /// Axis compared against the index.
    pub axis: GateAxis,
    /// Reserved key holding the index.
    pub index_key: &'static str,
}

impl PanelGate {
    /// Gate on `axis` using the `_idx` key.
    #[must_use]
    pub const fn new(axis: GateAxis) -> Self {
        Self { axis, index_key: "_idx" }
    }

    fn admits(&self, cell: CellIndex, style: &StyleMap) -> bool {
        let Some(idx) = style.get(self.index_key).and_then(StyleValue::as_i64) else {
            return false;
        };
        let pos = match self.axis {
            GateAxis::Row => cell.row,
            GateAxis::Column => cell.col,
        };
        usize::try_from(idx).is_ok_and(|idx| idx == pos)
    }
}

/// Value check applied to every key written to a restricted element.
pub type KeyValidator = fn(&str, &StyleValue) -> Result<()>;

/// Which keys an element accepts and which it requires.
#[derive(Debug, Clone, Default)]
pub struct KeyPolicy {
    /// Keys that must have a default before the element can be resolved.
    pub required: Vec<String>,
    /// When set, the only keys that may be written.
    pub allowed: Option<Vec<String>>,
    /// Per-key value check run on every write.
    pub validator: Option<KeyValidator>,
}

impl KeyPolicy {
    fn check(&self, element: &str, args: &StyleMap) -> Result<()> {
        for (key, value) in args {
            if let Some(allowed) = &self.allowed {
                if !allowed.iter().any(|k| k == key) {
                    return Err(ConfigError::UnknownKey {
                        element: element.to_string(),
                        key: key.clone(),
                    }
                    .into());
                }
            }
            if let Some(validate) = self.validator {
                validate(key, value)?;
            }
        }
        Ok(())
    }
}

/// A set of panels, used to gate rules such as legend visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelSelection {
    /// Every panel.
    All,
    /// One row.
    Row(usize),
    /// One column.
    Col(usize),
    /// The bottom row.
    LastRow,
    /// The rightmost column.
    LastCol,
    /// A block of rows and columns.
    Block {
        /// Row range.
        rows: Range<usize>,
        /// Column range.
        cols: Range<usize>,
    },
    /// Explicit cells.
    Cells(Vec<CellIndex>),
}

impl PanelSelection {
    /// Whether `cell` is selected in a grid of `shape`.
    #[must_use]
    pub fn contains(&self, cell: CellIndex, shape: GridShape) -> bool {
        if !shape.contains(cell.row, cell.col) {
            return false;
        }
        match self {
            PanelSelection::All => true,
            PanelSelection::Row(r) => cell.row == *r,
            PanelSelection::Col(c) => cell.col == *c,
            PanelSelection::LastRow => cell.row + 1 == shape.rows(),
            PanelSelection::LastCol => cell.col + 1 == shape.cols(),
            PanelSelection::Block { rows, cols } => {
                rows.contains(&cell.row) && cols.contains(&cell.col)
            }
            PanelSelection::Cells(cells) => cells.contains(&cell),
        }
    }
}

/// A named, layered style specification.
#[derive(Debug, Clone)]
pub struct StyleElement {
    name: String,
    scope: Scope,
    defaults: StyleMap,
    tag_styles: BTreeMap<String, StyleMap>,
    group_styles: BTreeMap<String, BTreeMap<PropValue, StyleMap>>,
    rules: Vec<StyleRule>,
    policy: KeyPolicy,
    text: Option<TextField>,
    gate: Option<PanelGate>,
    reserved: Vec<String>,
}

impl StyleElement {
    /// Empty element.
    #[must_use]
    pub fn new(name: &str, scope: Scope) -> Self {
        Self {
            name: name.to_string(),
            scope,
            defaults: StyleMap::new(),
            tag_styles: BTreeMap::new(),
            group_styles: BTreeMap::new(),
            rules: Vec::new(),
            policy: KeyPolicy::default(),
            text: None,
            gate: None,
            reserved: Vec::new(),
        }
    }

    /// Restrict accepted keys and declare required ones. Required and
    /// allowed keys become reserved: they configure the engine and are not
    /// forwarded to the renderer.
    #[must_use]
    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        for key in policy.required.iter().chain(policy.allowed.iter().flatten()) {
            if !self.reserved.contains(key) {
                self.reserved.push(key.clone());
            }
        }
        self.policy = policy;
        self
    }

    /// Attach annotation text and position, with their defaults.
    #[must_use]
    pub fn with_text(mut self, field: TextField, pos: (f64, f64)) -> Self {
        self.defaults.insert(field.text_key.to_string(), StyleValue::from(""));
        self.defaults.insert(field.pos_key.to_string(), StyleValue::from(pos));
        self.text = Some(field);
        self
    }

    /// Restrict a panel element to one row or column, starting at index `index`.
    #[must_use]
    pub fn with_gate(mut self, gate: PanelGate, index: usize) -> Self {
        self.defaults.insert(gate.index_key.to_string(), StyleValue::from(index));
        self.gate = Some(gate);
        self
    }

    /// Stock-element default; bypasses the key policy.
    #[must_use]
    pub(crate) fn with_default(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.defaults.insert(key.to_string(), value.into());
        self
    }

    /// Stock-element rule; bypasses the key policy.
    #[must_use]
    pub(crate) fn with_rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Mark an additional key as reserved.
    #[must_use]
    pub fn with_reserved(mut self, key: &str) -> Self {
        self.reserved.push(key.to_string());
        self
    }

    /// Element name (the key its styles are stored under).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element scope.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Static defaults.
    #[must_use]
    pub fn defaults(&self) -> &StyleMap {
        &self.defaults
    }

    /// Annotation field, if this element is an annotation.
    #[must_use]
    pub fn text_field(&self) -> Option<TextField> {
        self.text
    }

    /// Rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Keys consumed by the engine rather than the renderer.
    #[must_use]
    pub fn reserved_keys(&self) -> Vec<String> {
        let mut keys = self.reserved.clone();
        if let Some(field) = self.text {
            keys.push(field.text_key.to_string());
            keys.push(field.pos_key.to_string());
        }
        if let Some(gate) = self.gate {
            keys.push(gate.index_key.to_string());
        }
        keys
    }

    /// Copy of `style` without reserved keys.
    #[must_use]
    pub fn strip_reserved(&self, style: &StyleMap) -> StyleMap {
        let reserved = self.reserved_keys();
        style
            .iter()
            .filter(|(k, _)| !reserved.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Set one default.
    ///
    /// # Errors
    ///
    /// Fails if the key policy rejects the key or value.
    pub fn set_default(&mut self, key: &str, value: impl Into<StyleValue>) -> Result<()> {
        let mut args = StyleMap::new();
        args.insert(key.to_string(), value.into());
        self.update_defaults(&args)
    }

    /// Merge `args` into the defaults. The caller's map is not modified.
    ///
    /// # Errors
    ///
    /// Fails if the key policy rejects any key or value; nothing is written then.
    pub fn update_defaults(&mut self, args: &StyleMap) -> Result<()> {
        self.policy.check(&self.name, args)?;
        self.defaults.extend(args.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    /// Merge `args` into the override for `tag`.
    ///
    /// # Errors
    ///
    /// Fails if the key policy rejects any key or value.
    pub fn add_tag_style(&mut self, tag: &str, args: &StyleMap) -> Result<()> {
        self.policy.check(&self.name, args)?;
        self.tag_styles
            .entry(tag.to_string())
            .or_default()
            .extend(args.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    /// Drop the override for `tag`; returns whether one existed.
    pub fn remove_tag_style(&mut self, tag: &str) -> bool {
        self.tag_styles.remove(tag).is_some()
    }

    /// Merge `args` into the group override of each value of `prop`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeMismatch`] for non-item elements, or a policy error.
    pub fn add_group_style<V: Into<PropValue>>(
        &mut self,
        prop: &str,
        values: impl IntoIterator<Item = V>,
        args: &StyleMap,
    ) -> Result<()> {
        self.require_item_scope()?;
        self.policy.check(&self.name, args)?;
        if args.is_empty() {
            return Ok(());
        }
        let by_value = self.group_styles.entry(prop.to_string()).or_default();
        for value in values {
            by_value
                .entry(value.into())
                .or_default()
                .extend(args.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Ok(())
    }

    /// Drop the group override for one value; returns whether one existed.
    pub fn remove_group_style(&mut self, prop: &str, value: &PropValue) -> bool {
        let Some(by_value) = self.group_styles.get_mut(prop) else {
            return false;
        };
        let removed = by_value.remove(value).is_some();
        if by_value.is_empty() {
            self.group_styles.remove(prop);
        }
        removed
    }

    /// Append a rule.
    ///
    /// # Errors
    ///
    /// Fails if the key policy rejects the rule's arguments.
    pub fn add_rule(&mut self, rule: StyleRule) -> Result<()> {
        self.policy.check(&self.name, rule.args())?;
        self.rules.push(rule);
        Ok(())
    }

    /// Append a rule for items whose properties satisfy `include` and avoid `exclude`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeMismatch`] for non-item elements, or a policy error.
    pub fn add_match_rule(
        &mut self,
        include: PropFilter,
        exclude: PropFilter,
        args: StyleMap,
    ) -> Result<()> {
        self.require_item_scope()?;
        self.add_rule(StyleRule::new(
            move |ctx| ctx.item_meta().is_some_and(|item| item.matches(&include, &exclude)),
            args,
        ))
    }

    /// Append a rule setting `visible: true` on the selected panels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeMismatch`] for non-panel elements, or a policy error.
    pub fn set_visible_panels(&mut self, selection: PanelSelection) -> Result<()> {
        if self.scope != Scope::Panel {
            return Err(Error::ScopeMismatch {
                element: self.name.clone(),
                scope: self.scope.as_str(),
                target: Scope::Panel.as_str(),
            });
        }
        let mut args = StyleMap::new();
        args.insert("visible".to_string(), StyleValue::Bool(true));
        self.add_rule(StyleRule::new(
            move |ctx| ctx.cell().is_some_and(|cell| selection.contains(cell, ctx.shape())),
            args,
        ))
    }

    /// Remove every rule named `name`; returns whether any was removed.
    pub fn remove_rule(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name() != Some(name));
        self.rules.len() != before
    }

    /// True when every panel resolves to the same map.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.rules.is_empty() && self.tag_styles.is_empty() && self.gate.is_none()
    }

    /// Required keys that have no default, in declaration order.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        self.policy.required.iter().filter(|k| !self.defaults.contains_key(*k)).cloned().collect()
    }

    /// Resolve the final style for `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeMismatch`] if `ctx` is at the wrong level for
    /// this element and [`Error::MissingConfig`] if required keys were never
    /// given defaults.
    pub fn resolve(&self, ctx: &StyleContext<'_>) -> Result<StyleMap> {
        let target = ctx.target();
        if !self.scope.accepts(target) {
            return Err(Error::ScopeMismatch {
                element: self.name.clone(),
                scope: self.scope.as_str(),
                target: target.level(),
            });
        }

        let missing = self.missing_keys();
        if !missing.is_empty() {
            return Err(Error::MissingConfig { element: self.name.clone(), keys: missing });
        }

        let mut layers: Vec<&StyleMap> = vec![&self.defaults];

        for tag in ctx.tags() {
            match self.tag_styles.get(tag) {
                Some(style) => layers.push(style),
                None => log::warn!(
                    "{} type '{tag}' has no style in element '{}'; skipping",
                    target.level(),
                    self.name
                ),
            }
        }

        if let Some(style) = self.group_style(ctx) {
            layers.push(style);
        }

        layers.extend(self.rules.iter().filter_map(|rule| rule.evaluate(ctx)));

        let merged = merge_layers(layers);

        if let (Some(gate), Some(cell)) = (self.gate, ctx.cell()) {
            if !gate.admits(cell, &merged) {
                return Ok(StyleMap::new());
            }
        }
        Ok(merged)
    }

    /// Resolve a figure-level element.
    ///
    /// # Errors
    ///
    /// See [`StyleElement::resolve`].
    pub fn figure_styles(&self, grid: &PanelGrid) -> Result<StyleMap> {
        self.resolve(&StyleContext::figure(grid))
    }

    /// Resolve a panel-level element.
    ///
    /// # Errors
    ///
    /// See [`StyleElement::resolve`]; also fails for out-of-bounds panels.
    pub fn panel_styles(&self, grid: &PanelGrid, row: usize, col: usize) -> Result<StyleMap> {
        self.resolve(&StyleContext::panel(grid, row, col)?)
    }

    /// Resolve an item-level element.
    ///
    /// # Errors
    ///
    /// See [`StyleElement::resolve`]; also fails for out-of-bounds items.
    pub fn item_styles(
        &self,
        grid: &PanelGrid,
        row: usize,
        col: usize,
        item: usize,
    ) -> Result<StyleMap> {
        self.resolve(&StyleContext::item(grid, row, col, item)?)
    }

    fn group_style(&self, ctx: &StyleContext<'_>) -> Option<&StyleMap> {
        let panel = ctx.panel_meta()?;
        let prop = panel.group_prop.as_deref()?;
        let value = panel.group_value(ctx.item_index()?)?;
        self.group_styles.get(prop)?.get(value)
    }

    fn require_item_scope(&self) -> Result<()> {
        if self.scope == Scope::Item {
            Ok(())
        } else {
            Err(Error::ScopeMismatch {
                element: self.name.clone(),
                scope: self.scope.as_str(),
                target: Scope::Item.as_str(),
            })
        }
    }
}
