//! The stock element set.
//!
//! Each constructor returns an unconfigured element; [`stock`] returns all
//! of them in the order a figure build resolves them.

use crate::layout::{check_layout_arg, OPTIONAL_KEYS, REQUIRED_KEYS};
use crate::style_map;

use super::element::{GateAxis, KeyPolicy, PanelGate, Scope, StyleElement, TextField};
use super::rule::StyleRule;

/// Figure-wide arguments (size, dpi, facecolor).
pub const FIGURE: &str = "figure";
/// Panel geometry.
pub const LAYOUT: &str = "layout";
/// Figure-level x-axis label.
pub const X_LABEL: &str = "x_label";
/// Figure-level y-axis label.
pub const Y_LABEL: &str = "y_label";
/// Per-panel axis arguments.
pub const AXIS: &str = "axis";
/// Tick marks and tick labels.
pub const TICKS: &str = "ticks";
/// Axis edges (spines).
pub const EDGES: &str = "edges";
/// Grid lines.
pub const GRID: &str = "grid";
/// Per-panel legend.
pub const LEGEND: &str = "legend";
/// Column label, drawn inside one row of panels.
pub const COL_LABEL: &str = "col_label";
/// Row label, drawn inside one column of panels.
pub const ROW_LABEL: &str = "row_label";
/// Per-item plot arguments.
pub const PLOT: &str = "plot";

/// Name of the ticks rule hiding bottom labels above the last row.
pub const INNER_BOTTOM_LABELS: &str = "inner_bottom_labels";
/// Name of the ticks rule hiding left labels right of the first column.
pub const INNER_LEFT_LABELS: &str = "inner_left_labels";

/// Figure-wide arguments.
#[must_use]
pub fn figure() -> StyleElement {
    StyleElement::new(FIGURE, Scope::Figure)
}

/// Layout element: accepts only layout keys and requires the eight
/// geometry keys before it can be resolved.
#[must_use]
pub fn layout() -> StyleElement {
    let policy = KeyPolicy {
        required: REQUIRED_KEYS.iter().map(|k| (*k).to_string()).collect(),
        allowed: Some(
            REQUIRED_KEYS.iter().chain(OPTIONAL_KEYS.iter()).map(|k| (*k).to_string()).collect(),
        ),
        validator: Some(check_layout_arg),
    };
    StyleElement::new(LAYOUT, Scope::Figure).with_policy(policy)
}

/// Figure-level text at figure position `pos`.
#[must_use]
pub fn fig_text(name: &str, pos: (f64, f64)) -> StyleElement {
    StyleElement::new(name, Scope::Figure).with_text(TextField::default(), pos)
}

/// Panel-level text at axes position `pos`.
#[must_use]
pub fn panel_text(name: &str, pos: (f64, f64)) -> StyleElement {
    StyleElement::new(name, Scope::Panel).with_text(TextField::default(), pos)
}

/// Shared x-axis label, bottom center of the figure.
#[must_use]
pub fn x_label() -> StyleElement {
    fig_text(X_LABEL, (0.5, 0.0))
}

/// Shared y-axis label, left middle of the figure.
#[must_use]
pub fn y_label() -> StyleElement {
    fig_text(Y_LABEL, (0.0, 0.5))
}

/// Per-panel axis arguments.
#[must_use]
pub fn axis() -> StyleElement {
    StyleElement::new(AXIS, Scope::Panel)
}

/// Ticks with no rules.
#[must_use]
pub fn ticks() -> StyleElement {
    StyleElement::new(TICKS, Scope::Panel)
}

/// Ticks whose labels only show on the outer edges of the grid.
#[must_use]
pub fn ticks_outer_labels() -> StyleElement {
    ticks()
        .with_rule(
            StyleRule::new(|ctx| !ctx.is_bottom_row(), style_map! { "labelbottom" => false })
                .named(INNER_BOTTOM_LABELS),
        )
        .with_rule(
            StyleRule::new(|ctx| !ctx.is_left_col(), style_map! { "labelleft" => false })
                .named(INNER_LEFT_LABELS),
        )
}

/// Axis edges.
#[must_use]
pub fn edges() -> StyleElement {
    StyleElement::new(EDGES, Scope::Panel)
}

/// Grid lines.
#[must_use]
pub fn grid_lines() -> StyleElement {
    StyleElement::new(GRID, Scope::Panel)
}

/// Legend, hidden until panels are selected.
#[must_use]
pub fn legend() -> StyleElement {
    StyleElement::new(LEGEND, Scope::Panel).with_default("visible", false)
}

/// Column label, shown in panel row `_idx`.
///
/// `_idx` is a zero-based row index and defaults to 0, the top row; 1
/// selects the second row.
#[must_use]
pub fn col_label() -> StyleElement {
    panel_text(COL_LABEL, (0.5, 0.95)).with_gate(PanelGate::new(GateAxis::Row), 0)
}

/// Row label, shown in panel column `_idx`.
///
/// `_idx` is a zero-based column index and defaults to 0, the left column.
#[must_use]
pub fn row_label() -> StyleElement {
    panel_text(ROW_LABEL, (0.05, 0.05)).with_gate(PanelGate::new(GateAxis::Column), 0)
}

/// Per-item plot arguments.
#[must_use]
pub fn plot() -> StyleElement {
    StyleElement::new(PLOT, Scope::Item)
}

/// Every stock element, figure-level first.
#[must_use]
pub fn stock() -> Vec<StyleElement> {
    vec![
        figure(),
        layout(),
        x_label(),
        y_label(),
        axis(),
        ticks_outer_labels(),
        edges(),
        grid_lines(),
        legend(),
        col_label(),
        row_label(),
        plot(),
    ]
}
