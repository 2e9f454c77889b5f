//! Error types for gridfig operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a figure.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid geometry or style configuration, raised at the call that introduced it.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A required style key was never given a default.
    #[error("missing required configuration for '{element}': {}", .keys.join(", "))]
    MissingConfig {
        /// Element that declared the keys.
        element: String,
        /// Absent keys, in declaration order.
        keys: Vec<String>,
    },

    /// Panel index outside the grid.
    #[error("panel ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },

    /// Item index outside a panel.
    #[error("item {item} not found in panel ({row}, {col}), which holds {len} item(s)")]
    ItemOutOfBounds {
        /// Panel row.
        row: usize,
        /// Panel column.
        col: usize,
        /// Requested item.
        item: usize,
        /// Items in the panel.
        len: usize,
    },

    /// An element was queried with a context of the wrong arity.
    #[error("element '{element}' is {scope}-scoped but was queried at {target} level")]
    ScopeMismatch {
        /// Element name.
        element: String,
        /// Scope of the element.
        scope: &'static str,
        /// Level of the query.
        target: &'static str,
    },

    /// No element with the given name is registered.
    #[error("unknown style element '{0}'")]
    UnknownElement(String),

    /// YAML style file parse error with line number.
    #[error("style file error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// I/O error (style file reads).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Invalid layout or style configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid must have at least one row and one column.
    #[error("grid shape must be at least 1x1, got {rows}x{cols}")]
    InvalidShape {
        /// Rows requested.
        rows: usize,
        /// Columns requested.
        cols: usize,
    },

    /// Size ratios must be positive and finite.
    #[error("{axis} ratio at index {index} must be positive, got {value}")]
    NonPositiveRatio {
        /// "width" or "height".
        axis: &'static str,
        /// Offending index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Ratio sequence does not match the grid.
    #[error("expected {expected} {axis} ratio(s), got {actual}")]
    RatioLengthMismatch {
        /// "width" or "height".
        axis: &'static str,
        /// Columns or rows in the grid.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Spacing must be non-negative and finite.
    #[error("{axis} at gap {index} must be non-negative, got {value}")]
    NegativeSpacing {
        /// "wspace" or "hspace".
        axis: &'static str,
        /// Offending gap.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Per-gap spacing does not match the grid.
    #[error("expected {expected} {axis} gap(s), got {actual}")]
    SpacingLengthMismatch {
        /// "wspace" or "hspace".
        axis: &'static str,
        /// Gaps in the grid (count - 1).
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Margins must be non-negative and finite.
    #[error("{side} margin must be non-negative, got {value}")]
    NegativeMargin {
        /// Margin side.
        side: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Panel unit size must be positive and finite.
    #[error("{axis} must be positive, got {value}")]
    NonPositivePanelSize {
        /// "panel_width" or "panel_height".
        axis: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Scaled figure extent overflowed or collapsed to zero.
    #[error("figure {axis} must be finite and positive, got {value}")]
    InvalidExtent {
        /// "width" or "height".
        axis: &'static str,
        /// Computed extent in device units.
        value: f64,
    },

    /// Key not accepted by the element.
    #[error("'{key}' is not an accepted key for '{element}'")]
    UnknownKey {
        /// Element name.
        element: String,
        /// Rejected key.
        key: String,
    },

    /// Value has the wrong type for its key.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue {
        /// Key being set.
        key: String,
        /// What was wrong.
        message: String,
    },
}
