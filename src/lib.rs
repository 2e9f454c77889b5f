//! # gridfig
//!
//! Declarative panel-grid layout and layered style resolution for
//! data-driven figures.
//!
//! gridfig sits between a grid of plot panels and a plotting backend. It
//! computes where each panel goes and which style arguments each figure,
//! panel and plotted item receives; drawing is left to a [`figure::Renderer`].
//!
//! ## Features
//!
//! - **Layout engine**: per-axis size ratios, per-gap spacing and margins in
//!   panel units, turned into a figure size and normalized panel rectangles
//! - **Style engine**: defaults, tag overrides, group overrides and rules,
//!   merged lowest-first into a fresh map per query
//! - **Stock elements**: figure, layout, axis labels, ticks, edges, grid
//!   lines, legends, row and column labels, plot items
//! - **Style files**: YAML configuration behind the `yaml` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use gridfig::prelude::*;
//! use gridfig::style_map;
//!
//! let mut styles = StyleManager::with_defaults();
//! styles.set_xy_labels(Some("Time (s)"), Some("Rate (Hz)"), Condition::Default)?;
//! styles.set_args(
//!     elements::TICKS,
//!     &style_map! { "labelsize" => 8 },
//!     Condition::rule(|ctx| ctx.is_bottom_row()),
//! )?;
//!
//! let grid = PanelGrid::empty(2, 3)?;
//! let plan = FigurePlan::build(&styles, &grid)?;
//!
//! assert_eq!(plan.placements()?.len(), 6);
//! # Ok::<(), gridfig::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `yaml` (default): load figure styles from YAML files

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Placement rectangles and figure sizes.
pub mod geometry;

/// Panel grid context: shape, cell arena, panel and item metadata.
pub mod grid;

/// Panel-grid geometry.
pub mod layout;

// ============================================================================
// Style Modules
// ============================================================================

/// Layered style resolution.
pub mod style;

// ============================================================================
// Rendering Boundary
// ============================================================================

/// Figure builds handed to a renderer.
pub mod figure;

// ============================================================================
// Configuration
// ============================================================================

/// YAML figure-style files.
#[cfg(feature = "yaml")]
#[cfg_attr(docsrs, doc(cfg(feature = "yaml")))]
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for gridfig operations.
pub mod error;

pub use error::{ConfigError, Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use gridfig::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "yaml")]
    pub use crate::config::FigureStyleFile;
    pub use crate::error::{ConfigError, Error, Result};
    pub use crate::figure::{Annotation, FigurePlan, PanelPlacement, Renderer};
    pub use crate::geometry::{FigureSize, Rect};
    pub use crate::grid::{
        CellIndex, Grid, GridShape, ItemMeta, PanelGrid, PanelMeta, PropFilter, PropValue,
    };
    pub use crate::layout::{FigureLayout, LayoutConfig, Margins, Spacing};
    pub use crate::style::{
        elements, AxisLabel, Condition, GridLabel, PanelSelection, Scope, StyleContext,
        StyleElement, StyleGrid, StyleManager, StyleMap, StyleRule, StyleValue,
    };
}

// ============================================================================
// Tests
// ============================================================================
