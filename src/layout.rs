//! Figure layout engine.
//!
//! Turns a grid of rows and columns with per-axis size ratios, inter-panel
//! spacing and outer margins into a total figure size and one normalized
//! placement rectangle per panel.
//!
//! All ratio-unit quantities are multiples of the panel unit size: x-axis
//! quantities (`width_ratios`, `wspace`, `left`, `right`) scale by
//! `panel_width`, y-axis quantities (`height_ratios`, `hspace`, `top`,
//! `bottom`) by `panel_height`.
//!
//! Row 0 is the topmost row. A panel's bottom edge is found by walking down
//! from the top of the figure, so the grid reads top-to-bottom like a table.
//!
//! # Example
//!
//! ```rust
//! use gridfig::layout::{LayoutConfig, Margins, Spacing};
//!
//! let layout = LayoutConfig::new(2, 2)?
//!     .with_panel_size(3.0, 3.0)?
//!     .with_margins(Margins::uniform(0.2))?
//!     .with_wspace(Spacing::Uniform(0.05))?
//!     .with_hspace(Spacing::Uniform(0.05))?
//!     .compute();
//!
//! assert!((layout.size().width - 7.35).abs() < 1e-9);
//! # Ok::<(), gridfig::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::geometry::{FigureSize, Rect};
use crate::grid::{Grid, GridShape};
use crate::style::{StyleMap, StyleValue};

/// Panel unit size used when none is configured (inches).
pub const DEFAULT_PANEL_SIZE: f64 = 3.0;

/// Keys the layout style element must define.
pub const REQUIRED_KEYS: [&str; 8] =
    ["panel_width", "panel_height", "wspace", "hspace", "top", "bottom", "left", "right"];

/// Keys the layout style element may define.
pub const OPTIONAL_KEYS: [&str; 2] = ["width_ratios", "height_ratios"];

/// Gap between adjacent panels along one axis, in ratio units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spacing {
    /// Same gap everywhere.
    Uniform(f64),
    /// One gap per adjacent pair (`count - 1` entries).
    PerGap(Vec<f64>),
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Uniform(0.0)
    }
}

impl Spacing {
    /// Expand to exactly `count - 1` validated gaps.
    fn gaps(&self, axis: &'static str, count: usize) -> Result<Vec<f64>> {
        let n = count.saturating_sub(1);
        let gaps = match self {
            Spacing::Uniform(v) => vec![*v; n],
            Spacing::PerGap(v) => {
                if v.len() != n {
                    return Err(ConfigError::SpacingLengthMismatch {
                        axis,
                        expected: n,
                        actual: v.len(),
                    }
                    .into());
                }
                v.clone()
            }
        };
        // A uniform value is checked even when there are no gaps to fill.
        let values = match self {
            Spacing::Uniform(v) => std::slice::from_ref(v),
            Spacing::PerGap(v) => v.as_slice(),
        };
        if let Some((index, &value)) =
            values.iter().enumerate().find(|(_, v)| !(v.is_finite() && **v >= 0.0))
        {
            return Err(ConfigError::NegativeSpacing { axis, index, value }.into());
        }
        Ok(gaps)
    }
}

/// Border space outside the panel grid, in ratio units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    /// Above the first row.
    pub top: f64,
    /// Below the last row.
    pub bottom: f64,
    /// Left of the first column.
    pub left: f64,
    /// Right of the last column.
    pub right: f64,
}

impl Margins {
    /// Explicit margins.
    #[must_use]
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self { top, bottom, left, right }
    }

    /// Same margin on every side.
    #[must_use]
    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    fn validate(&self) -> Result<()> {
        for (side, value) in
            [("top", self.top), ("bottom", self.bottom), ("left", self.left), ("right", self.right)]
        {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeMargin { side, value }.into());
            }
        }
        Ok(())
    }
}

fn check_ratios(axis: &'static str, ratios: &[f64], expected: usize) -> Result<()> {
    if ratios.len() != expected {
        return Err(
            ConfigError::RatioLengthMismatch { axis, expected, actual: ratios.len() }.into()
        );
    }
    if let Some((index, &value)) =
        ratios.iter().enumerate().find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(ConfigError::NonPositiveRatio { axis, index, value }.into());
    }
    Ok(())
}

fn check_panel_size(axis: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositivePanelSize { axis, value }.into())
    }
}

/// Validated layout configuration.
///
/// Every setter validates its input and fails before any geometry is
/// computed, so [`LayoutConfig::compute`] cannot fail. Setters also fail
/// with [`ConfigError::InvalidExtent`] when the scaled figure width or
/// height would overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    shape: GridShape,
    width_ratios: Vec<f64>,
    height_ratios: Vec<f64>,
    wspace: Vec<f64>,
    hspace: Vec<f64>,
    margins: Margins,
    panel_width: f64,
    panel_height: f64,
}

impl LayoutConfig {
    /// Layout for a `rows` x `cols` grid with unit ratios, no spacing and no margins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShape`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::for_shape(GridShape::new(rows, cols)?))
    }

    /// Layout for an already validated shape.
    #[must_use]
    pub fn for_shape(shape: GridShape) -> Self {
        Self {
            shape,
            width_ratios: vec![1.0; shape.cols()],
            height_ratios: vec![1.0; shape.rows()],
            wspace: vec![0.0; shape.cols() - 1],
            hspace: vec![0.0; shape.rows() - 1],
            margins: Margins::default(),
            panel_width: DEFAULT_PANEL_SIZE,
            panel_height: DEFAULT_PANEL_SIZE,
        }
    }

    /// Set relative column widths (one per column).
    ///
    /// # Errors
    ///
    /// Fails on a length mismatch or a non-positive ratio.
    pub fn with_width_ratios(mut self, ratios: Vec<f64>) -> Result<Self> {
        check_ratios("width", &ratios, self.shape.cols())?;
        self.width_ratios = ratios;
        self.check_extents()?;
        Ok(self)
    }

    /// Set relative row heights (one per row, top row first).
    ///
    /// # Errors
    ///
    /// Fails on a length mismatch or a non-positive ratio.
    pub fn with_height_ratios(mut self, ratios: Vec<f64>) -> Result<Self> {
        check_ratios("height", &ratios, self.shape.rows())?;
        self.height_ratios = ratios;
        self.check_extents()?;
        Ok(self)
    }

    /// Set horizontal gaps between columns.
    ///
    /// # Errors
    ///
    /// Fails on a negative gap or a per-gap length other than `cols - 1`.
    pub fn with_wspace(mut self, spacing: Spacing) -> Result<Self> {
        self.wspace = spacing.gaps("wspace", self.shape.cols())?;
        self.check_extents()?;
        Ok(self)
    }

    /// Set vertical gaps between rows.
    ///
    /// # Errors
    ///
    /// Fails on a negative gap or a per-gap length other than `rows - 1`.
    pub fn with_hspace(mut self, spacing: Spacing) -> Result<Self> {
        self.hspace = spacing.gaps("hspace", self.shape.rows())?;
        self.check_extents()?;
        Ok(self)
    }

    /// Set outer margins.
    ///
    /// # Errors
    ///
    /// Fails on a negative or non-finite margin.
    pub fn with_margins(mut self, margins: Margins) -> Result<Self> {
        margins.validate()?;
        self.margins = margins;
        self.check_extents()?;
        Ok(self)
    }

    /// Set the device size of a ratio-1 panel.
    ///
    /// # Errors
    ///
    /// Fails if either size is not positive.
    pub fn with_panel_size(mut self, width: f64, height: f64) -> Result<Self> {
        check_panel_size("panel_width", width)?;
        check_panel_size("panel_height", height)?;
        self.panel_width = width;
        self.panel_height = height;
        self.check_extents()?;
        Ok(self)
    }

    /// Build from a resolved `layout` style map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] if required keys are absent and a
    /// configuration error if any value is invalid for this grid.
    pub fn from_style(shape: GridShape, style: &StyleMap) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|k| !style.contains_key(**k))
            .map(|k| (*k).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingConfig { element: "layout".to_string(), keys: missing });
        }

        let number = |key: &str| -> Result<f64> { number_arg(key, &style[key]) };
        let spacing = |key: &str| -> Result<Spacing> { spacing_arg(key, &style[key]) };

        let mut config = Self::for_shape(shape)
            .with_panel_size(number("panel_width")?, number("panel_height")?)?
            .with_margins(Margins::new(
                number("top")?,
                number("bottom")?,
                number("left")?,
                number("right")?,
            ))?
            .with_wspace(spacing("wspace")?)?
            .with_hspace(spacing("hspace")?)?;

        if let Some(v) = style.get("width_ratios") {
            config = config.with_width_ratios(ratio_arg("width_ratios", v)?)?;
        }
        if let Some(v) = style.get("height_ratios") {
            config = config.with_height_ratios(ratio_arg("height_ratios", v)?)?;
        }
        Ok(config)
    }

    /// Grid dimensions.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Outer margins.
    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Device-unit extents along the x axis (widths, gaps, left, right) or
    /// the y axis (heights, gaps, top, bottom).
    fn scaled_axis(&self, horizontal: bool) -> (Vec<f64>, Vec<f64>, f64, f64) {
        let m = self.margins;
        let (ratios, gaps, unit, start, end) = if horizontal {
            (&self.width_ratios, &self.wspace, self.panel_width, m.left, m.right)
        } else {
            (&self.height_ratios, &self.hspace, self.panel_height, m.top, m.bottom)
        };
        (
            ratios.iter().map(|r| r * unit).collect(),
            gaps.iter().map(|g| g * unit).collect(),
            start * unit,
            end * unit,
        )
    }

    fn axis_total(extents: &(Vec<f64>, Vec<f64>, f64, f64)) -> f64 {
        let (panels, gaps, start, end) = extents;
        panels.iter().sum::<f64>() + gaps.iter().sum::<f64>() + start + end
    }

    /// Both scaled figure totals must be finite and positive.
    fn check_extents(&self) -> Result<()> {
        for (axis, horizontal) in [("width", true), ("height", false)] {
            let total = Self::axis_total(&self.scaled_axis(horizontal));
            if !(total.is_finite() && total > 0.0) {
                return Err(ConfigError::InvalidExtent { axis, value: total }.into());
            }
        }
        Ok(())
    }

    /// Compute figure size and panel rectangles.
    #[must_use]
    pub fn compute(&self) -> FigureLayout {
        let x_axis = self.scaled_axis(true);
        let y_axis = self.scaled_axis(false);
        let fig_w = Self::axis_total(&x_axis);
        let fig_h = Self::axis_total(&y_axis);
        let (widths, wgaps, left, right) = x_axis;
        let (heights, hgaps, top, bottom) = y_axis;

        // Left edge of each column, walking right from the left margin.
        let mut x_edges = Vec::with_capacity(widths.len());
        let mut x = left;
        for (j, w) in widths.iter().enumerate() {
            x_edges.push(x);
            x += w + wgaps.get(j).copied().unwrap_or(0.0);
        }

        // Bottom edge of each row, walking down from the top margin.
        let mut y_edges = Vec::with_capacity(heights.len());
        let mut y = fig_h - top;
        for (i, h) in heights.iter().enumerate() {
            y -= h;
            y_edges.push(y);
            y -= hgaps.get(i).copied().unwrap_or(0.0);
        }

        let panels = Grid::from_fn(self.shape, |idx| {
            Rect::new(
                x_edges[idx.col] / fig_w,
                y_edges[idx.row] / fig_h,
                widths[idx.col] / fig_w,
                heights[idx.row] / fig_h,
            )
        });

        log::trace!("layout {} -> figure {fig_w}x{fig_h}", self.shape);

        FigureLayout {
            size: FigureSize::new(fig_w, fig_h),
            margin_box: Rect::new(
                left / fig_w,
                bottom / fig_h,
                (fig_w - left - right) / fig_w,
                (fig_h - top - bottom) / fig_h,
            ),
            panels,
        }
    }
}

/// Check a single layout key against the layout key set and its value type.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownKey`] for keys outside the layout key set and
/// a configuration error for values of the wrong type or sign.
pub fn check_layout_arg(key: &str, value: &StyleValue) -> Result<()> {
    let Some(key) = REQUIRED_KEYS.iter().chain(OPTIONAL_KEYS.iter()).find(|k| **k == key).copied()
    else {
        return Err(ConfigError::UnknownKey { element: "layout".to_string(), key: key.to_string() }
            .into());
    };
    match key {
        "panel_width" | "panel_height" => check_panel_size(key, number_arg(key, value)?),
        "wspace" | "hspace" => {
            let spacing = spacing_arg(key, value)?;
            let count = match &spacing {
                Spacing::Uniform(_) => 1,
                Spacing::PerGap(v) => v.len() + 1,
            };
            spacing.gaps(key, count).map(|_| ())
        }
        "width_ratios" | "height_ratios" => {
            let axis = if key == "width_ratios" { "width" } else { "height" };
            let ratios = ratio_arg(key, value)?;
            check_ratios(axis, &ratios, ratios.len())
        }
        side => {
            let v = number_arg(side, value)?;
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NegativeMargin { side, value: v }.into())
            }
        }
    }
}

fn number_arg(key: &str, value: &StyleValue) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a number, got {value}"),
        }
        .into()
    })
}

fn spacing_arg(key: &str, value: &StyleValue) -> Result<Spacing> {
    if let Some(v) = value.as_f64() {
        return Ok(Spacing::Uniform(v));
    }
    value.as_f64_list().map(Spacing::PerGap).ok_or_else(|| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a number or a list of numbers, got {value}"),
        }
        .into()
    })
}

fn ratio_arg(key: &str, value: &StyleValue) -> Result<Vec<f64>> {
    value.as_f64_list().ok_or_else(|| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a list of numbers, got {value}"),
        }
        .into()
    })
}

/// Computed figure geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    size: FigureSize,
    margin_box: Rect,
    panels: Grid<Rect>,
}

impl FigureLayout {
    /// Total figure size in device units.
    #[must_use]
    pub fn size(&self) -> FigureSize {
        self.size
    }

    /// Region inside the margins, normalized.
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.margin_box
    }

    /// Normalized rectangle for every panel.
    #[must_use]
    pub fn panels(&self) -> &Grid<Rect> {
        &self.panels
    }

    /// Normalized rectangle of panel `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the cell is outside the grid.
    pub fn panel(&self, row: usize, col: usize) -> Result<Rect> {
        self.panels.cell(row, col).copied()
    }

    /// Rectangle of panel `(row, col)` in device units.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the cell is outside the grid.
    pub fn device_rect(&self, row: usize, col: usize) -> Result<Rect> {
        let r = self.panel(row, col)?;
        let (w, h) = (self.size.width, self.size.height);
        Ok(Rect::new(r.left * w, r.bottom * h, r.width * w, r.height * h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_map;
    use approx::assert_abs_diff_eq;

    fn two_by_two() -> FigureLayout {
        LayoutConfig::new(2, 2)
            .unwrap()
            .with_panel_size(3.0, 3.0)
            .unwrap()
            .with_margins(Margins::uniform(0.2))
            .unwrap()
            .with_wspace(Spacing::Uniform(0.05))
            .unwrap()
            .with_hspace(Spacing::Uniform(0.05))
            .unwrap()
            .compute()
    }

    #[test]
    fn test_single_panel_fills_figure() {
        let layout = LayoutConfig::new(1, 1).unwrap().compute();
        assert_eq!(layout.panel(0, 0).unwrap(), Rect::UNIT);
        assert_abs_diff_eq!(layout.size().width, DEFAULT_PANEL_SIZE, epsilon = 1e-12);
    }

    #[test]
    fn test_two_by_two_size() {
        let layout = two_by_two();
        assert_abs_diff_eq!(layout.size().width, 7.35, epsilon = 1e-9);
        assert_abs_diff_eq!(layout.size().height, 7.35, epsilon = 1e-9);
    }

    #[test]
    fn test_first_panel_touches_top_left_margin() {
        let layout = two_by_two();
        let rect = layout.panel(0, 0).unwrap();
        let margin = layout.margin_box();
        assert_abs_diff_eq!(rect.left, margin.left, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.top(), margin.top(), epsilon = 1e-12);
        assert_abs_diff_eq!(rect.left * 7.35, 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!((1.0 - rect.top()) * 7.35, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_row_zero_is_top() {
        let layout = two_by_two();
        let top = layout.panel(0, 0).unwrap();
        let below = layout.panel(1, 0).unwrap();
        assert!(top.bottom > below.bottom);
        assert_abs_diff_eq!(top.bottom - below.top(), 0.05 * 3.0 / 7.35, epsilon = 1e-12);
    }

    #[test]
    fn test_last_panel_touches_bottom_right_margin() {
        let layout = two_by_two();
        let rect = layout.panel(1, 1).unwrap();
        let margin = layout.margin_box();
        assert_abs_diff_eq!(rect.right(), margin.right(), epsilon = 1e-12);
        assert_abs_diff_eq!(rect.bottom, margin.bottom, epsilon = 1e-12);
    }

    #[test]
    fn test_ratios_scale_panels() {
        let layout = LayoutConfig::new(2, 2)
            .unwrap()
            .with_width_ratios(vec![1.0, 2.0])
            .unwrap()
            .with_height_ratios(vec![3.0, 1.0])
            .unwrap()
            .compute();
        let a = layout.panel(0, 0).unwrap();
        let b = layout.panel(0, 1).unwrap();
        let c = layout.panel(1, 0).unwrap();
        assert_abs_diff_eq!(b.width, 2.0 * a.width, epsilon = 1e-12);
        assert_abs_diff_eq!(a.height, 3.0 * c.height, epsilon = 1e-12);
        assert_abs_diff_eq!(layout.size().width, 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(layout.size().height, 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_per_gap_spacing() {
        let layout = LayoutConfig::new(1, 3)
            .unwrap()
            .with_panel_size(1.0, 1.0)
            .unwrap()
            .with_wspace(Spacing::PerGap(vec![0.5, 1.0]))
            .unwrap()
            .compute();
        assert_abs_diff_eq!(layout.size().width, 4.5, epsilon = 1e-12);
        let third = layout.device_rect(0, 2).unwrap();
        assert_abs_diff_eq!(third.left, 3.5, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_bad_ratios() {
        let cfg = LayoutConfig::new(2, 2).unwrap();
        assert!(matches!(
            cfg.clone().with_width_ratios(vec![1.0]),
            Err(Error::Config(ConfigError::RatioLengthMismatch {
                axis: "width",
                expected: 2,
                actual: 1
            }))
        ));
        assert!(matches!(
            cfg.with_height_ratios(vec![1.0, 0.0]),
            Err(Error::Config(ConfigError::NonPositiveRatio { axis: "height", index: 1, .. }))
        ));
    }

    #[test]
    fn test_rejects_bad_spacing_and_margins() {
        let cfg = LayoutConfig::new(2, 3).unwrap();
        assert!(matches!(
            cfg.clone().with_wspace(Spacing::PerGap(vec![0.1])),
            Err(Error::Config(ConfigError::SpacingLengthMismatch { expected: 2, actual: 1, .. }))
        ));
        assert!(matches!(
            cfg.clone().with_hspace(Spacing::Uniform(-0.1)),
            Err(Error::Config(ConfigError::NegativeSpacing { axis: "hspace", .. }))
        ));
        assert!(matches!(
            cfg.clone().with_margins(Margins::new(0.1, -0.2, 0.0, 0.0)),
            Err(Error::Config(ConfigError::NegativeMargin { side: "bottom", .. }))
        ));
        assert!(cfg.with_panel_size(0.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_overflowing_width() {
        let cfg = LayoutConfig::new(1, 2).unwrap();
        let err = cfg.with_width_ratios(vec![1e308, 1e308]).unwrap_err();
        match err {
            Error::Config(ConfigError::InvalidExtent { axis, value }) => {
                assert_eq!(axis, "width");
                assert!(value.is_infinite());
            }
            other => panic!("expected InvalidExtent, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_overflowing_panel_size_and_margins() {
        let cfg = LayoutConfig::new(2, 1).unwrap();
        assert!(matches!(
            cfg.clone().with_panel_size(1.0, f64::MAX),
            Err(Error::Config(ConfigError::InvalidExtent { axis: "height", .. }))
        ));
        assert!(matches!(
            cfg.with_margins(Margins::new(0.0, 0.0, 1e308, 1e308)),
            Err(Error::Config(ConfigError::InvalidExtent { axis: "width", .. }))
        ));
    }

    #[test]
    fn test_from_style_rejects_overflowing_spacing() {
        let shape = GridShape::new(3, 1).unwrap();
        let style = style_map! {
            "panel_width" => 1, "panel_height" => 1e300, "wspace" => 0, "hspace" => 1e10,
            "top" => 0, "bottom" => 0, "left" => 0, "right" => 0,
        };
        assert!(matches!(
            LayoutConfig::from_style(shape, &style),
            Err(Error::Config(ConfigError::InvalidExtent { axis: "height", .. }))
        ));
    }

    #[test]
    fn test_zero_shape_never_reaches_layout() {
        assert!(matches!(
            LayoutConfig::new(0, 2),
            Err(Error::Config(ConfigError::InvalidShape { rows: 0, cols: 2 }))
        ));
        let shape = GridShape::new(1, 1).unwrap();
        let layout = LayoutConfig::for_shape(shape).compute();
        assert_eq!(layout.panels().shape(), shape);
    }

    #[test]
    fn test_single_row_uniform_spacing_still_checked() {
        let cfg = LayoutConfig::new(1, 1).unwrap();
        assert!(cfg.with_hspace(Spacing::Uniform(-1.0)).is_err());
    }

    #[test]
    fn test_from_style() {
        let shape = GridShape::new(1, 2).unwrap();
        let style = style_map! {
            "panel_width" => 2, "panel_height" => 1.5,
            "wspace" => 0.1, "hspace" => 0.0,
            "top" => 0.0, "bottom" => 0.0, "left" => 0.5, "right" => 0.5,
            "width_ratios" => vec![1.0, 3.0],
        };
        let layout = LayoutConfig::from_style(shape, &style).unwrap().compute();
        assert_abs_diff_eq!(layout.size().width, 2.0 * (4.0 + 0.1 + 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(layout.size().height, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_from_style_missing_keys() {
        let shape = GridShape::new(1, 1).unwrap();
        let style = style_map! { "panel_width" => 3, "panel_height" => 3 };
        match LayoutConfig::from_style(shape, &style) {
            Err(Error::MissingConfig { element, keys }) => {
                assert_eq!(element, "layout");
                assert_eq!(keys, vec!["wspace", "hspace", "top", "bottom", "left", "right"]);
            }
            other => panic!("expected MissingConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_from_style_ratio_length_checked_against_grid() {
        let shape = GridShape::new(1, 2).unwrap();
        let mut style = style_map! {
            "panel_width" => 3, "panel_height" => 3, "wspace" => 0, "hspace" => 0,
            "top" => 0, "bottom" => 0, "left" => 0, "right" => 0,
        };
        style.insert("width_ratios".to_string(), vec![1.0, 1.0, 1.0].into());
        assert!(matches!(
            LayoutConfig::from_style(shape, &style),
            Err(Error::Config(ConfigError::RatioLengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_check_layout_arg() {
        assert!(check_layout_arg("top", &StyleValue::Float(0.2)).is_ok());
        assert!(check_layout_arg("top", &StyleValue::Float(-0.2)).is_err());
        assert!(check_layout_arg("wspace", &vec![0.1, 0.2].into()).is_ok());
        assert!(check_layout_arg("panel_width", &"wide".into()).is_err());
        assert!(check_layout_arg("width_ratios", &vec![1.0, -1.0].into()).is_err());
        assert!(matches!(
            check_layout_arg("dpi", &StyleValue::Int(300)),
            Err(Error::Config(ConfigError::UnknownKey { .. }))
        ));
    }
}
