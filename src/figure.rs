//! Figure builds and the rendering boundary.
//!
//! A [`FigurePlan`] pairs the resolved styles of one build with the layout
//! derived from the resolved `layout` element. Renderers read it through
//! [`FigurePlan::placements`], which strips reserved keys and turns text
//! elements into [`Annotation`]s, so no engine-only key reaches a draw call.

use crate::error::{Error, Result};
use crate::geometry::{FigureSize, Rect};
use crate::grid::{CellIndex, PanelGrid};
use crate::layout::{FigureLayout, LayoutConfig};
use crate::style::elements::LAYOUT;
use crate::style::{ElementStyles, StyleGrid, StyleManager, StyleMap, TextField};

/// A text element ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Element the text came from.
    pub element: String,
    /// Text to draw.
    pub text: String,
    /// Position in figure (figure-level) or axes (panel-level) coordinates.
    pub pos: (f64, f64),
    /// Remaining text arguments.
    pub args: StyleMap,
}

/// Everything a renderer needs for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelPlacement {
    /// Panel address.
    pub cell: CellIndex,
    /// Normalized placement rectangle.
    pub rect: Rect,
    /// Render arguments per panel element.
    pub args: ElementStyles,
    /// Render arguments per item, per item element.
    pub items: Vec<ElementStyles>,
    /// Text drawn inside the panel.
    pub annotations: Vec<Annotation>,
}

/// The external drawing collaborator.
pub trait Renderer {
    /// What a finished render produces (a file handle, a byte buffer, a count).
    type Output;

    /// Draw `plan`.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures through [`Error`].
    fn render(&mut self, plan: &FigurePlan) -> Result<Self::Output>;
}

/// Layout and styles of one figure build.
#[derive(Debug, Clone, PartialEq)]
pub struct FigurePlan {
    layout: FigureLayout,
    styles: StyleGrid,
}

impl FigurePlan {
    /// Resolve every element of `manager` against `grid` and lay out the panels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownElement`] without a layout element,
    /// [`Error::MissingConfig`] when layout keys are unset, and any
    /// configuration error of the resolved layout.
    pub fn build(manager: &StyleManager, grid: &PanelGrid) -> Result<Self> {
        let styles = manager.resolve(grid)?;
        let layout_style = styles
            .figure_style(LAYOUT)
            .ok_or_else(|| Error::UnknownElement(LAYOUT.to_string()))?;
        let layout = LayoutConfig::from_style(grid.shape(), layout_style)?.compute();
        log::debug!(
            "built {} figure: {:.3} x {:.3}",
            grid.shape(),
            layout.size().width,
            layout.size().height
        );
        Ok(Self { layout, styles })
    }

    /// Computed geometry.
    #[must_use]
    pub fn layout(&self) -> &FigureLayout {
        &self.layout
    }

    /// Resolved styles.
    #[must_use]
    pub fn styles(&self) -> &StyleGrid {
        &self.styles
    }

    /// Total figure size.
    #[must_use]
    pub fn size(&self) -> FigureSize {
        self.layout.size()
    }

    /// Render arguments of figure-level elements other than text.
    ///
    /// # Errors
    ///
    /// Fails only if the style grid lacks metadata for one of its elements.
    pub fn figure_args(&self) -> Result<ElementStyles> {
        let mut args = ElementStyles::new();
        for (name, style) in self.styles.figure() {
            if self.text_field(name).is_none() {
                args.insert(name.clone(), self.styles.render_args(name, style)?);
            }
        }
        Ok(args)
    }

    /// Figure-level text with non-empty content.
    ///
    /// # Errors
    ///
    /// Fails only if the style grid lacks metadata for one of its elements.
    pub fn figure_annotations(&self) -> Result<Vec<Annotation>> {
        let mut out = Vec::new();
        for (name, style) in self.styles.figure() {
            if let Some(field) = self.text_field(name) {
                out.extend(self.annotation(name, field, style)?);
            }
        }
        Ok(out)
    }

    /// One placement per panel, row-major.
    ///
    /// # Errors
    ///
    /// Fails only if the layout and styles disagree on the grid.
    pub fn placements(&self) -> Result<Vec<PanelPlacement>> {
        self.styles.shape().cells().map(|cell| self.placement(cell)).collect()
    }

    /// Hand the plan to `renderer`.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's error.
    pub fn render_with<R: Renderer>(&self, renderer: &mut R) -> Result<R::Output> {
        renderer.render(self)
    }

    fn placement(&self, cell: CellIndex) -> Result<PanelPlacement> {
        let rect = self.layout.panel(cell.row, cell.col)?;
        let mut args = ElementStyles::new();
        let mut annotations = Vec::new();
        for (name, style) in self.styles.panel(cell.row, cell.col)? {
            match self.text_field(name) {
                Some(field) => annotations.extend(self.annotation(name, field, style)?),
                None => {
                    args.insert(name.clone(), self.styles.render_args(name, style)?);
                }
            }
        }

        let items = self
            .styles
            .items(cell.row, cell.col)?
            .iter()
            .map(|item| {
                item.iter()
                    .map(|(name, style)| {
                        self.styles.render_args(name, style).map(|args| (name.clone(), args))
                    })
                    .collect::<Result<ElementStyles>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PanelPlacement { cell, rect, args, items, annotations })
    }

    fn text_field(&self, name: &str) -> Option<TextField> {
        self.styles.element_info(name).and_then(|info| info.text)
    }

    fn annotation(
        &self,
        name: &str,
        field: TextField,
        style: &StyleMap,
    ) -> Result<Option<Annotation>> {
        let Some(text) = field.text(style) else {
            return Ok(None);
        };
        Ok(Some(Annotation {
            element: name.to_string(),
            text: text.to_string(),
            pos: field.position(style).unwrap_or((0.0, 0.0)),
            args: self.styles.render_args(name, style)?,
        }))
    }
}
