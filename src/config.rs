//! YAML figure-style files.
//!
//! ```yaml
//! version: 1
//! layout:
//!   panel_width: 2.5
//!   width_ratios: [1, 2]
//! elements:
//!   ticks:
//!     defaults: { direction: in }
//!     tags: { log: { labelsize: 8 } }
//!   plot:
//!     groups: { condition: { control: { color: black } } }
//! ```
//!
//! A file only adds configuration; [`FigureStyleFile::apply`] routes every
//! entry through the same checked setters the programmatic API uses.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::PropValue;
use crate::style::elements::LAYOUT;
use crate::style::{StyleManager, StyleMap};

/// Per-element section of a style file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementConfig {
    /// Merged into the element defaults.
    #[serde(default)]
    pub defaults: StyleMap,

    /// Tag overrides.
    #[serde(default)]
    pub tags: BTreeMap<String, StyleMap>,

    /// Group overrides: property, then property value.
    #[serde(default)]
    pub groups: BTreeMap<String, BTreeMap<PropValue, StyleMap>>,
}

/// A parsed style file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureStyleFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Layout keys, checked by the layout element.
    #[serde(default)]
    pub layout: StyleMap,

    /// Element sections by element name.
    #[serde(default)]
    pub elements: BTreeMap<String, ElementConfig>,
}

fn default_version() -> u32 {
    1
}

impl Default for FigureStyleFile {
    fn default() -> Self {
        Self { version: default_version(), layout: StyleMap::new(), elements: BTreeMap::new() }
    }
}

impl FigureStyleFile {
    /// Reads a style file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ConfigParse`] if it is not a valid style file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses a style file from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the offending line.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Serializes back to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if a value cannot be represented.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| Error::ConfigParse { line: 0, message: e.to_string() })
    }

    /// Apply every section to `manager`.
    ///
    /// # Errors
    ///
    /// Fails on the first unknown element, rejected layout key or invalid
    /// value; sections applied before the failure stay applied.
    pub fn apply(&self, manager: &mut StyleManager) -> Result<()> {
        if !self.layout.is_empty() {
            manager.element_mut(LAYOUT)?.update_defaults(&self.layout)?;
        }
        for (name, section) in &self.elements {
            let element = manager.element_mut(name)?;
            element.update_defaults(&section.defaults)?;
            for (tag, args) in &section.tags {
                element.add_tag_style(tag, args)?;
            }
            for (prop, by_value) in &section.groups {
                for (value, args) in by_value {
                    element.add_group_style(prop, [value.clone()], args)?;
                }
            }
        }
        log::debug!(
            "applied style file v{} with {} element section(s)",
            self.version,
            self.elements.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::grid::{Grid, GridShape, ItemMeta, PanelGrid, PanelMeta};
    use crate::style::{elements, StyleValue};
    use std::io::Write;

    const SAMPLE: &str = r#"
version: 1
layout:
  panel_width: 2.5
  width_ratios: [1, 2]
elements:
  ticks:
    defaults: { direction: in }
    tags: { log: { labelsize: 8 } }
  plot:
    groups:
      condition:
        control: { color: black }
"#;

    #[test]
    fn test_parse_sample() {
        let file = FigureStyleFile::parse(SAMPLE).unwrap();
        assert_eq!(file.version, 1);
        assert_eq!(file.layout["panel_width"], StyleValue::Float(2.5));
        assert_eq!(file.layout["width_ratios"], StyleValue::from(vec![1, 2]));
        assert_eq!(file.elements["ticks"].defaults["direction"], StyleValue::from("in"));
        let groups = &file.elements["plot"].groups["condition"];
        assert!(groups.contains_key(&PropValue::from("control")));
    }

    #[test]
    fn test_parse_minimal() {
        let file = FigureStyleFile::parse("version: 1").unwrap();
        assert!(file.layout.is_empty());
        assert!(file.elements.is_empty());
    }

    #[test]
    fn test_parse_error_includes_line() {
        let yaml = "version: 1\nelements:\n  ticks:\n    colour: red\n";
        match FigureStyleFile::parse(yaml) {
            Err(Error::ConfigParse { line, message }) => {
                assert!(line > 0);
                assert!(message.contains("colour"));
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_sample() {
        let mut manager = StyleManager::with_defaults();
        FigureStyleFile::parse(SAMPLE).unwrap().apply(&mut manager).unwrap();

        let shape = GridShape::new(1, 2).unwrap();
        let grid = PanelGrid::new(Grid::from_fn(shape, |idx| {
            let panel = PanelMeta::new()
                .group_by("condition")
                .item(ItemMeta::new().prop("condition", "control"));
            if idx.col == 1 {
                panel.tag("log")
            } else {
                panel
            }
        }));
        let styles = manager.resolve(&grid).unwrap();
        assert_eq!(
            styles.figure_style(elements::LAYOUT).unwrap()["panel_width"],
            StyleValue::Float(2.5)
        );
        assert!(!styles.panel_style(0, 0, elements::TICKS).unwrap().contains_key("labelsize"));
        assert_eq!(
            styles.panel_style(0, 1, elements::TICKS).unwrap()["labelsize"],
            StyleValue::Int(8)
        );
        assert_eq!(
            styles.item_style(0, 0, 0, elements::PLOT).unwrap()["color"],
            StyleValue::from("black")
        );
    }

    #[test]
    fn test_apply_rejects_unknown_layout_key() {
        let file = FigureStyleFile::parse("layout: { xspace: 0.1 }").unwrap();
        let err = file.apply(&mut StyleManager::with_defaults()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownKey { .. })));
    }

    #[test]
    fn test_apply_rejects_unknown_element() {
        let file = FigureStyleFile::parse("elements: { spines: { defaults: { lw: 1 } } }").unwrap();
        let err = file.apply(&mut StyleManager::with_defaults()).unwrap_err();
        assert!(matches!(err, Error::UnknownElement(name) if name == "spines"));
    }

    #[test]
    fn test_load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(SAMPLE.as_bytes()).unwrap();
        let file = FigureStyleFile::load(tmp.path()).unwrap();
        assert_eq!(file.elements.len(), 2);
        assert!(matches!(FigureStyleFile::load("/nonexistent/style.yaml"), Err(Error::Io(_))));
    }

    #[test]
    fn test_yaml_round_trip_keeps_layout() {
        let file = FigureStyleFile::parse(SAMPLE).unwrap();
        let again = FigureStyleFile::parse(&file.to_yaml().unwrap()).unwrap();
        assert_eq!(again.layout, file.layout);
    }
}
