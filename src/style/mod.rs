//! Layered style resolution.
//!
//! A [`StyleManager`] owns named [`StyleElement`]s. Each element layers
//! defaults, tag overrides, group overrides and rules into one fresh
//! [`StyleMap`] per query; the manager runs every element over a
//! [`crate::grid::PanelGrid`] and collects the results in a [`StyleGrid`].

pub mod context;
pub mod element;
pub mod elements;
pub mod grid;
pub mod manager;
pub mod rule;
pub mod value;

pub use context::{StyleContext, Target};
pub use element::{
    GateAxis, KeyPolicy, KeyValidator, PanelGate, PanelSelection, Scope, StyleElement, TextField,
};
pub use grid::{ElementInfo, ElementStyles, StyleGrid};
pub use manager::{AxisLabel, Condition, GridLabel, StyleManager};
pub use rule::{predicate, Predicate, StyleRule};
pub use value::{merge_layers, StyleMap, StyleValue};
