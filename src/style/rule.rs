//! Conditional style rules.
//!
//! A rule holds one or more predicates over a [`StyleContext`] and the
//! arguments to merge in when all of them hold. Rules are the highest
//! precedence tier: they override defaults, tag overrides and group
//! overrides, and later rules override earlier ones.

use std::fmt;
use std::sync::Arc;

use super::context::StyleContext;
use super::value::StyleMap;

/// Shared, thread-safe rule predicate.
pub type Predicate = Arc<dyn Fn(&StyleContext<'_>) -> bool + Send + Sync>;

/// Wrap a closure as a [`Predicate`].
pub fn predicate(f: impl Fn(&StyleContext<'_>) -> bool + Send + Sync + 'static) -> Predicate {
    Arc::new(f)
}

/// Predicate-gated style arguments.
#[derive(Clone)]
pub struct StyleRule {
    name: Option<String>,
    conditions: Vec<Predicate>,
    args: StyleMap,
}

impl StyleRule {
    /// Rule applying `args` when `condition` holds.
    #[must_use]
    pub fn new(
        condition: impl Fn(&StyleContext<'_>) -> bool + Send + Sync + 'static,
        args: StyleMap,
    ) -> Self {
        Self::from_predicate(predicate(condition), args)
    }

    /// Rule from an already shared predicate.
    #[must_use]
    pub fn from_predicate(condition: Predicate, args: StyleMap) -> Self {
        Self { name: None, conditions: vec![condition], args }
    }

    /// Name the rule so it can be removed later.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Require an additional condition.
    #[must_use]
    pub fn and(
        mut self,
        condition: impl Fn(&StyleContext<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.conditions.push(predicate(condition));
        self
    }

    /// Rule name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Arguments merged in when the rule applies.
    #[must_use]
    pub fn args(&self) -> &StyleMap {
        &self.args
    }

    /// Whether every condition holds for `ctx`.
    #[must_use]
    pub fn applies(&self, ctx: &StyleContext<'_>) -> bool {
        self.conditions.iter().all(|cond| cond(ctx))
    }

    /// Arguments if the rule applies.
    #[must_use]
    pub fn evaluate(&self, ctx: &StyleContext<'_>) -> Option<&StyleMap> {
        self.applies(ctx).then_some(&self.args)
    }
}

impl fmt::Debug for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRule")
            .field("name", &self.name)
            .field("conditions", &self.conditions.len())
            .field("args", &self.args)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PanelGrid;
    use crate::style_map;

    #[test]
    fn test_all_conditions_must_hold() {
        let grid = PanelGrid::empty(2, 2).unwrap();
        let rule = StyleRule::new(|ctx| ctx.row() == Some(0), style_map! { "a" => 1 })
            .and(|ctx| ctx.col() == Some(1));

        assert!(rule.evaluate(&StyleContext::panel(&grid, 0, 1).unwrap()).is_some());
        assert!(rule.evaluate(&StyleContext::panel(&grid, 0, 0).unwrap()).is_none());
        assert!(rule.evaluate(&StyleContext::panel(&grid, 1, 1).unwrap()).is_none());
    }

    #[test]
    fn test_named_rule() {
        let rule = StyleRule::new(|_| true, style_map! {}).named("always");
        assert_eq!(rule.name(), Some("always"));
        assert!(format!("{rule:?}").contains("always"));
    }
}
