//! Style values and layered merging.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single style argument value, forwarded to the renderer as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value (colors, names, label text).
    Text(String),
    /// Sequence (positions, ratios, dash patterns).
    List(Vec<StyleValue>),
}

impl StyleValue {
    /// A two-element position.
    #[must_use]
    pub fn pair(x: f64, y: f64) -> Self {
        StyleValue::List(vec![StyleValue::Float(x), StyleValue::Float(y)])
    }

    /// Numeric value; integers widen to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Float(v) => Some(*v),
            StyleValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Integer value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StyleValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// List value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[StyleValue]> {
        match self {
            StyleValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Numeric list value; fails if any element is not a number.
    #[must_use]
    pub fn as_f64_list(&self) -> Option<Vec<f64>> {
        self.as_list()?.iter().map(StyleValue::as_f64).collect()
    }

    /// Two-element numeric list.
    #[must_use]
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self.as_list()? {
            [x, y] => Some((x.as_f64()?, y.as_f64()?)),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Bool(b) => write!(f, "{b}"),
            StyleValue::Int(v) => write!(f, "{v}"),
            StyleValue::Float(v) => write!(f, "{v}"),
            StyleValue::Text(s) => write!(f, "{s:?}"),
            StyleValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Bool(v)
    }
}

impl From<i64> for StyleValue {
    fn from(v: i64) -> Self {
        StyleValue::Int(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Int(i64::from(v))
    }
}

impl From<usize> for StyleValue {
    fn from(v: usize) -> Self {
        StyleValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Float(v)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<(f64, f64)> for StyleValue {
    fn from((x, y): (f64, f64)) -> Self {
        StyleValue::pair(x, y)
    }
}

impl<T: Into<StyleValue>> From<Vec<T>> for StyleValue {
    fn from(items: Vec<T>) -> Self {
        StyleValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Flat mapping of style keys to values.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// Build a [`StyleMap`] from `key => value` pairs.
///
/// ```rust
/// use gridfig::style_map;
///
/// let args = style_map! { "color" => "black", "linewidth" => 1.5 };
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! style_map {
    () => { $crate::style::StyleMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::style::StyleMap::new();
        $(
            map.insert(
                ::std::string::String::from($key),
                $crate::style::StyleValue::from($value),
            );
        )+
        map
    }};
}

/// Merge layers lowest precedence first into a fresh map.
///
/// No layer is modified; later layers overwrite keys from earlier ones.
#[must_use]
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a StyleMap>) -> StyleMap {
    let mut merged = StyleMap::new();
    for layer in layers {
        merged.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_layer_wins() {
        let low = style_map! { "a" => 1, "b" => "x" };
        let high = style_map! { "a" => 2 };
        let merged = merge_layers([&low, &high]);
        assert_eq!(merged["a"], StyleValue::Int(2));
        assert_eq!(merged["b"], StyleValue::from("x"));
        assert_eq!(low["a"], StyleValue::Int(1));
    }

    #[test]
    fn test_merge_no_layers() {
        assert!(merge_layers(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_numeric_access() {
        assert_eq!(StyleValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(StyleValue::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(StyleValue::from("3").as_f64(), None);
        assert_eq!(StyleValue::Float(1.0).as_i64(), None);
    }

    #[test]
    fn test_pair_access() {
        assert_eq!(StyleValue::pair(0.5, 0.95).as_pair(), Some((0.5, 0.95)));
        assert_eq!(StyleValue::from(vec![1, 2, 3]).as_pair(), None);
        assert_eq!(StyleValue::from(vec![1, 2]).as_pair(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_f64_list_rejects_mixed() {
        assert_eq!(StyleValue::from(vec![1.0, 2.0]).as_f64_list(), Some(vec![1.0, 2.0]));
        let mixed = StyleValue::List(vec![StyleValue::Int(1), StyleValue::from("a")]);
        assert_eq!(mixed.as_f64_list(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(StyleValue::pair(0.5, 0.0).to_string(), "[0.5, 0]");
        assert_eq!(StyleValue::from("red").to_string(), "\"red\"");
    }

    #[test]
    fn test_style_map_macro() {
        let args = style_map! { "visible" => true, "alpha" => 0.5 };
        assert_eq!(args["visible"].as_bool(), Some(true));
        assert!(style_map! {}.is_empty());
    }
}
