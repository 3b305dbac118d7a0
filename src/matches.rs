use std::collections::{btree_map, BTreeMap};

use crate::{
    value::{FromValue, Value},
    Error, Result,
};

/// Root configuration carried along for help rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootInfo {
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Everything one parse bound, keyed by camelCase flag and argument names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matches {
    values: BTreeMap<String, Value>,
    /// Positional tokens no argument claimed.
    pub argv: Vec<String>,
    /// Resolved command path, root name first.
    pub commands: Vec<String>,
    pub root: RootInfo,
}

impl Matches {
    pub(crate) fn new(root: RootInfo) -> Matches {
        Matches { root, ..Matches::default() }
    }

    pub(crate) fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// `true` iff `key` is bound to `Bool(true)`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(Value::Bool(true)))
    }

    /// Typed lookup. An unbound key reads as [`Value::Undefined`], so
    /// `Option<T>`, `Vec<T>` and `bool` never fail on absence.
    pub fn value<T: FromValue>(&self, key: &str) -> Result<T> {
        let value = self.values.get(key).unwrap_or(&Value::Undefined);
        T::from_value(value).map_err(|reason| Error::InvalidValue { name: key.to_string(), reason })
    }

    pub fn to<R: FromMatches>(&self) -> Result<R> {
        R::from_matches(self)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a Matches {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A concrete record for one command, read out of [`Matches`].
///
/// ```
/// use argtree::{FromMatches, Matches, Result};
///
/// struct Serve {
///     port: u16,
///     verbose: bool,
/// }
///
/// impl FromMatches for Serve {
///     fn from_matches(m: &Matches) -> Result<Self> {
///         Ok(Serve { port: m.value("port")?, verbose: m.flag("verbose") })
///     }
/// }
/// ```
pub trait FromMatches: Sized {
    fn from_matches(matches: &Matches) -> Result<Self>;
}
