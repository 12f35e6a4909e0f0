use crate::util::CONSTANTS;
use std::collections::hash_map::{self, HashMap};
use std::iter::FromIterator;

/// A mutable name to value environment.
///
/// Expressions read names from it during evaluation, and `=` writes into it.
/// A single `Symbols` can serve any number of parsed [`Expr`](struct.Expr.html).
///
/// # Examples
///
/// ```
/// use shunter::Symbols;
///
/// let mut symbols = Symbols::new();
/// symbols.set("x", 2.0);
/// assert_eq!(symbols.get("x"), Some(2.0));
/// assert!(!symbols.contains("y"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Symbols {
    values: HashMap<String, f64>,
}

impl Symbols {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the predefined constants (`pi`, `e`, ...)
    ///
    /// ```
    /// # use shunter::Symbols;
    /// let symbols = Symbols::with_constants();
    /// assert_eq!(symbols.get("pi"), Some(std::f64::consts::PI));
    /// ```
    #[must_use]
    pub fn with_constants() -> Self {
        CONSTANTS
            .iter()
            .map(|(&name, &value)| (name.to_owned(), value))
            .collect()
    }

    /// Bind `name` to `value`, returning the previous value if any
    pub fn set<S: Into<String>>(&mut self, name: S, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all bindings, in no particular order
    pub fn iter(&self) -> hash_map::Iter<'_, String, f64> {
        self.values.iter()
    }
}

impl From<HashMap<String, f64>> for Symbols {
    fn from(values: HashMap<String, f64>) -> Self {
        Self { values }
    }
}

impl From<Symbols> for HashMap<String, f64> {
    fn from(symbols: Symbols) -> Self {
        symbols.values
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Symbols {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut symbols = Self::new();
        symbols.extend(iter);
        symbols
    }
}

impl<S: Into<String>> Extend<(S, f64)> for Symbols {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.values.insert(name.into(), value);
        }
    }
}

impl<'a> IntoIterator for &'a Symbols {
    type Item = (&'a String, &'a f64);
    type IntoIter = hash_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut symbols = Symbols::new();
        assert!(symbols.is_empty());
        assert_eq!(symbols.set("a", 1.0), None);
        assert_eq!(symbols.set("a", 2.0), Some(1.0));
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols.get("a"), Some(2.0));
        assert_eq!(symbols.remove("a"), Some(2.0));
        assert!(!symbols.contains("a"));
    }

    #[test]
    fn constants() {
        let mut symbols = Symbols::with_constants();
        assert_eq!(symbols.get("e"), Some(std::f64::consts::E));
        assert!(symbols.get("nan").map_or(false, f64::is_nan));
        symbols.clear();
        assert!(symbols.is_empty());
    }

    #[test]
    fn conversions() {
        let mut map = HashMap::new();
        map.insert("x".to_string(), 3.0);
        let mut symbols = Symbols::from(map);
        symbols.extend(vec![("y", 4.0)]);
        let map: HashMap<String, f64> = symbols.into();
        assert_eq!(map.len(), 2);
        assert_eq!(map["y"], 4.0);
    }
}
