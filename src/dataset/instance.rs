use std::collections::hash_map;
use std::collections::HashMap;
use std::iter::FromIterator;

use super::{Float, Value};

/// A single observation, mapping attribute names to raw values
///
/// Attributes without an entry are missing. Instances are what the learners predict on; values
/// are raw, any normalization happens inside the trained model.
///
/// ```rust
/// use tabula::dataset::{Instance, Value};
///
/// let instance = Instance::<f64>::new()
///     .with("outlook", "sunny")
///     .with("temperature", Value::numeric(21.5));
///
/// assert_eq!(instance.discrete("outlook"), Some("sunny"));
/// assert_eq!(instance.numeric("temperature"), Some(21.5));
/// assert!(instance.get("windy").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instance<F> {
    values: HashMap<String, Value<F>>,
}

impl<F: Float> Instance<F> {
    pub fn new() -> Self {
        Instance {
            values: HashMap::new(),
        }
    }

    /// Sets the value of an attribute and returns the instance
    pub fn with<S: Into<String>, V: Into<Value<F>>>(mut self, name: S, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets the value of an attribute, returning the previous value
    pub fn insert<S: Into<String>, V: Into<Value<F>>>(&mut self, name: S, value: V) -> Option<Value<F>> {
        self.values.insert(name.into(), value.into())
    }

    /// Marks an attribute as missing, returning the previous value
    pub fn remove(&mut self, name: &str) -> Option<Value<F>> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value<F>> {
        self.values.get(name)
    }

    /// Returns the value of a numeric attribute, `None` if missing or discrete
    pub fn numeric(&self, name: &str) -> Option<F> {
        self.get(name).and_then(Value::as_numeric)
    }

    /// Returns the value of a discrete attribute, `None` if missing or numeric
    pub fn discrete(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_discrete)
    }

    /// Number of non-missing values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value<F>> {
        self.values.iter()
    }
}

impl<F: Float, S: Into<String>> FromIterator<(S, Value<F>)> for Instance<F> {
    fn from_iter<I: IntoIterator<Item = (S, Value<F>)>>(iter: I) -> Self {
        Instance {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
