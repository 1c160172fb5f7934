use std::iter::FromIterator;

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::ParamValue;
use data_error::Result;

/// Parameter name to value, kept in insertion order.
///
/// Order is significant: it is the order of the query string and of
/// the cache key, so `{a, b}` and `{b, a}` build distinct entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(LinkedHashMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self(LinkedHashMap::new())
    }

    /// Sets a value. Updating an existing name keeps its position.
    pub fn insert<V: Into<ParamValue>>(&mut self, name: &str, value: V) {
        let value = value.into();
        match self.0.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.0.insert(name.to_owned(), value);
            }
        }
    }

    /// Sets or clears a value; `None` removes the entry.
    pub fn set(&mut self, name: &str, value: Option<ParamValue>) {
        match value {
            Some(value) => self.insert(name, value),
            None => {
                self.0.remove(name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON text of the map, used as the parameter part of cache keys.
    pub fn cache_key(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(&name, value);
        }
        params
    }
}

/// Absent values are dropped.
impl FromIterator<(String, Option<ParamValue>)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Option<ParamValue>)>>(
        iter: I,
    ) -> Self {
        iter.into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }
}
