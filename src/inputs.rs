use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FuzzyError, Result};

/// New values for the input variables of a [`Reasoning`](crate::Reasoning),
/// keyed by variable name.
///
/// Inputs left out keep their previous value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Inputs(pub(crate) BTreeMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(BTreeMap::new())
    }

    pub fn add(&mut self, name: impl Into<String>, val: impl Into<f64>) -> &mut Self {
        self.0.insert(name.into(), val.into());
        self
    }

    /// Binds every numeric field of `fields` to the input of the same name.
    ///
    /// ```
    /// # use fuzzy_reasoning::Inputs;
    /// #[derive(serde::Serialize)]
    /// #[allow(non_snake_case)]
    /// struct Tile {
    ///     TileWidth: u32,
    ///     TileHeight: u32,
    ///     label: &'static str,
    /// }
    ///
    /// let inputs = Inputs::from_fields(&Tile { TileWidth: 208, TileHeight: 260, label: "kitchen" }).unwrap();
    ///
    /// assert_eq!(inputs.get("TileWidth"), Some(208.));
    /// assert_eq!(inputs.len(), 2);
    /// ```
    ///
    /// Fields that are not numbers are skipped. Anything that does not
    /// serialize to a map is rejected.
    pub fn from_fields<T: Serialize + ?Sized>(fields: &T) -> Result<Self> {
        let value = serde_json::to_value(fields).map_err(|e| FuzzyError::InvalidInputs(e.to_string()))?;
        let map = match value {
            Value::Object(map) => map,
            other => return Err(FuzzyError::InvalidInputs(format!("expected named fields, got {other}"))),
        };

        Ok(map
            .into_iter()
            .filter_map(|(name, value)| value.as_f64().map(|val| (name, val)))
            .collect())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, val)| (name.as_str(), *val))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<f64>> FromIterator<(K, V)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Inputs(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
