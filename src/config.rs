//! Linguistic variable tables loaded from TOML.
//!
//! Terms are either listed one by one with three (triangle) or four
//! (trapezoid) breakpoints, or given as a `layout` of names and the chain of
//! breakpoints where consecutive terms start and stop being one, see
//! [`LinguisticVariable::from_breakpoints`].
//!
//! ```
//! use fuzzy_reasoning::VariableTable;
//!
//! let table = VariableTable::from_toml_str(r#"
//!     [[variables]]
//!     name = "TileWidth"
//!     terms = [
//!         { name = "not wide enough", points = [-inf, 50, 200] },
//!         { name = "a good width", points = [50, 160, 200, 420] },
//!         { name = "too wide", points = [160, 420, inf] },
//!     ]
//!
//!     [[variables]]
//!     name = "SizeRating"
//!     value = 3.5
//!     layout = { names = ["useless", "useful"], breakpoints = [0, 6] }
//! "#).unwrap();
//!
//! let vars = table.build().unwrap();
//!
//! assert_eq!(vars.len(), 2);
//! assert_eq!(vars[0].terms().count(), 3);
//! assert_eq!(vars[1].value(), 3.5);
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::FuzzyError;
use crate::variable::LinguisticVariable;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Fuzzy(#[from] FuzzyError),
}

/// A set of variable definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VariableTable {
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VariableSpec {
    pub name: String,

    /// Initial crisp value, zero if left out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<TermSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TermSpec {
    pub name: String,
    pub points: Vec<f64>,
}

/// `names.len()` terms from `2 * names.len() - 2` breakpoints
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutSpec {
    pub names: Vec<String>,
    pub breakpoints: Vec<f64>,
}

impl VariableTable {
    /// Loads a table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Builds the variables in table order. Variable names must be unique.
    pub fn build(&self) -> Result<Vec<LinguisticVariable>, ConfigError> {
        let mut seen = HashSet::with_capacity(self.variables.len());

        self.variables
            .iter()
            .map(|spec| {
                if !seen.insert(spec.name.as_str()) {
                    return Err(ConfigError::Invalid(format!("duplicate variable {}", spec.name)));
                }
                spec.build()
            })
            .collect()
    }
}

impl VariableSpec {
    pub fn build(&self) -> Result<LinguisticVariable, ConfigError> {
        let mut var = match (&self.layout, self.terms.is_empty()) {
            (Some(layout), true) => LinguisticVariable::from_breakpoints(&self.name, &layout.names, &layout.breakpoints)?,
            (None, false) => {
                let mut var = LinguisticVariable::new(&self.name);

                for term in &self.terms {
                    match term.points[..] {
                        [x1, x2, x3] => var.add(&term.name, x1, x2, x3)?,
                        [x1, x2, x3, x4] => var.add_trapezoid(&term.name, x1, x2, x3, x4)?,
                        _ => {
                            return Err(ConfigError::Invalid(format!(
                                "{}.{}: expected 3 or 4 points, got {}",
                                self.name,
                                term.name,
                                term.points.len()
                            )))
                        },
                    };
                }

                var
            },
            (Some(_), false) => {
                return Err(ConfigError::Invalid(format!(
                    "{}: give either terms or a layout, not both",
                    self.name
                )))
            },
            (None, true) => return Err(ConfigError::Invalid(format!("{}: no terms", self.name))),
        };

        if let Some(value) = self.value {
            var.set_value(value);
        }

        Ok(var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_terms() {
        let table = VariableTable::from_toml_str(
            r#"
            [[variables]]
            name = "Note1"
            terms = [
                { name = "sehr gut", points = [-inf, 1, 3] },
                { name = "mittel", points = [1, 5, 7, 11] },
                { name = "ungenügend", points = [7, 15, inf] },
            ]
            "#,
        )
        .unwrap();
        let vars = table.build().unwrap();

        assert_eq!(vars[0].name(), "Note1");
        assert_eq!(vars[0].value(), 0.);
        assert_eq!(vars[0]["sehr gut"].points(), [f64::NEG_INFINITY, 1., 1., 3.]);
        assert_eq!(vars[0]["mittel"].points(), [1., 5., 7., 11.]);
        assert_eq!(vars[0]["ungenügend"].points(), [7., 15., 15., f64::INFINITY]);
    }

    #[test]
    fn test_layout() {
        let table = VariableTable::from_toml_str(
            r#"
            [[variables]]
            name = "Grade"
            value = 2.5
            [variables.layout]
            names = ["low", "mid", "high"]
            breakpoints = [1, 2, 3, 4]
            "#,
        )
        .unwrap();
        let vars = table.build().unwrap();

        assert_eq!(vars[0].value(), 2.5);
        assert_eq!(vars[0]["mid"].points(), [1., 2., 3., 4.]);
    }

    #[test]
    fn test_invalid_tables() {
        let build = |toml: &str| VariableTable::from_toml_str(toml).unwrap().build().unwrap_err();

        assert!(matches!(
            build("[[variables]]\nname = \"A\"\nterms = [{ name = \"t\", points = [1, 2] }]"),
            ConfigError::Invalid(_)
        ));
        assert!(matches!(build("[[variables]]\nname = \"A\""), ConfigError::Invalid(_)));
        assert!(matches!(
            build(
                "[[variables]]\nname = \"A\"\nlayout = { names = [\"a\", \"b\"], breakpoints = [0, 1] }\n\
                 [[variables]]\nname = \"A\"\nlayout = { names = [\"a\", \"b\"], breakpoints = [0, 1] }"
            ),
            ConfigError::Invalid(_)
        ));
        assert!(matches!(
            build("[[variables]]\nname = \"A\"\nterms = [{ name = \"t\", points = [3, 2, 1] }]"),
            ConfigError::Fuzzy(FuzzyError::InvalidTermDefinition { .. })
        ));
        assert!(matches!(
            build("[[variables]]\nname = \"A\"\nlayout = { names = [\"a\", \"b\"], breakpoints = [0] }"),
            ConfigError::Fuzzy(FuzzyError::InvalidTermDefinition { .. })
        ));
        assert!(matches!(
            VariableTable::from_toml_str("[[variables]]\nvalue = 1.0"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(VariableTable::load("/nonexistent/fuzzy.toml"), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let table = VariableTable {
            variables: vec![VariableSpec {
                name: "SizeRating".into(),
                value: None,
                terms: Vec::new(),
                layout: Some(LayoutSpec {
                    names: vec!["useless".into(), "useful".into()],
                    breakpoints: vec![0., 6.],
                }),
            }],
        };
        let parsed = VariableTable::from_toml_str(&table.to_toml_string().unwrap()).unwrap();

        assert_eq!(parsed, table);
    }
}
