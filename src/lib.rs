//! Mamdani fuzzy reasoning over linguistic variables.
//!
//! A [`LinguisticVariable`] maps a crisp value onto named trapezoidal
//! [`Term`]s. A [`Reasoning`] connects input variables to one output variable
//! through rules like `IF TileWidth is a good width AND TileHeight is a good
//! height THEN TileSizeRating is good size`. Executing it composes the rules
//! with min/max and returns the centre of gravity of the output.
//!
//! ```
//! use fuzzy_reasoning::{Connector, Inputs, LinguisticVariable, Reasoning, Variables};
//!
//! let mut vars = Variables::new();
//! let width = vars.insert(LinguisticVariable::three_terms(
//!     "TileWidth", ["not wide enough", "a good width", "too wide"], 50., 208., 258., 420.,
//! )?);
//! let height = vars.insert(LinguisticVariable::three_terms(
//!     "TileHeight", ["not high enough", "a good height", "too high"], 50., 210., 260., 420.,
//! )?);
//! let size = vars.insert(LinguisticVariable::three_terms(
//!     "TileSize", ["too small", "good size", "too big"], 0., 6., 8., 14.,
//! )?);
//!
//! let mut tile = Reasoning::with_two_inputs(&vars, size, width, height)?;
//! tile.add_binary_rule(&vars, "good size", Connector::And, width, "a good width", height, "a good height")?
//!     .add_rule_permutations(&vars, "too small", width, ["not wide enough", "too wide"], height, ["not high enough", "too high"])?;
//!
//! let inputs: Inputs = [("TileWidth", 208.), ("TileHeight", 260.)].into_iter().collect();
//! let value = tile.execute_with(&mut vars, &inputs)?;
//!
//! assert!(value > 7. && value < 8.);
//! assert!(vars[size].is_totally("good size")?);
//! # Ok::<(), fuzzy_reasoning::FuzzyError>(())
//! ```

pub mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use config::{ConfigError, LayoutSpec, TermSpec, VariableSpec, VariableTable};
pub use dsl::{Premise, Proposition};
pub use error::{FuzzyError, Result};
pub use inference::{Reasoning, VarRef};
pub use inputs::Inputs;
pub use ops::{Classification, Connector};
pub use outputs::{Outputs, TermOutcome};
pub use rules::{Firing, Rule, Rules};
pub use terms::Term;
pub use variable::{LinguisticVariable, Variable, VariableKey, Variables};
