use thiserror::Error;

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

/// Everything that can go wrong while building or running a rule base.
///
/// None of these are transient: they point at a broken variable definition or
/// rule base, or at inputs that never reached a rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("invalid term {variable}.{term}: breakpoints {points:?} must satisfy x1 <= x2 <= x3 <= x4")]
    InvalidTermDefinition {
        variable: String,
        term: String,
        points: Vec<f64>,
    },

    #[error("variable not found: {name}")]
    VariableNotFound { name: String },

    #[error("term not found: {variable}.{term}")]
    TermNotFound { variable: String, term: String },

    #[error("rule refers to {variable}, which is neither the output {output} nor a registered input")]
    NonLocalReference { variable: String, output: String },

    #[error("no rule applied for {variable} between {left} and {right}")]
    NoRuleFired { variable: String, left: f64, right: f64 },

    #[error("unknown input {name}; registered inputs: {known:?}")]
    UnknownInput { name: String, known: Vec<String> },

    #[error("invalid inputs: {0}")]
    InvalidInputs(String),
}
