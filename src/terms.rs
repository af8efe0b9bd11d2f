use std::fmt;
use std::sync::Arc;

use crate::error::{FuzzyError, Result};

/// A membership function of a linguistic variable.
///
/// The shape is a trapezoid through `(x1, 0)`, `(x2, 1)`, `(x3, 1)` and
/// `(x4, 0)`. With `x2 == x3` it degenerates to a triangle, and `x1 = -inf` or
/// `x4 = +inf` give the open-ended shoulders `‾\_` and `_/‾`.
///
/// Besides its shape a term carries the strongest firing strength any rule
/// asserted on it during the current reasoning pass, together with the
/// proposition(s) that produced it.
#[derive(Clone, Debug)]
pub struct Term {
    name: String,
    // Name of the owning variable, fixed at construction.
    variable: Arc<str>,
    x1: f64,
    x2: f64,
    x3: f64,
    x4: f64,
    rule_max: f64,
    rule_max_text: String,
}

impl Term {
    pub(crate) fn new(variable: Arc<str>, name: impl Into<String>, x1: f64, x2: f64, x3: f64, x4: f64) -> Result<Self> {
        let name = name.into();

        // Written so that NaN breakpoints fail as well
        if !(x1 <= x2 && x2 <= x3 && x3 <= x4) {
            return Err(FuzzyError::InvalidTermDefinition {
                variable: variable.to_string(),
                term: name,
                points: vec![x1, x2, x3, x4],
            });
        }

        Ok(Self {
            name,
            variable,
            x1,
            x2,
            x3,
            x4,
            rule_max: 0.,
            rule_max_text: String::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the variable this term belongs to
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn points(&self) -> [f64; 4] {
        [self.x1, self.x2, self.x3, self.x4]
    }

    /// Degree of membership of `x`, between zero and one.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() || x <= self.x1 || x >= self.x4 {
            return 0.;
        }
        if self.x2 <= x && x <= self.x3 {
            return 1.;
        }
        if x < self.x2 {
            if self.x1 == f64::NEG_INFINITY || (self.x2 - self.x1).abs() < f64::EPSILON {
                return 1.;
            }
            return (x - self.x1) / (self.x2 - self.x1);
        }
        if self.x4 == f64::INFINITY || (self.x4 - self.x3).abs() < f64::EPSILON {
            return 1.;
        }

        (self.x4 - x) / (self.x4 - self.x3)
    }

    /// Degree of membership of `x`, but never more than the rules asserted for
    /// this term in the current pass.
    pub fn capped_degree(&self, x: f64) -> f64 {
        f64::min(self.degree(x), self.rule_max)
    }

    /// `"<variable> is <term>"`
    pub fn proposition(&self) -> String {
        format!("{} is {}", self.variable, self.name)
    }

    pub fn rule_max(&self) -> f64 {
        self.rule_max
    }

    /// The proposition(s) responsible for the current rule max
    pub fn rule_max_text(&self) -> &str {
        &self.rule_max_text
    }

    /// Keeps the larger of the current rule max and `candidate`. Ties go to
    /// the later rule.
    pub fn set_rule_max(&mut self, candidate: f64, text: impl Into<String>) {
        if self.rule_max <= candidate {
            self.rule_max = candidate;
            self.rule_max_text = text.into();
        }
    }

    pub fn reset_rule_max(&mut self) {
        self.rule_max = 0.;
        self.rule_max_text.clear();
    }

    /// First finite breakpoint
    pub(crate) fn min_x(&self) -> Option<f64> {
        self.points().into_iter().find(|x| x.is_finite())
    }

    /// Last finite breakpoint
    pub(crate) fn max_x(&self) -> Option<f64> {
        self.points().into_iter().rev().find(|x| x.is_finite())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14}\t{} {} {} {}", self.name, self.x1, self.x2, self.x3, self.x4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(x1: f64, x2: f64, x3: f64, x4: f64) -> Term {
        Term::new("Width".into(), "good", x1, x2, x3, x4).unwrap()
    }

    #[test]
    fn test_trapezoid_degree() {
        let t = term(0., 2., 4., 8.);

        assert_eq!(t.degree(-1.), 0.);
        assert_eq!(t.degree(0.), 0.);
        assert_eq!(t.degree(1.), 0.5);
        assert_eq!(t.degree(2.), 1.);
        assert_eq!(t.degree(3.), 1.);
        assert_eq!(t.degree(4.), 1.);
        assert_eq!(t.degree(6.), 0.5);
        assert_eq!(t.degree(8.), 0.);
        assert_eq!(t.degree(9.), 0.);
    }

    #[test]
    fn test_triangle_degree() {
        let t = term(5., 8.5, 8.5, 12.);

        assert_eq!(t.degree(8.5), 1.);
        assert_eq!(t.degree(6.75), 0.5);
        assert_eq!(t.degree(10.25), 0.5);
    }

    #[test]
    fn test_open_ended_shoulders() {
        let left = term(f64::NEG_INFINITY, 1., 1., 3.);

        assert_eq!(left.degree(-1e300), 1.);
        assert_eq!(left.degree(0.), 1.);
        assert_eq!(left.degree(2.), 0.5);
        assert_eq!(left.degree(3.), 0.);

        let right = term(3., 5., 5., f64::INFINITY);

        assert_eq!(right.degree(3.), 0.);
        assert_eq!(right.degree(4.), 0.5);
        assert_eq!(right.degree(15.), 1.);
        assert_eq!(right.degree(f64::INFINITY), 0.);
    }

    #[test]
    fn test_vertical_edges_collapse_to_one() {
        // x1 == x2 is a vertical rising edge, excluded at x1 itself
        let t = term(1., 1., 2., 2.);

        assert_eq!(t.degree(1.), 0.);
        assert_eq!(t.degree(1.5), 1.);
        assert_eq!(t.degree(2.), 0.);
    }

    #[test]
    fn test_nan_input_has_no_membership() {
        assert_eq!(term(0., 1., 2., 3.).degree(f64::NAN), 0.);
    }

    #[test]
    fn test_invalid_definition() {
        let err = Term::new("Width".into(), "bad", 0., 3., 2., 4.).unwrap_err();

        assert_eq!(
            err,
            FuzzyError::InvalidTermDefinition {
                variable: "Width".into(),
                term: "bad".into(),
                points: vec![0., 3., 2., 4.],
            }
        );
        assert!(Term::new("Width".into(), "nan", 0., f64::NAN, 2., 4.).is_err());
    }

    #[test]
    fn test_rule_max_is_monotone() {
        let mut t = term(0., 2., 4., 8.);

        t.set_rule_max(0.4, "A is a");
        t.set_rule_max(0.2, "B is b");
        assert_eq!(t.rule_max(), 0.4);
        assert_eq!(t.rule_max_text(), "A is a");

        t.set_rule_max(0.4, "C is c");
        assert_eq!(t.rule_max_text(), "C is c");

        assert_eq!(t.capped_degree(3.), 0.4);
        assert_eq!(t.capped_degree(1.), 0.4);
        assert_eq!(t.capped_degree(0.4), 0.2);

        t.reset_rule_max();
        assert_eq!(t.rule_max(), 0.);
        assert_eq!(t.rule_max_text(), "");
        assert_eq!(t.capped_degree(3.), 0.);
    }

    #[test]
    fn test_finite_bounds() {
        let t = term(f64::NEG_INFINITY, 1., 1., 3.);

        assert_eq!(t.min_x(), Some(1.));
        assert_eq!(t.max_x(), Some(3.));
        assert_eq!(t.proposition(), "Width is good");
    }
}
