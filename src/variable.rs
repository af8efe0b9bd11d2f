use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::math::{area_and_moment, max_or_zero};
use crate::ops::Classification;
use crate::terms::Term;

/// Below this area the aggregated output is treated as empty
const MIN_AREA: f64 = 1e-5;

/// Fewest integration intervals used when deriving them from the range
const MIN_INTERVALS: usize = 10;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Handle to a [`LinguisticVariable`] stored in [`Variables`].
///
/// Handles are cheap to copy, so the same variable can be registered with
/// several [`Reasoning`](crate::Reasoning)s: as the output of one and an input
/// of the next.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Variable(pub(crate) VariableKey);

/// Arena owning every linguistic variable of a model.
#[derive(Debug, Default)]
pub struct Variables(pub(crate) SlotMap<VariableKey, LinguisticVariable>);

impl Variables {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    pub fn insert(&mut self, variable: LinguisticVariable) -> Variable {
        Variable(self.0.insert(variable))
    }

    pub fn get(&self, var: Variable) -> Result<&LinguisticVariable> {
        self.0.get(var.0).ok_or_else(|| unknown_handle(var))
    }

    pub fn get_mut(&mut self, var: Variable) -> Result<&mut LinguisticVariable> {
        self.0.get_mut(var.0).ok_or_else(|| unknown_handle(var))
    }

    /// First variable with the given name
    pub fn find(&self, name: &str) -> Option<Variable> {
        self.0
            .iter()
            .find(|(_, var)| var.name() == name)
            .map(|(key, _)| Variable(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.0.iter().map(|(key, var)| (Variable(key), var))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn unknown_handle(var: Variable) -> FuzzyError {
    FuzzyError::VariableNotFound {
        name: format!("{:?}", var.0),
    }
}

/// Panics if the handle belongs to another arena
impl Index<Variable> for Variables {
    type Output = LinguisticVariable;

    fn index(&self, var: Variable) -> &LinguisticVariable {
        &self.0[var.0]
    }
}

impl IndexMut<Variable> for Variables {
    fn index_mut(&mut self, var: Variable) -> &mut LinguisticVariable {
        &mut self.0[var.0]
    }
}

/// A named crisp value described by overlapping fuzzy terms.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: Arc<str>,
    value: f64,
    terms: BTreeMap<String, Term>,
}

impl LinguisticVariable {
    /// A variable without terms and a value of zero
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            value: 0.,
            terms: BTreeMap::new(),
        }
    }

    /// Two terms in the typical manner `‾✕‾`: the first is one up to `max0`,
    /// the second from `max1` on.
    pub fn two_terms<S: AsRef<str>>(name: impl AsRef<str>, terms: [S; 2], max0: f64, max1: f64) -> Result<Self> {
        Self::from_breakpoints(name, &terms, &[max0, max1])
    }

    /// Three terms in the typical manner `‾✕‾✕‾`.
    ///
    /// The first term is one up to `max0` and fades out at `max12`, the middle
    /// one is one on `[max11, max12]`, the last one rises from `max11` and is
    /// one from `max2` on.
    pub fn three_terms<S: AsRef<str>>(
        name: impl AsRef<str>,
        terms: [S; 3],
        max0: f64,
        max11: f64,
        max12: f64,
        max2: f64,
    ) -> Result<Self> {
        let [t0, t1, t2] = terms;
        let mut this = Self::new(name);

        this.add(t0.as_ref(), f64::NEG_INFINITY, max0, max12)?;
        this.add_trapezoid(t1.as_ref(), max0, max11, max12, max2)?;
        this.add(t2.as_ref(), max11, max2, f64::INFINITY)?;

        Ok(this)
    }

    /// Five terms in the typical manner `‾✕‾✕‾✕‾✕‾`; `maxima` are
    /// `[max0, max11, max12, max21, max22, max31, max32, max4]`.
    pub fn five_terms<S: AsRef<str>>(name: impl AsRef<str>, terms: [S; 5], maxima: [f64; 8]) -> Result<Self> {
        Self::from_breakpoints(name, &terms, &maxima)
    }

    /// Seven terms in the typical manner `‾✕‾✕‾✕‾✕‾✕‾✕‾` from the twelve x
    /// values where consecutive terms start and stop being one.
    pub fn seven_terms<S: AsRef<str>>(name: impl AsRef<str>, terms: [S; 7], x: [f64; 12]) -> Result<Self> {
        Self::from_breakpoints(name, &terms, &x)
    }

    /// `n` terms laid out as a chain of shoulders and trapezoids.
    ///
    /// Needs `2n - 2` breakpoints. The first term is `(-inf, x0, x1)`, term
    /// `i` in the middle is `(x[2i-2], x[2i-1], x[2i], x[2i+1])` and the last
    /// one is `(x[2n-4], x[2n-3], +inf)`.
    pub fn from_breakpoints<S: AsRef<str>>(name: impl AsRef<str>, terms: &[S], x: &[f64]) -> Result<Self> {
        let mut this = Self::new(name);
        let n = terms.len();

        if n < 2 || x.len() != 2 * n - 2 {
            return Err(FuzzyError::InvalidTermDefinition {
                variable: this.name.to_string(),
                term: terms.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(", "),
                points: x.to_vec(),
            });
        }

        for (i, term) in terms.iter().enumerate() {
            let term = term.as_ref();

            if i == 0 {
                this.add(term, f64::NEG_INFINITY, x[0], x[1])?;
            } else if i == n - 1 {
                this.add(term, x[2 * n - 4], x[2 * n - 3], f64::INFINITY)?;
            } else {
                this.add_trapezoid(term, x[2 * i - 2], x[2 * i - 1], x[2 * i], x[2 * i + 1])?;
            }
        }

        Ok(this)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Adds or replaces a triangular term which is one at `x2` only
    pub fn add(&mut self, term: impl Into<String>, x1: f64, x2: f64, x3: f64) -> Result<&mut Self> {
        self.add_trapezoid(term, x1, x2, x2, x3)
    }

    /// Adds or replaces a trapezoidal term which is one on `[x2, x3]`
    pub fn add_trapezoid(&mut self, term: impl Into<String>, x1: f64, x2: f64, x3: f64, x4: f64) -> Result<&mut Self> {
        let term = Term::new(self.name.clone(), term, x1, x2, x3, x4)?;

        self.terms.insert(term.name().to_owned(), term);

        Ok(self)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn term(&self, term: &str) -> Result<&Term> {
        self.terms.get(term).ok_or_else(|| self.term_not_found(term))
    }

    pub fn term_mut(&mut self, term: &str) -> Result<&mut Term> {
        match self.terms.get_mut(term) {
            Some(t) => Ok(t),
            None => Err(FuzzyError::TermNotFound {
                variable: self.name.to_string(),
                term: term.to_owned(),
            }),
        }
    }

    fn term_not_found(&self, term: &str) -> FuzzyError {
        FuzzyError::TermNotFound {
            variable: self.name.to_string(),
            term: term.to_owned(),
        }
    }

    /// The terms in name order. The iterator can be cloned to restart it.
    pub fn terms(&self) -> impl Iterator<Item = &Term> + Clone {
        self.terms.values()
    }

    /// Every term paired with its degree at the current value, e.g. to list
    /// the terms that apply, most confident first:
    ///
    /// ```
    /// # use fuzzy_reasoning::LinguisticVariable;
    /// let mut width = LinguisticVariable::three_terms(
    ///     "TileWidth",
    ///     ["not wide enough", "a good width", "too wide"],
    ///     50., 160., 200., 420.,
    /// ).unwrap();
    /// width.set_value(350.);
    ///
    /// let mut applying: Vec<_> = width.memberships().filter(|(_, degree)| *degree > 0.).collect();
    /// applying.sort_by(|a, b| b.1.total_cmp(&a.1));
    ///
    /// assert_eq!(applying[0].0.name(), "too wide");
    /// assert_eq!(applying.len(), 2);
    /// ```
    pub fn memberships(&self) -> impl Iterator<Item = (&Term, f64)> + Clone {
        let value = self.value;

        self.terms.values().map(move |term| (term, term.degree(value)))
    }

    /// Degree of the named term at the current value
    pub fn membership(&self, term: &str) -> Result<f64> {
        Ok(self.term(term)?.degree(self.value))
    }

    /// Forgets what the rules asserted in the previous pass
    pub fn reset_terms(&mut self) {
        for term in self.terms.values_mut() {
            term.reset_rule_max();
        }
    }

    /// Highest capped membership of any term at `x`
    fn envelope(&self, x: f64) -> f64 {
        max_or_zero(self.terms.values().map(|term| term.capped_degree(x)))
    }

    /// Smallest finite left foot and largest finite right foot over all terms.
    /// Open-ended terms fall back to their first or last finite breakpoint if
    /// no term has a finite foot on that side.
    pub fn universe(&self) -> (f64, f64) {
        let left = self
            .terms
            .values()
            .map(|term| term.points()[0])
            .filter(|x| x.is_finite())
            .reduce(f64::min)
            .or_else(|| self.terms.values().filter_map(Term::min_x).reduce(f64::min))
            .unwrap_or(f64::NAN);
        let right = self
            .terms
            .values()
            .map(|term| term.points()[3])
            .filter(|x| x.is_finite())
            .reduce(f64::max)
            .or_else(|| self.terms.values().filter_map(Term::max_x).reduce(f64::max))
            .unwrap_or(f64::NAN);

        (left, right)
    }

    /// Centre of gravity of the aggregated output over [`Self::universe`].
    ///
    /// The result is also stored as the variable's value.
    pub fn defuzzify(&mut self) -> Result<f64> {
        let (left, right) = self.universe();

        self.defuzzify_between(left, right, 0)
    }

    /// Centre of gravity of the aggregated output between `left` and `right`
    /// using `intervals` trapezoids. Passing zero intervals uses one per unit
    /// of range, but at least ten.
    pub fn defuzzify_between(&mut self, left: f64, right: f64, intervals: usize) -> Result<f64> {
        let intervals = if intervals == 0 {
            usize::max(MIN_INTERVALS, (right - left).ceil() as usize)
        } else {
            intervals
        };
        let samples = Linspace::new(left, right, intervals + 1);
        let step = samples.step();
        let (area, moment) = area_and_moment(samples.map(|x| (x, self.envelope(x))), step);

        // Also rejects NaN
        if !(area >= MIN_AREA) {
            return Err(FuzzyError::NoRuleFired {
                variable: self.name.to_string(),
                left,
                right,
            });
        }

        self.value = moment / area;

        debug!(
            event = "defuzzify",
            variable = %self.name,
            left,
            right,
            intervals,
            area,
            value = self.value,
        );

        Ok(self.value)
    }

    pub fn classify(&self, term: &str) -> Result<Classification> {
        self.membership(term).map(Classification::of)
    }

    /// Membership of `term` is at least 0.685
    pub fn is_totally(&self, term: &str) -> Result<bool> {
        Ok(self.classify(term)? == Classification::Totally)
    }

    /// Membership of `term` is in `[0.64, 0.685)`
    pub fn is_rather(&self, term: &str) -> Result<bool> {
        Ok(self.classify(term)? == Classification::Rather)
    }

    /// Membership of `term` is in `(0.55, 0.64)`
    pub fn is_not_really(&self, term: &str) -> Result<bool> {
        Ok(self.classify(term)? == Classification::NotReally)
    }

    /// Membership of `term` is at most 0.55
    pub fn is_not_at_all(&self, term: &str) -> Result<bool> {
        Ok(self.classify(term)? == Classification::NotAtAll)
    }
}

/// Panics if there is no such term; see [`LinguisticVariable::term`]
impl Index<&str> for LinguisticVariable {
    type Output = Term;

    fn index(&self, term: &str) -> &Term {
        match self.terms.get(term) {
            Some(t) => t,
            None => panic!("{}", self.term_not_found(term)),
        }
    }
}
