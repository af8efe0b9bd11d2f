use std::fmt;

use crate::variable::LinguisticVariable;

/// What one output term received in the last reasoning pass
#[derive(Clone, Debug, PartialEq)]
pub struct TermOutcome {
    pub term: String,
    /// Strongest firing any rule asserted on the term
    pub rule_max: f64,
    /// Membership of the defuzzified value in the term
    pub membership: f64,
    /// Proposition(s) behind `rule_max`
    pub because: String,
}

/// Snapshot of an output variable after [`Reasoning::execute`](crate::Reasoning::execute)
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    variable: String,
    value: f64,
    terms: Vec<TermOutcome>,
}

impl Outputs {
    pub(crate) fn new(var: &LinguisticVariable) -> Self {
        let terms = var
            .memberships()
            .map(|(term, membership)| TermOutcome {
                term: term.name().to_owned(),
                rule_max: term.rule_max(),
                membership,
                because: term.rule_max_text().to_owned(),
            })
            .collect();

        Self {
            variable: var.name().to_owned(),
            value: var.value(),
            terms,
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn terms(&self) -> &[TermOutcome] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&TermOutcome> {
        self.terms.iter().find(|t| t.term == name)
    }

    /// The term the rules supported most; the later one in name order on ties
    pub fn strongest(&self) -> Option<&TermOutcome> {
        self.terms.iter().max_by(|a, b| a.rule_max.total_cmp(&b.rule_max))
    }
}

impl fmt::Display for Outputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {:.2}", self.variable, self.value)?;

        for outcome in &self.terms {
            write!(
                f,
                "\t{:<14}\trule max {:>5.1}%\tmembership {:>5.1}%",
                outcome.term,
                outcome.rule_max * 100.,
                outcome.membership * 100.,
            )?;

            if !outcome.because.is_empty() {
                write!(f, "\t({})", outcome.because)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[test]
fn test_outputs_snapshot() {
    let mut rating = LinguisticVariable::two_terms("SizeRating", ["useless", "useful"], 0., 6.).unwrap();

    rating
        .term_mut("useful")
        .unwrap()
        .set_rule_max(1., "TileWidth is a good width");
    rating.term_mut("useless").unwrap().set_rule_max(0.25, "TileHeight is too high");
    rating.set_value(4.5);

    let outputs = Outputs::new(&rating);

    assert_eq!(outputs.variable(), "SizeRating");
    assert_eq!(outputs.value(), 4.5);
    assert_eq!(outputs.terms().len(), 2);
    assert_eq!(outputs.strongest().unwrap().term, "useful");
    assert_eq!(outputs.term("useless").unwrap().membership, 0.25);
    assert_eq!(outputs.term("useful").unwrap().membership, 0.75);
    assert!(outputs.to_string().contains("(TileWidth is a good width)"));
}
