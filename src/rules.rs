use tracing::trace;

use crate::dsl::{Premise, Proposition};
use crate::error::Result;
use crate::ops::Connector;
use crate::variable::Variables;

/// Ordered rule base of a [`Reasoning`](crate::Reasoning)
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'r> IntoIterator for &'r Rules {
    type Item = &'r Rule;
    type IntoIter = std::slice::Iter<'r, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// `IF <premise> THEN <consequence>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub(crate) premise: Premise,
    pub(crate) consequence: Proposition,
}

/// Outcome of evaluating one rule against the current variable values
#[derive(Clone, Debug, PartialEq)]
pub struct Firing {
    pub strength: f64,
    /// Proposition(s) that decided the strength
    pub text: String,
}

impl Rule {
    pub(crate) fn new(premise: Premise, consequence: Proposition) -> Self {
        Self { premise, consequence }
    }

    pub fn premise(&self) -> &Premise {
        &self.premise
    }

    pub fn consequence(&self) -> &Proposition {
        &self.consequence
    }

    pub fn connector(&self) -> Connector {
        self.premise.connector()
    }

    /// Folds the antecedent degrees at the variables' current values.
    pub fn evaluate(&self, vars: &Variables) -> Result<Firing> {
        let degrees = self
            .premise
            .propositions()
            .into_iter()
            .map(|prop| {
                let var = vars.get(prop.var)?;
                let term = var.term(&prop.term)?;

                Ok((term.degree(var.value()), term.proposition()))
            })
            .collect::<Result<Vec<_>>>()?;
        let (strength, text) = self.connector().fold_explained(degrees);

        Ok(Firing { strength, text })
    }

    /// Evaluates the rule and registers its strength on the consequent term.
    pub(crate) fn fire(&self, vars: &mut Variables) -> Result<Firing> {
        let firing = self.evaluate(vars)?;
        let term = vars
            .get_mut(self.consequence.var)?
            .term_mut(&self.consequence.term)?;

        trace!(
            event = "rule_fired",
            consequent = %term.proposition(),
            strength = firing.strength,
            because = %firing.text,
        );

        term.set_rule_max(firing.strength, firing.text.clone());

        Ok(firing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::LinguisticVariable;

    fn setup() -> (Variables, Rule, Rule) {
        let mut vars = Variables::new();
        let mut width = LinguisticVariable::new("Width");
        let mut height = LinguisticVariable::new("Height");
        let mut size = LinguisticVariable::new("Size");

        width.add("wide", 0., 10., 20.).unwrap();
        height.add("high", 0., 10., 20.).unwrap();
        size.add("big", 0., 10., 20.).unwrap();
        width.set_value(5.);
        height.set_value(8.);

        let width = vars.insert(width);
        let height = vars.insert(height);
        let size = vars.insert(size);

        let and = Rule::new(width.is("wide").and(height.is("high")), size.is("big"));
        let or = Rule::new(width.is("wide").or(height.is("high")), size.is("big"));

        (vars, and, or)
    }

    #[test]
    fn test_evaluate_and_or() {
        let (vars, and, or) = setup();

        assert_eq!(
            and.evaluate(&vars).unwrap(),
            Firing {
                strength: 0.5,
                text: "Width is wide".into(),
            }
        );
        assert_eq!(
            or.evaluate(&vars).unwrap(),
            Firing {
                strength: 0.8,
                text: "Height is high".into(),
            }
        );
    }

    #[test]
    fn test_fire_keeps_maximum() {
        let (mut vars, and, or) = setup();
        let size = vars.find("Size").unwrap();

        or.fire(&mut vars).unwrap();
        and.fire(&mut vars).unwrap();

        let big = vars[size].term("big").unwrap();

        assert_eq!(big.rule_max(), 0.8);
        assert_eq!(big.rule_max_text(), "Height is high");
    }

    #[test]
    fn test_unknown_term_fails_evaluation() {
        let (vars, _, _) = setup();
        let width = vars.find("Width").unwrap();
        let size = vars.find("Size").unwrap();
        let rule = Rule::new(width.is("narrow").into(), size.is("big"));

        assert!(rule.evaluate(&vars).is_err());
    }
}
