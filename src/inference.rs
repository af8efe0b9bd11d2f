use std::collections::BTreeMap;

use tracing::debug;

use crate::dsl::{Premise, Proposition};
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::Connector;
use crate::outputs::Outputs;
use crate::rules::{Rule, Rules};
use crate::variable::{Variable, Variables};

/// Refers to a variable of a [`Reasoning`] either by handle or by the name it
/// was registered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarRef<'a> {
    Handle(Variable),
    Name(&'a str),
}

impl From<Variable> for VarRef<'_> {
    fn from(var: Variable) -> Self {
        VarRef::Handle(var)
    }
}

impl<'a> From<&'a str> for VarRef<'a> {
    fn from(name: &'a str) -> Self {
        VarRef::Name(name)
    }
}

/// Mamdani inference over one output variable.
///
/// Each [`execute`](Self::execute) resets what the output terms were asserted
/// in the previous pass, fires every rule in order (keeping the strongest
/// firing per output term) and returns the centre of gravity of the result.
///
/// Variables stay in the caller's [`Variables`], so one reasoning's output can
/// be another one's input. Nothing propagates on its own: execute the upstream
/// reasoning first.
#[derive(Clone, Debug)]
pub struct Reasoning {
    output: Variable,
    output_name: String,
    inputs: BTreeMap<String, Variable>,
    rules: Rules,
}

impl Reasoning {
    /// Registers the output and the inputs, the latter under their variable
    /// names. A later input with the same name replaces an earlier one.
    pub fn new(vars: &Variables, output: Variable, inputs: impl IntoIterator<Item = Variable>) -> Result<Self> {
        let output_name = vars.get(output)?.name().to_owned();
        let inputs = inputs
            .into_iter()
            .map(|var| Ok((vars.get(var)?.name().to_owned(), var)))
            .collect::<Result<_>>()?;

        Ok(Self {
            output,
            output_name,
            inputs,
            rules: Rules::new(),
        })
    }

    pub fn with_two_inputs(vars: &Variables, output: Variable, in0: Variable, in1: Variable) -> Result<Self> {
        Self::new(vars, output, [in0, in1])
    }

    pub fn with_four_inputs(
        vars: &Variables,
        output: Variable,
        in0: Variable,
        in1: Variable,
        in2: Variable,
        in3: Variable,
    ) -> Result<Self> {
        Self::new(vars, output, [in0, in1, in2, in3])
    }

    pub fn output(&self) -> Variable {
        self.output
    }

    /// The input registered under `name`
    pub fn input(&self, name: &str) -> Result<Variable> {
        self.inputs
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::VariableNotFound { name: name.to_owned() })
    }

    pub fn inputs(&self) -> impl Iterator<Item = (&str, Variable)> {
        self.inputs.iter().map(|(name, var)| (name.as_str(), *var))
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn resolve<'a>(&self, vars: &Variables, var: impl Into<VarRef<'a>>) -> Result<Variable> {
        match var.into() {
            VarRef::Name(name) => self.input(name),
            VarRef::Handle(var) => {
                let name = vars.get(var)?.name();

                if var == self.output || self.inputs.values().any(|input| *input == var) {
                    Ok(var)
                } else {
                    Err(FuzzyError::NonLocalReference {
                        variable: name.to_owned(),
                        output: self.output_name.clone(),
                    })
                }
            },
        }
    }

    fn check_rule(&self, vars: &Variables, rule: &Rule) -> Result<()> {
        let consequence = &rule.consequence;

        if consequence.var != self.output {
            return Err(FuzzyError::NonLocalReference {
                variable: vars.get(consequence.var)?.name().to_owned(),
                output: self.output_name.clone(),
            });
        }
        vars.get(self.output)?.term(&consequence.term)?;

        for prop in rule.premise.propositions() {
            let var = self.resolve(vars, prop.var)?;

            vars.get(var)?.term(&prop.term)?;
        }

        Ok(())
    }

    /// Validates every rule before adding any of them
    fn extend(&mut self, vars: &Variables, rules: Vec<Rule>) -> Result<&mut Self> {
        for rule in &rules {
            self.check_rule(vars, rule)?;
        }

        self.rules.0.extend(rules);

        Ok(self)
    }

    fn consequence(&self, out_term: &str) -> Proposition {
        self.output.is(out_term)
    }

    /// `IF <premise> THEN <consequence>` where the consequence must be a term
    /// of the output variable.
    ///
    /// ```
    /// # use fuzzy_reasoning::{LinguisticVariable, Reasoning, Variables};
    /// let mut vars = Variables::new();
    /// let width = vars.insert(LinguisticVariable::three_terms(
    ///     "TileWidth", ["not wide enough", "a good width", "too wide"], 50., 420., 420., 700.,
    /// )?);
    /// let height = vars.insert(LinguisticVariable::three_terms(
    ///     "TileHeight", ["not high enough", "a good height", "too high"], 50., 420., 420., 700.,
    /// )?);
    /// let rating = vars.insert(LinguisticVariable::three_terms(
    ///     "TileSizeRating", ["too small", "good size", "too big"], 0., 6., 8., 21.,
    /// )?);
    ///
    /// let mut reasoning = Reasoning::with_two_inputs(&vars, rating, width, height)?;
    /// reasoning.add_rule(
    ///     &vars,
    ///     width.is("a good width").and(height.is("a good height")),
    ///     rating.is("good size"),
    /// )?;
    ///
    /// assert!(reasoning.add_rule(&vars, width.is("a good height"), rating.is("good size")).is_err());
    /// # Ok::<(), fuzzy_reasoning::FuzzyError>(())
    /// ```
    pub fn add_rule(&mut self, vars: &Variables, premise: impl Into<Premise>, consequence: Proposition) -> Result<&mut Self> {
        let rule = Rule::new(premise.into(), consequence);

        self.extend(vars, vec![rule])
    }

    /// One condition, behaving rather like an assignment
    pub fn add_unary_rule<'a>(
        &mut self,
        vars: &Variables,
        out_term: &str,
        in1: impl Into<VarRef<'a>>,
        in1_term: &str,
    ) -> Result<&mut Self> {
        let in1 = self.resolve(vars, in1)?;
        let rule = Rule::new(in1.is(in1_term).into(), self.consequence(out_term));

        self.extend(vars, vec![rule])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_binary_rule<'a, 'b>(
        &mut self,
        vars: &Variables,
        out_term: &str,
        op: Connector,
        in1: impl Into<VarRef<'a>>,
        in1_term: &str,
        in2: impl Into<VarRef<'b>>,
        in2_term: &str,
    ) -> Result<&mut Self> {
        let in1 = self.resolve(vars, in1)?;
        let in2 = self.resolve(vars, in2)?;
        let premise = Premise::binary(op, in1.is(in1_term), in2.is(in2_term));
        let rule = Rule::new(premise, self.consequence(out_term));

        self.extend(vars, vec![rule])
    }

    /// Adds the rule and its mirror with the terms swapped between the two
    /// inputs. Useful when both inputs measure the same thing and may come in
    /// either order, e.g. two marks.
    #[allow(clippy::too_many_arguments)]
    pub fn add_symmetric_rule<'a, 'b>(
        &mut self,
        vars: &Variables,
        out_term: &str,
        op: Connector,
        in1: impl Into<VarRef<'a>>,
        in1_term: &str,
        in2: impl Into<VarRef<'b>>,
        in2_term: &str,
    ) -> Result<&mut Self> {
        let in1 = self.resolve(vars, in1)?;
        let in2 = self.resolve(vars, in2)?;
        let rules = vec![
            Rule::new(
                Premise::binary(op, in1.is(in1_term), in2.is(in2_term)),
                self.consequence(out_term),
            ),
            Rule::new(
                Premise::binary(op, in1.is(in2_term), in2.is(in1_term)),
                self.consequence(out_term),
            ),
        ];

        self.extend(vars, rules)
    }

    /// Conjunction of any pair out of the four antecedents (six rules)
    pub fn add_rule_set<'a, V: Into<VarRef<'a>>>(
        &mut self,
        vars: &Variables,
        out_term: &str,
        antecedents: [(V, &str); 4],
    ) -> Result<&mut Self> {
        let mut props = Vec::with_capacity(4);

        for (var, term) in antecedents {
            props.push(self.resolve(vars, var)?.is(term));
        }

        let mut rules = Vec::with_capacity(6);

        for i in 0..props.len() {
            for j in i + 1..props.len() {
                let premise = props[i].clone().and(props[j].clone());

                rules.push(Rule::new(premise, self.consequence(out_term)));
            }
        }

        self.extend(vars, rules)
    }

    /// The four conjunctions pairing either term of `in1` with either term of
    /// `in2`, e.g. "(too small or too big) and (too small or too big)".
    pub fn add_rule_permutations<'a, 'b>(
        &mut self,
        vars: &Variables,
        out_term: &str,
        in1: impl Into<VarRef<'a>>,
        in1_terms: [&str; 2],
        in2: impl Into<VarRef<'b>>,
        in2_terms: [&str; 2],
    ) -> Result<&mut Self> {
        let in1 = self.resolve(vars, in1)?;
        let in2 = self.resolve(vars, in2)?;
        let rules = in1_terms
            .iter()
            .flat_map(|t1| in2_terms.iter().map(move |t2| (t1, t2)))
            .map(|(t1, t2)| Rule::new(in1.is(*t1).and(in2.is(*t2)), self.consequence(out_term)))
            .collect();

        self.extend(vars, rules)
    }

    fn bind(&self, vars: &mut Variables, inputs: &Inputs) -> Result<()> {
        // Reject unknown names before touching any value
        let bound = inputs
            .iter()
            .map(|(name, val)| match self.inputs.get(name) {
                Some(var) => Ok((*var, val)),
                None => Err(FuzzyError::UnknownInput {
                    name: name.to_owned(),
                    known: self.inputs.keys().cloned().collect(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        for (var, val) in bound {
            vars.get_mut(var)?.set_value(val);
        }

        Ok(())
    }

    /// Runs one pass with the current input values and returns the crisp
    /// output value, which is also stored on the output variable.
    pub fn execute(&self, vars: &mut Variables) -> Result<f64> {
        vars.get_mut(self.output)?.reset_terms();

        debug!(
            event = "execute_start",
            output = %self.output_name,
            rules = self.rules.len(),
        );

        for rule in &self.rules {
            rule.fire(vars)?;
        }

        let value = vars.get_mut(self.output)?.defuzzify()?;

        debug!(event = "execute_end", output = %self.output_name, value);

        Ok(value)
    }

    /// Sets the given inputs, then runs [`execute`](Self::execute). Fails
    /// without changing anything if an input is not registered.
    pub fn execute_with(&self, vars: &mut Variables, inputs: &Inputs) -> Result<f64> {
        self.bind(vars, inputs)?;
        self.execute(vars)
    }

    /// Per-term report of the output variable's last pass
    pub fn explain(&self, vars: &Variables) -> Result<Outputs> {
        Ok(Outputs::new(vars.get(self.output)?))
    }
}
