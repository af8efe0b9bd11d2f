use crate::ops::Connector;
use crate::variable::Variable;

/// `<variable> is <term>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Proposition {
    pub(crate) var: Variable,
    pub(crate) term: String,
}

impl Proposition {
    pub fn variable(&self) -> Variable {
        self.var
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn and(self, rhs: Proposition) -> Premise {
        Premise::And(self, rhs)
    }

    pub fn or(self, rhs: Proposition) -> Premise {
        Premise::Or(self, rhs)
    }
}

/// The condition of a rule: a single proposition or two joined by a
/// connector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Premise {
    Is(Proposition),
    And(Proposition, Proposition),
    Or(Proposition, Proposition),
}

impl Premise {
    pub fn connector(&self) -> Connector {
        match self {
            Premise::And(..) => Connector::And,
            Premise::Is(_) | Premise::Or(..) => Connector::Or,
        }
    }

    pub fn propositions(&self) -> Vec<&Proposition> {
        match self {
            Premise::Is(prop) => vec![prop],
            Premise::And(lhs, rhs) | Premise::Or(lhs, rhs) => vec![lhs, rhs],
        }
    }

    pub(crate) fn binary(op: Connector, lhs: Proposition, rhs: Proposition) -> Self {
        match op {
            Connector::And => Premise::And(lhs, rhs),
            Connector::Or => Premise::Or(lhs, rhs),
        }
    }
}

impl From<Proposition> for Premise {
    fn from(prop: Proposition) -> Self {
        Premise::Is(prop)
    }
}

impl Variable {
    pub fn is(self, term: impl Into<String>) -> Proposition {
        Proposition {
            var: self,
            term: term.into(),
        }
    }
}

#[test]
fn test_premise_shapes() {
    use crate::variable::{LinguisticVariable, Variables};

    let mut vars = Variables::new();
    let width = vars.insert(LinguisticVariable::new("TileWidth"));
    let height = vars.insert(LinguisticVariable::new("TileHeight"));

    let premise = width.is("a good width").and(height.is("a good height"));

    assert_eq!(premise.connector(), Connector::And);
    assert_eq!(
        premise.propositions().iter().map(|p| p.term()).collect::<Vec<_>>(),
        ["a good width", "a good height"]
    );

    let premise: Premise = width.is("too wide").into();

    assert_eq!(premise.connector(), Connector::Or);
    assert_eq!(premise.propositions()[0].variable(), width);
    assert_eq!(width.is("a").or(height.is("b")).connector(), Connector::Or);
}
