use std::fmt;

use num::Float;

/// Operator combining the antecedents of a rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Connector {
    /// Minimum of the antecedent degrees
    #[default]
    And,
    /// Maximum of the antecedent degrees; a single antecedent passes through
    Or,
}

impl Connector {
    pub fn fold<F: Float>(self, degrees: impl IntoIterator<Item = F>) -> F {
        let iter = degrees.into_iter();

        match self {
            Self::And => iter.fold(F::one(), F::min),
            Self::Or => iter.fold(F::zero(), F::max),
        }
    }

    /// Like [`Connector::fold`], also reporting which propositions decided the
    /// result. Propositions tied for the minimum are joined with `" ∧ "`; for
    /// the maximum the last one reaching it wins.
    pub(crate) fn fold_explained<F: Float>(self, degrees: impl IntoIterator<Item = (F, String)>) -> (F, String) {
        let mut text = String::new();

        match self {
            Self::And => {
                let mut opt = F::one();

                for (current, proposition) in degrees {
                    if current < opt || (text.is_empty() && current <= opt) {
                        opt = current;
                        text = proposition;
                    } else if current == opt {
                        text.push_str(" ∧ ");
                        text.push_str(&proposition);
                    }
                }

                (opt, text)
            },
            Self::Or => {
                let mut opt = F::zero();

                for (current, proposition) in degrees {
                    if current >= opt {
                        opt = current;
                        text = proposition;
                    }
                }

                (opt, text)
            },
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

/// Crisp reading of a membership degree. The four bands partition `[0, 1]`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Classification {
    /// `degree >= 0.685`
    Totally,
    /// `0.64 <= degree < 0.685`
    Rather,
    /// `0.55 < degree < 0.64`
    NotReally,
    /// `degree <= 0.55`
    NotAtAll,
}

impl Classification {
    pub const TOTALLY: f64 = 0.685;
    pub const RATHER: f64 = 0.64;
    pub const NOT_REALLY: f64 = 0.55;

    pub fn of(degree: f64) -> Self {
        if degree >= Self::TOTALLY {
            Self::Totally
        } else if degree >= Self::RATHER {
            Self::Rather
        } else if degree > Self::NOT_REALLY {
            Self::NotReally
        } else {
            Self::NotAtAll
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Totally => "totally",
            Self::Rather => "rather",
            Self::NotReally => "not really",
            Self::NotAtAll => "not at all",
        };

        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(Connector::And.fold([0.3, 0.8, 0.5]), 0.3);
        assert_eq!(Connector::Or.fold([0.3, 0.8, 0.5]), 0.8);
        assert_eq!(Connector::Or.fold([0.4f32]), 0.4);
        assert_eq!(Connector::And.fold([0.4f32]), 0.4);
    }

    #[test]
    fn test_fold_explained_and() {
        let (degree, text) = Connector::And.fold_explained([(0.5, "A is a".to_owned()), (0.2, "B is b".to_owned())]);

        assert_eq!(degree, 0.2);
        assert_eq!(text, "B is b");

        let (degree, text) = Connector::And.fold_explained([(0.5, "A is a".to_owned()), (0.5, "B is b".to_owned())]);

        assert_eq!(degree, 0.5);
        assert_eq!(text, "A is a ∧ B is b");

        let (degree, text) = Connector::And.fold_explained([(1.0, "A is a".to_owned())]);

        assert_eq!(degree, 1.0);
        assert_eq!(text, "A is a");
    }

    #[test]
    fn test_fold_explained_or() {
        let (degree, text) = Connector::Or.fold_explained([(0.5, "A is a".to_owned()), (0.5, "B is b".to_owned())]);

        assert_eq!(degree, 0.5);
        assert_eq!(text, "B is b");

        let (degree, text) = Connector::Or.fold_explained([(0.0, "A is a".to_owned())]);

        assert_eq!(degree, 0.0);
        assert_eq!(text, "A is a");
    }

    #[test]
    fn test_classification_bands() {
        assert_eq!(Classification::of(1.), Classification::Totally);
        assert_eq!(Classification::of(0.685), Classification::Totally);
        assert_eq!(Classification::of(0.684), Classification::Rather);
        assert_eq!(Classification::of(0.64), Classification::Rather);
        assert_eq!(Classification::of(0.639), Classification::NotReally);
        assert_eq!(Classification::of(0.551), Classification::NotReally);
        assert_eq!(Classification::of(0.55), Classification::NotAtAll);
        assert_eq!(Classification::of(0.), Classification::NotAtAll);
    }
}
