use std::fmt;
use std::str::FromStr;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::FisError;

/// Operator combining the antecedent memberships of a rule premise.
///
/// A rule uses exactly one of these for all of its antecedents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleOperator {
    /// Minimum of the antecedent memberships
    And,
    /// Maximum of the antecedent memberships
    Or,
}

impl RuleOperator {
    /// Rule strength for the given antecedent memberships, `None` if there are none
    pub fn call<F: Float>(self, memberships: impl IntoIterator<Item = F>) -> Option<F> {
        match self {
            Self::And => memberships.into_iter().reduce(F::min),
            Self::Or => memberships.into_iter().reduce(F::max),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Mamdani implication: clip a consequent membership at the rule strength
#[inline]
pub(crate) fn clip<F: Float>(strength: F, membership: F) -> F {
    F::min(strength, membership)
}

/// Inference algorithm run by `solve`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InferenceType {
    #[default]
    Mamdani,
}

impl FromStr for InferenceType {
    type Err = FisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mamdani" => Ok(Self::Mamdani),
            other => Err(FisError::UnknownInferenceType(other.to_owned())),
        }
    }
}

/// Method for defuzzificating the aggregated membership function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefuzzificationMethod {
    /// Membership-weighted mean of the grid values
    Centroid,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaxima,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaxima,
    /// Largest value for which the membership function is maximum
    LargestOfMaxima,
}

impl DefuzzificationMethod {
    pub const ALL: [Self; 4] = [
        Self::Centroid,
        Self::MeanOfMaxima,
        Self::SmallestOfMaxima,
        Self::LargestOfMaxima,
    ];

    /// Crisp value of the discretized function `membership` over `universe`.
    ///
    /// `None` when the result is undefined: an empty function, or a Centroid
    /// over a function whose memberships sum to zero.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        let samples = || universe.iter().copied().zip(membership.iter().copied());

        match self {
            Self::Centroid => {
                let (num, den) = samples().fold((F::zero(), F::zero()), |(num, den), (u, m)| (num + u * m, den + m));

                if den == F::zero() {
                    None
                } else {
                    Some(num / den)
                }
            },
            Self::MeanOfMaxima => {
                let maximum = membership.iter().copied().reduce(F::max)?;
                let (len, sum) = samples()
                    .filter(|(_, m)| *m == maximum)
                    .fold((0usize, F::zero()), |(len, sum), (u, _)| (len + 1, sum + u));

                Some(sum / F::from(len)?)
            },
            Self::SmallestOfMaxima => {
                let maximum = membership.iter().copied().reduce(F::max)?;
                samples().filter(|(_, m)| *m == maximum).map(|(u, _)| u).reduce(F::min)
            },
            Self::LargestOfMaxima => {
                let maximum = membership.iter().copied().reduce(F::max)?;
                samples().filter(|(_, m)| *m == maximum).map(|(u, _)| u).reduce(F::max)
            },
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Centroid => "Centroid",
            Self::MeanOfMaxima => "MeanOfMaxima",
            Self::SmallestOfMaxima => "SmallestOfMaxima",
            Self::LargestOfMaxima => "LargestOfMaxima",
        }
    }
}

impl fmt::Display for DefuzzificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DefuzzificationMethod {
    type Err = FisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.tag() == s)
            .ok_or_else(|| FisError::UnknownDefuzzificationMethod(s.to_owned()))
    }
}

#[test]
fn test_rule_operator() {
    assert_eq!(RuleOperator::And.call([0.5, 0.25, 0.75]), Some(0.25));
    assert_eq!(RuleOperator::Or.call([0.5, 0.25, 0.75]), Some(0.75));
    assert_eq!(RuleOperator::And.call(Vec::<f64>::new()), None);
}

#[test]
fn test_defuzzification() {
    let universe = [1., 2., 3., 4., 5.];
    let membership = [0., 0.5, 1., 1., 0.5];

    assert_eq!(DefuzzificationMethod::Centroid.call(&universe, &membership), Some(3.5));
    assert_eq!(DefuzzificationMethod::MeanOfMaxima.call(&universe, &membership), Some(3.5));
    assert_eq!(DefuzzificationMethod::SmallestOfMaxima.call(&universe, &membership), Some(3.));
    assert_eq!(DefuzzificationMethod::LargestOfMaxima.call(&universe, &membership), Some(4.));
}

#[test]
fn test_mean_of_maxima_averages_every_tie() {
    let universe = [0., 1., 2., 3., 4., 5., 6.];
    let membership = [1., 0., 0., 1., 0., 0., 1.];

    assert_eq!(DefuzzificationMethod::MeanOfMaxima.call(&universe, &membership), Some(3.));
}

#[test]
fn test_defuzzification_undefined() {
    let universe = [1., 2., 3.];

    assert_eq!(DefuzzificationMethod::Centroid.call(&universe, &[0., 0., 0.]), None);
    // Every sample attains a flat maximum
    assert_eq!(DefuzzificationMethod::MeanOfMaxima.call(&universe, &[0., 0., 0.]), Some(2.));

    for method in DefuzzificationMethod::ALL {
        assert_eq!(method.call::<f64>(&[], &[]), None);
    }
}

#[test]
fn test_tags() {
    for method in DefuzzificationMethod::ALL {
        assert_eq!(method.tag().parse::<DefuzzificationMethod>(), Ok(method));
    }

    assert_eq!(
        "Bisector".parse::<DefuzzificationMethod>(),
        Err(FisError::UnknownDefuzzificationMethod("Bisector".into()))
    );
    assert_eq!("Mamdani".parse::<InferenceType>(), Ok(InferenceType::Mamdani));
    assert!("Sugeno".parse::<InferenceType>().is_err());
}
