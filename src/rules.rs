use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dsl::{self, RuleSpec};
use crate::error::FisError;
use crate::ops::RuleOperator;

/// A `variable IS set` clause
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proposition {
    pub variable: String,
    pub set: String,
}

impl Proposition {
    pub fn new(variable: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            set: set.into(),
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS {}", self.variable, self.set)
    }
}

pub type Antecedent = Proposition;
pub type Consequent = Proposition;

/// An immutable `IF ... THEN ...` rule.
///
/// Every antecedent is combined with the same operator. A rule with a single
/// antecedent always carries `RuleOperator::Or`, matching how its textual
/// form reads back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleSpec", into = "RuleSpec")]
pub struct LinguisticRule {
    operator: RuleOperator,
    antecedents: Vec<Antecedent>,
    consequent: Consequent,
}

impl LinguisticRule {
    /// Callers guarantee at least one antecedent
    pub(crate) fn new(operator: RuleOperator, antecedents: Vec<Antecedent>, consequent: Consequent) -> Self {
        debug_assert!(!antecedents.is_empty());

        let operator = if antecedents.len() == 1 {
            RuleOperator::Or
        } else {
            operator
        };

        Self {
            operator,
            antecedents,
            consequent,
        }
    }

    pub fn operator(&self) -> RuleOperator {
        self.operator
    }

    pub fn antecedents(&self) -> &[Antecedent] {
        &self.antecedents
    }

    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    /// Canonical textual form, `IF a IS x AND b IS y THEN c IS z`
    pub fn pretty_print(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LinguisticRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IF ")?;

        for (i, antecedent) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operator)?;
            }
            write!(f, "{antecedent}")?;
        }

        write!(f, " THEN {}", self.consequent)
    }
}

/// Syntactic parse only; names are not checked against any system
impl FromStr for LinguisticRule {
    type Err = FisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        dsl::parse_rule(s)
    }
}

#[test]
fn test_pretty_print() {
    let rule = LinguisticRule::new(
        RuleOperator::And,
        vec![Proposition::new("Service", "Good"), Proposition::new("Food", "Good")],
        Proposition::new("Tip", "Good"),
    );

    assert_eq!(rule.pretty_print(), "IF Service IS Good AND Food IS Good THEN Tip IS Good");

    let rule = LinguisticRule::new(
        RuleOperator::Or,
        vec![
            Proposition::new("Service", "Poor"),
            Proposition::new("Food", "Rancid"),
            Proposition::new("Ambience", "Loud"),
        ],
        Proposition::new("Tip", "Cheap"),
    );

    assert_eq!(
        rule.to_string(),
        "IF Service IS Poor OR Food IS Rancid OR Ambience IS Loud THEN Tip IS Cheap"
    );
}

#[test]
fn test_single_antecedent_operator() {
    let rule = LinguisticRule::new(
        RuleOperator::And,
        vec![Proposition::new("Service", "Good")],
        Proposition::new("Tip", "Good"),
    );

    assert_eq!(rule.operator(), RuleOperator::Or);
    assert_eq!(rule.pretty_print().parse::<LinguisticRule>(), Ok(rule));
}
