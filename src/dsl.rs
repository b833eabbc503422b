//! The textual rule language:
//!
//! ```text
//! rule       := "IF" antecedent ("AND" antecedent | "OR" antecedent)* "THEN" consequent
//! antecedent := variableName "IS" setName
//! consequent := variableName "IS" setName
//! ```
//!
//! Keywords only separate names, so the names are read as consecutive
//! pairs and the last pair is the consequent. A rule is either all AND or
//! all OR.

use serde::{Deserialize, Serialize};

use crate::error::{FisError, Result};
use crate::ops::RuleOperator;
use crate::rules::{LinguisticRule, Proposition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keyword {
    If,
    Is,
    Then,
    And,
    Or,
}

impl Keyword {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "IF" => Some(Self::If),
            "IS" => Some(Self::Is),
            "THEN" => Some(Self::Then),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'s> {
    Keyword(Keyword),
    Name(&'s str),
}

fn tokenize(rule: &str) -> impl Iterator<Item = Token<'_>> {
    rule.split_whitespace()
        .map(|token| Keyword::from_token(token).map_or(Token::Name(token), Token::Keyword))
}

/// Parses a textual rule without resolving its names
pub(crate) fn parse_rule(rule: &str) -> Result<LinguisticRule> {
    let mut names = Vec::new();
    let mut has_and = false;
    let mut has_or = false;

    for token in tokenize(rule) {
        match token {
            Token::Name(name) => names.push(name),
            Token::Keyword(Keyword::And) => has_and = true,
            Token::Keyword(Keyword::Or) => has_or = true,
            Token::Keyword(Keyword::If | Keyword::Is | Keyword::Then) => {},
        }
    }

    if has_and && has_or {
        return Err(FisError::RuleMalformed("AND and OR cannot be mixed in one rule".into()));
    }
    if names.is_empty() || names.len() % 2 != 0 {
        return Err(FisError::RuleMalformed(format!(
            "expected variable/set pairs, found {} names",
            names.len()
        )));
    }

    let operator = if has_and { RuleOperator::And } else { RuleOperator::Or };
    let mut pairs: Vec<_> = names.chunks_exact(2).map(|pair| Proposition::new(pair[0], pair[1])).collect();
    let consequent = pairs.pop().ok_or(FisError::NoConsequent)?;

    if pairs.is_empty() {
        return Err(FisError::NoAntecedents);
    }

    Ok(LinguisticRule::new(operator, pairs, consequent))
}

/// Structured form of a rule, as `[variable, set]` lists.
///
/// ```
/// use fuzzy_inference::RuleSpec;
///
/// let spec: RuleSpec = serde_json::from_str(
///     r#"{ "operator": "AND", "antecedents": [["Service", "Good"], ["Food", "Good"]], "consequent": ["Tip", "Good"] }"#,
/// )
/// .unwrap();
///
/// assert_eq!(
///     spec.into_rule().unwrap().to_string(),
///     "IF Service IS Good AND Food IS Good THEN Tip IS Good"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub operator: RuleOperator,
    pub antecedents: Vec<Vec<String>>,
    pub consequent: Vec<String>,
}

impl RuleSpec {
    pub fn new<A, C>(operator: RuleOperator, antecedents: impl IntoIterator<Item = A>, consequent: C) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            operator,
            antecedents: antecedents
                .into_iter()
                .map(|parts| parts.into_iter().map(Into::into).collect())
                .collect(),
            consequent: consequent.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks the part counts and that every name can be written in the
    /// textual form, then builds the rule without resolving names
    pub fn into_rule(self) -> Result<LinguisticRule> {
        if self.antecedents.is_empty() {
            return Err(FisError::NoAntecedents);
        }
        if self.consequent.is_empty() {
            return Err(FisError::NoConsequent);
        }

        let antecedents = self
            .antecedents
            .into_iter()
            .enumerate()
            .map(|(index, parts)| into_proposition(parts).map_err(|found| FisError::AntecedentArity { index, found }))
            .collect::<Result<Vec<_>>>()?;
        let consequent = into_proposition(self.consequent).map_err(|found| FisError::ConsequentArity { found })?;

        for proposition in antecedents.iter().chain(Some(&consequent)) {
            check_name(&proposition.variable)?;
            check_name(&proposition.set)?;
        }

        Ok(LinguisticRule::new(self.operator, antecedents, consequent))
    }
}

/// A name must read back as exactly one non-keyword token
fn check_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "empty name"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else if Keyword::from_token(name).is_some() {
        "name is a keyword"
    } else {
        return Ok(());
    };

    Err(FisError::RuleMalformed(format!("{reason}: {name:?}")))
}

impl TryFrom<RuleSpec> for LinguisticRule {
    type Error = FisError;

    fn try_from(spec: RuleSpec) -> Result<Self> {
        spec.into_rule()
    }
}

impl From<LinguisticRule> for RuleSpec {
    fn from(rule: LinguisticRule) -> Self {
        Self::from(&rule)
    }
}

impl From<&LinguisticRule> for RuleSpec {
    fn from(rule: &LinguisticRule) -> Self {
        let parts = |p: &Proposition| vec![p.variable.clone(), p.set.clone()];

        Self {
            operator: rule.operator(),
            antecedents: rule.antecedents().iter().map(parts).collect(),
            consequent: parts(rule.consequent()),
        }
    }
}

/// `Err` carries the number of parts found
fn into_proposition(parts: Vec<String>) -> std::result::Result<Proposition, usize> {
    match <[String; 2]>::try_from(parts) {
        Ok([variable, set]) => Ok(Proposition { variable, set }),
        Err(parts) => Err(parts.len()),
    }
}

#[test]
fn test_tokenize() {
    assert_eq!(
        tokenize("IF  ISLAND IS\tBig THEN Tip IS Good").collect::<Vec<_>>(),
        vec![
            Token::Keyword(Keyword::If),
            Token::Name("ISLAND"),
            Token::Keyword(Keyword::Is),
            Token::Name("Big"),
            Token::Keyword(Keyword::Then),
            Token::Name("Tip"),
            Token::Keyword(Keyword::Is),
            Token::Name("Good"),
        ]
    );
}

#[test]
fn test_parse_rule() {
    let rule = parse_rule("IF Service IS Good AND Food IS Good THEN Tip IS Good").unwrap();

    assert_eq!(rule.operator(), RuleOperator::And);
    assert_eq!(
        rule.antecedents(),
        &[Proposition::new("Service", "Good"), Proposition::new("Food", "Good")]
    );
    assert_eq!(rule.consequent(), &Proposition::new("Tip", "Good"));

    let rule = parse_rule("IF Service IS Poor OR Food IS Rancid THEN Tip IS Cheap").unwrap();

    assert_eq!(rule.operator(), RuleOperator::Or);

    // IF is optional
    let rule = parse_rule("Service IS Good THEN Tip IS Good").unwrap();

    assert_eq!(rule.antecedents().len(), 1);
}

#[test]
fn test_parse_rule_errors() {
    assert_eq!(parse_rule("IF THEN Tip IS Good"), Err(FisError::NoAntecedents));
    assert!(matches!(
        parse_rule("IF Food IS Good AND Service IS THEN Tip IS Good"),
        Err(FisError::RuleMalformed(_))
    ));
    assert!(matches!(parse_rule("IF Food IS Good THEN Tip IS"), Err(FisError::RuleMalformed(_))));
    assert!(matches!(parse_rule(""), Err(FisError::RuleMalformed(_))));
    assert!(matches!(
        parse_rule("IF A IS x AND B IS y OR C IS z THEN D IS w"),
        Err(FisError::RuleMalformed(_))
    ));
}

#[test]
fn test_rule_spec_arity() {
    let no_antecedents = RuleSpec::new(RuleOperator::And, Vec::<[&str; 2]>::new(), ["Tip", "Good"]);

    assert_eq!(no_antecedents.into_rule(), Err(FisError::NoAntecedents));

    let no_consequent = RuleSpec::new(RuleOperator::And, [["Service", "Good"]], Vec::<&str>::new());

    assert_eq!(no_consequent.into_rule(), Err(FisError::NoConsequent));

    let bad_antecedent = RuleSpec::new(
        RuleOperator::And,
        [vec!["Service", "Good"], vec!["Food"]],
        ["Tip", "Good"],
    );

    assert_eq!(
        bad_antecedent.into_rule(),
        Err(FisError::AntecedentArity { index: 1, found: 1 })
    );

    let bad_consequent = RuleSpec::new(RuleOperator::Or, [["Service", "Good"]], ["Tip", "Good", "Extra"]);

    assert_eq!(bad_consequent.into_rule(), Err(FisError::ConsequentArity { found: 3 }));
}

#[test]
fn test_rule_spec_names() {
    for (variable, set) in [("IS", "Good"), ("Tip", "High Tip"), ("", "Good"), ("Tip", "OR"), ("Tip", "\tGood")] {
        let spec = RuleSpec::new(RuleOperator::And, [["Service", "Good"]], [variable, set]);

        assert!(matches!(spec.into_rule(), Err(FisError::RuleMalformed(_))), "{variable:?} {set:?}");
    }

    let spec = RuleSpec::new(RuleOperator::Or, [["IF", "Good"]], ["Tip", "Good"]);

    assert!(matches!(spec.into_rule(), Err(FisError::RuleMalformed(_))));

    // Keywords are case sensitive, and other punctuation is fine
    let spec = RuleSpec::new(RuleOperator::And, [["is", "Good"], ["Food", "très-bon"]], ["Tip", "High_Tip"]);
    let rule = spec.into_rule().unwrap();

    assert_eq!(rule.pretty_print().parse::<LinguisticRule>(), Ok(rule));
}

#[test]
fn test_rule_deserializes_through_spec() {
    let rule = parse_rule("IF Service IS Good AND Food IS Good THEN Tip IS Good").unwrap();
    let json = serde_json::to_string(&rule).unwrap();

    assert_eq!(serde_json::from_str::<LinguisticRule>(&json).unwrap(), rule);
    assert!(serde_json::from_str::<LinguisticRule>(
        r#"{ "operator": "AND", "antecedents": [["IS", "Good"]], "consequent": ["Tip", "Good"] }"#
    )
    .is_err());
}

#[test]
fn test_rule_spec_round_trip() {
    let rule = parse_rule("IF Service IS Poor OR Food IS Rancid THEN Tip IS Cheap").unwrap();

    assert_eq!(RuleSpec::from(&rule).into_rule(), Ok(rule));
}
