use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FisError, Result};
use crate::set::FuzzySet;

/// A named collection of fuzzy sets over one measured quantity.
///
/// Sets iterate in insertion order and are looked up by name. All sets of a
/// variable are expected to share one value grid; this is not checked here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinguisticVariable")]
pub struct LinguisticVariable {
    name: String,
    sets: IndexMap<String, FuzzySet>,
}

#[derive(Deserialize)]
struct RawLinguisticVariable {
    name: String,
    #[serde(default)]
    sets: IndexMap<String, FuzzySet>,
}

/// Each set must be filed under its own name
impl TryFrom<RawLinguisticVariable> for LinguisticVariable {
    type Error = FisError;

    fn try_from(raw: RawLinguisticVariable) -> Result<Self> {
        if let Some((key, set)) = raw.sets.iter().find(|(key, set)| *key != set.name()) {
            return Err(FisError::InvalidFuzzySet {
                name: set.name().to_owned(),
                reason: format!("filed under {key:?} in variable {}", raw.name),
            });
        }

        Self::with_sets(raw.name, raw.sets.into_values())
    }
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: IndexMap::new(),
        }
    }

    /// A variable over `sets`, failing on the first repeated set name
    pub fn with_sets(name: impl Into<String>, sets: impl IntoIterator<Item = FuzzySet>) -> Result<Self> {
        sets.into_iter().try_fold(Self::new(name), |mut var, set| {
            var.add_set(set)?;
            Ok(var)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_set(&mut self, set: FuzzySet) -> Result<&mut Self> {
        if self.sets.contains_key(set.name()) {
            return Err(FisError::DuplicateSet(set.name().to_owned()));
        }

        self.sets.insert(set.name().to_owned(), set);

        Ok(self)
    }

    pub fn get_set(&self, name: &str) -> Result<&FuzzySet> {
        self.sets.get(name).ok_or_else(|| FisError::NoSuchSet(name.to_owned()))
    }

    pub(crate) fn set(&self, name: &str) -> Option<&FuzzySet> {
        self.sets.get(name)
    }

    pub fn contains_set(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    pub fn sets(&self) -> impl Iterator<Item = &FuzzySet> {
        self.sets.values()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
fn service() -> LinguisticVariable {
    let grid = [0., 2.5, 5., 7.5, 10.];

    LinguisticVariable::with_sets(
        "Service",
        [
            FuzzySet::sample("Poor", grid, |x| 1. - x / 5.).unwrap(),
            FuzzySet::sample("Good", grid, |x| x / 10.).unwrap(),
        ],
    )
    .unwrap()
}

#[test]
fn test_add_and_get_sets() {
    let mut service = service();

    assert_eq!(service.name(), "Service");
    assert_eq!(service.len(), 2);
    assert_eq!(service.get_set("Good").unwrap().membership(5.), Ok(0.5));
    assert_eq!(service.get_set("Poor").unwrap().membership(7.5), Ok(0.));

    service
        .add_set(FuzzySet::sample("Excellent", [0., 2.5, 5., 7.5, 10.], |x| (x - 7.5) / 2.5).unwrap())
        .unwrap();

    assert!(service.contains_set("Excellent"));
    assert_eq!(
        service.sets().map(FuzzySet::name).collect::<Vec<_>>(),
        vec!["Poor", "Good", "Excellent"]
    );
}

#[test]
fn test_duplicate_and_missing_sets() {
    let mut service = service();

    assert_eq!(
        service.add_set(FuzzySet::new("Good")).unwrap_err(),
        FisError::DuplicateSet("Good".into())
    );
    assert_eq!(service.len(), 2);
    assert_eq!(service.get_set("Great").unwrap_err(), FisError::NoSuchSet("Great".into()));
    assert!(LinguisticVariable::with_sets("Twice", [FuzzySet::new("A"), FuzzySet::new("A")]).is_err());
}

#[test]
fn test_deserialize_checks_set_names() {
    let service = service();
    let json = serde_json::to_string(&service).unwrap();

    assert_eq!(serde_json::from_str::<LinguisticVariable>(&json).unwrap(), service);

    let misfiled = r#"{ "name": "Service", "sets": { "Good": { "name": "Poor", "values": [] } } }"#;

    assert!(matches!(
        LinguisticVariable::try_from(serde_json::from_str::<RawLinguisticVariable>(misfiled).unwrap()),
        Err(FisError::InvalidFuzzySet { .. })
    ));
    assert!(serde_json::from_str::<LinguisticVariable>(misfiled).is_err());

    let bad_set = r#"{ "name": "Service", "sets": { "Good": { "name": "Good", "values": [{ "value": 0.0, "membership": -1.0 }] } } }"#;

    assert!(serde_json::from_str::<LinguisticVariable>(bad_set).is_err());
}
