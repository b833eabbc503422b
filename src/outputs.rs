use indexmap::IndexMap;

use crate::set::FuzzySet;

/// Result of one solve, per output variable in declaration order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outputs {
    defuzzificated: IndexMap<String, f64>,
    aggregated: IndexMap<String, FuzzySet>,
}

impl Outputs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, variable: &str, aggregated: FuzzySet, crisp: f64) {
        self.defuzzificated.insert(variable.to_owned(), crisp);
        self.aggregated.insert(variable.to_owned(), aggregated);
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.defuzzificated.get(variable).copied()
    }

    /// The clipped rule outputs of `variable` combined into one set
    pub fn aggregated_set(&self, variable: &str) -> Option<&FuzzySet> {
        self.aggregated.get(variable)
    }

    pub fn first(&self) -> Option<(&str, f64)> {
        self.defuzzificated.first().map(|(name, crisp)| (name.as_str(), *crisp))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.defuzzificated.iter().map(|(name, crisp)| (name.as_str(), *crisp))
    }

    pub fn len(&self) -> usize {
        self.defuzzificated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defuzzificated.is_empty()
    }
}
