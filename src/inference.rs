use indexmap::IndexMap;

use crate::config::SolverConfig;
use crate::error::{FisError, Result};
use crate::inputs::Inputs;
use crate::ops::{clip, DefuzzificationMethod};
use crate::outputs::Outputs;
use crate::rules::{LinguisticRule, Proposition};
use crate::set::FuzzySet;
use crate::variable::LinguisticVariable;

/// Mamdani min/max inference: antecedents fuzzificated and combined with
/// min (AND) or max (OR), consequents clipped at the rule strength, clipped
/// sets of each output variable aggregated with max, then defuzzificated.
pub struct MamdaniInference {
    config: SolverConfig,
    defuzz_op: DefuzzificationMethod,
}

impl MamdaniInference {
    pub fn new(config: SolverConfig, defuzz_op: DefuzzificationMethod) -> Self {
        Self { config, defuzz_op }
    }

    /// Evaluates `rules` for `args`, producing one crisp value for every output
    /// variable some rule concludes about, in the order of `outputs`
    pub fn eval(
        &self,
        inputs: &IndexMap<String, LinguisticVariable>,
        outputs: &IndexMap<String, LinguisticVariable>,
        rules: &[LinguisticRule],
        args: &Inputs,
    ) -> Result<Outputs> {
        // Clipped consequent sets, grouped by output variable
        let mut rule_outputs: IndexMap<&str, Vec<FuzzySet>> = IndexMap::with_capacity(outputs.len());

        for rule in rules {
            let strength = self.rule_strength(inputs, rule, args)?;
            let consequent = rule.consequent();
            let consequent_set = resolve(outputs, consequent)?;

            tracing::trace!(%rule, strength, "fired rule");

            rule_outputs
                .entry(consequent.variable.as_str())
                .or_default()
                .push(consequent_set.map_memberships(|m| clip(strength, m)));
        }

        let mut results = Outputs::new();

        for name in outputs.keys() {
            let Some(sets) = rule_outputs.get(name.as_str()) else {
                continue;
            };
            let Some(aggregated) = combine_sets_with_maximum(sets)? else {
                continue;
            };
            let aggregated = aggregated.renamed(name);
            let crisp = aggregated.defuzzify_with(self.defuzz_op, self.config.zero_height);

            tracing::debug!(output = %name, crisp, method = %self.defuzz_op, "defuzzificated output");

            results.insert(name, aggregated, crisp);
        }

        Ok(results)
    }

    /// Fuzzificates every antecedent of `rule` and combines the memberships
    fn rule_strength(
        &self,
        inputs: &IndexMap<String, LinguisticVariable>,
        rule: &LinguisticRule,
        args: &Inputs,
    ) -> Result<f64> {
        let memberships = rule
            .antecedents()
            .iter()
            .map(|antecedent| {
                let set = resolve(inputs, antecedent)?;
                let crisp = args
                    .get(&antecedent.variable)
                    .ok_or_else(|| FisError::MissingArgument(antecedent.variable.clone()))?;

                set.membership_at(crisp, self.config.lookup)
            })
            .collect::<Result<Vec<_>>>()?;

        // Rules always carry at least one antecedent
        Ok(rule.operator().call(memberships).unwrap_or(0.))
    }
}

fn resolve<'v>(variables: &'v IndexMap<String, LinguisticVariable>, proposition: &Proposition) -> Result<&'v FuzzySet> {
    variables
        .get(&proposition.variable)
        .and_then(|var| var.set(&proposition.set))
        .ok_or_else(|| FisError::UnresolvedReference {
            variable: proposition.variable.clone(),
            set: proposition.set.clone(),
        })
}

/// Pointwise maximum across `sets`, which must all share one value grid.
///
/// The result carries the first set's name; `None` when there are no sets.
pub fn combine_sets_with_maximum<'s>(sets: impl IntoIterator<Item = &'s FuzzySet>) -> Result<Option<FuzzySet>> {
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return Ok(None);
    };

    sets.try_fold(first.clone(), |agg, set| agg.union(set)).map(Some)
}

#[cfg(test)]
fn grid_set(name: &str, memberships: &[f64]) -> FuzzySet {
    FuzzySet::from_points(name, [1., 2., 3.].into_iter().zip(memberships.iter().copied())).unwrap()
}

#[test]
fn test_combine_single_set() {
    let set = FuzzySet::from_points("One", [(1., 0.)]).unwrap();

    assert_eq!(combine_sets_with_maximum([&set]), Ok(Some(set)));
    assert_eq!(combine_sets_with_maximum(std::iter::empty()), Ok(None));
}

#[test]
fn test_combine_two_sets() {
    let a = FuzzySet::from_points("A", [(1., 0.5)]).unwrap();
    let b = FuzzySet::from_points("B", [(1., 0.)]).unwrap();

    assert_eq!(
        combine_sets_with_maximum([&a, &b]).unwrap().unwrap().memberships(),
        vec![0.5]
    );
}

#[test]
fn test_combine_multiple_sets() {
    let sets = [
        grid_set("A", &[0.5, 0.5, 0.5]),
        grid_set("B", &[0.75, 0.75, 0.25]),
        grid_set("C", &[1., 0., 0.]),
        grid_set("D", &[0., 0., 1.]),
    ];
    let combined = combine_sets_with_maximum(&sets).unwrap().unwrap();

    assert_eq!(combined.universe(), vec![1., 2., 3.]);
    assert_eq!(combined.memberships(), vec![1., 0.75, 1.]);
}

#[test]
fn test_combine_mismatched_grids() {
    let a = grid_set("A", &[0.5, 0.5, 0.5]);
    let b = FuzzySet::from_points("B", [(1., 0.5), (2., 0.5), (4., 0.5)]).unwrap();

    assert_eq!(
        combine_sets_with_maximum([&a, &b]),
        Err(FisError::DomainMismatch {
            left: "A".into(),
            right: "B".into()
        })
    );
}
