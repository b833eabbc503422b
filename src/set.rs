use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::{GridLookup, ZeroHeightPolicy};
use crate::error::{FisError, Result};
use crate::math::{interp, nearest_index, zip_with};
use crate::ops::DefuzzificationMethod;

/// One sample of a membership function
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FuzzyValue {
    pub value: f64,
    pub membership: f64,
}

impl FuzzyValue {
    pub fn new(value: f64, membership: f64) -> Self {
        Self { value, membership }
    }
}

impl From<(f64, f64)> for FuzzyValue {
    fn from((value, membership): (f64, f64)) -> Self {
        Self { value, membership }
    }
}

/// A named, discretized membership function.
///
/// Samples are kept sorted by `value` with no duplicate values. None of the
/// algebra below mutates the receiver; every operation returns a new set.
/// Deserialized sets go through the same checks as `with_values`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFuzzySet")]
pub struct FuzzySet {
    name: String,
    values: Vec<FuzzyValue>,
}

#[derive(Deserialize)]
struct RawFuzzySet {
    name: String,
    #[serde(default)]
    values: Vec<FuzzyValue>,
}

impl TryFrom<RawFuzzySet> for FuzzySet {
    type Error = FisError;

    fn try_from(raw: RawFuzzySet) -> Result<Self> {
        Self::with_values(raw.name, raw.values)
    }
}

impl FuzzySet {
    /// An empty set, to be filled with `set_values`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// A set over precomputed samples, which must already be sorted by value
    pub fn with_values(name: impl Into<String>, values: Vec<FuzzyValue>) -> Result<Self> {
        let mut set = Self::new(name);

        set.set_values(values)?;

        Ok(set)
    }

    /// A set over `(value, membership)` pairs in any order
    pub fn from_points(name: impl Into<String>, points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let mut values: Vec<FuzzyValue> = points.into_iter().map(FuzzyValue::from).collect();

        values.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));

        Self::with_values(name, values)
    }

    /// Evaluates `membership` on every point of `grid`, clamping into [0, 1]
    pub fn sample(
        name: impl Into<String>,
        grid: impl IntoIterator<Item = f64>,
        membership: impl Fn(f64) -> f64,
    ) -> Result<Self> {
        Self::from_points(
            name,
            grid.into_iter().map(|x| (x, membership(x).clamp(0., 1.))),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[FuzzyValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces the samples, rejecting unsorted or duplicate values and
    /// memberships outside [0, 1].
    ///
    /// Samples may be replaced any number of times; the name never changes.
    /// Sets already held by a `LinguisticVariable` are only reachable through
    /// shared references, so a system's sets cannot be resampled in place.
    pub fn set_values(&mut self, values: Vec<FuzzyValue>) -> Result<()> {
        let invalid = |reason: String| FisError::InvalidFuzzySet {
            name: self.name.clone(),
            reason,
        };

        if let Some(sample) = values
            .iter()
            .find(|v| v.value.is_nan() || !(0. ..=1.).contains(&v.membership))
        {
            return Err(invalid(format!(
                "sample ({}, {}) is outside the unit interval",
                sample.value, sample.membership
            )));
        }
        if let Some(window) = values.windows(2).find(|w| w[0].value >= w[1].value) {
            return Err(invalid(format!(
                "values {} and {} are not strictly ascending",
                window[0].value, window[1].value
            )));
        }

        self.values = values;

        Ok(())
    }

    pub fn universe(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.value).collect()
    }

    pub fn memberships(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.membership).collect()
    }

    /// Values with a membership above zero
    pub fn support(&self) -> Vec<f64> {
        self.values.iter().filter(|v| v.membership > 0.).map(|v| v.value).collect()
    }

    /// Largest membership, zero for an empty set
    pub fn height(&self) -> f64 {
        self.values.iter().map(|v| v.membership).fold(0., f64::max)
    }

    pub fn is_normal(&self) -> bool {
        self.height() == 1.
    }

    pub fn complement(&self) -> FuzzySet {
        self.map_memberships(|m| 1. - m)
    }

    pub fn union(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.zip_memberships(other, f64::max)
    }

    pub fn intersection(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.zip_memberships(other, f64::min)
    }

    /// Values whose membership is at least `alpha`, or strictly above it for a strong cut
    pub fn alphacut(&self, alpha: f64, strong: bool) -> Vec<f64> {
        self.values
            .iter()
            .filter(|v| if strong { v.membership > alpha } else { v.membership >= alpha })
            .map(|v| v.value)
            .collect()
    }

    /// Whether both sets are sampled at exactly the same values
    pub fn same_grid(&self, other: &FuzzySet) -> bool {
        self.values.len() == other.values.len()
            && self.values.iter().zip(&other.values).all(|(a, b)| a.value == b.value)
    }

    /// Membership of a value that lies exactly on the grid
    pub fn membership(&self, x: f64) -> Result<f64> {
        self.membership_at(x, GridLookup::Exact)
    }

    pub fn membership_at(&self, x: f64, lookup: GridLookup) -> Result<f64> {
        let off_grid = || FisError::OffGridInput {
            set: self.name.clone(),
            value: x,
        };

        match lookup {
            GridLookup::Exact => self
                .values
                .binary_search_by(|v| v.value.partial_cmp(&x).unwrap_or(Ordering::Less))
                .map(|i| self.values[i].membership)
                .map_err(|_| off_grid()),
            GridLookup::Nearest => nearest_index(x, self.values.iter().map(|v| v.value))
                .map(|i| self.values[i].membership)
                .ok_or_else(off_grid),
            GridLookup::Interpolate => {
                let coords: Vec<_> = self.values.iter().map(|v| (v.value, v.membership)).collect();

                interp(x, &coords).ok_or_else(off_grid)
            },
        }
    }

    pub fn defuzzify(&self, method: DefuzzificationMethod) -> f64 {
        self.defuzzify_with(method, ZeroHeightPolicy::Zero)
    }

    pub fn defuzzify_with(&self, method: DefuzzificationMethod, zero_height: ZeroHeightPolicy) -> f64 {
        let universe = self.universe();

        match method.call(&universe, &self.memberships()) {
            Some(crisp) => crisp,
            None if universe.is_empty() => 0.,
            None => {
                tracing::warn!(set = %self.name, %method, "defuzzificating a set of zero height");

                match zero_height {
                    ZeroHeightPolicy::Zero => 0.,
                    ZeroHeightPolicy::Midpoint => universe.iter().sum::<f64>() / universe.len() as f64,
                }
            },
        }
    }

    pub(crate) fn renamed(self, name: &str) -> FuzzySet {
        FuzzySet {
            name: name.to_owned(),
            values: self.values,
        }
    }

    /// Same grid and name, each membership passed through `op`
    pub(crate) fn map_memberships(&self, op: impl Fn(f64) -> f64) -> FuzzySet {
        FuzzySet {
            name: self.name.clone(),
            values: self
                .values
                .iter()
                .map(|v| FuzzyValue::new(v.value, op(v.membership)))
                .collect(),
        }
    }

    fn zip_memberships(&self, other: &FuzzySet, op: impl Fn(f64, f64) -> f64) -> Result<FuzzySet> {
        if !self.same_grid(other) {
            return Err(FisError::DomainMismatch {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }

        let memberships = zip_with(&self.memberships(), &other.memberships(), op);

        Ok(FuzzySet {
            name: self.name.clone(),
            values: self
                .values
                .iter()
                .zip(memberships)
                .map(|(v, m)| FuzzyValue::new(v.value, m))
                .collect(),
        })
    }
}

#[cfg(test)]
fn tall() -> FuzzySet {
    FuzzySet::from_points("Tall", [(150., 0.), (160., 0.), (170., 0.25), (180., 0.5), (190., 0.75), (200., 1.)]).unwrap()
}

#[cfg(test)]
fn short() -> FuzzySet {
    FuzzySet::from_points("Short", [(150., 1.), (160., 0.75), (170., 0.5), (180., 0.25), (190., 0.), (200., 0.)]).unwrap()
}

#[test]
fn test_support_height_normal() {
    let tall = tall();

    assert_eq!(tall.support(), vec![170., 180., 190., 200.]);
    assert_eq!(tall.height(), 1.);
    assert!(tall.is_normal());

    let flat = tall.map_memberships(|m| m / 2.);

    assert_eq!(flat.height(), 0.5);
    assert!(!flat.is_normal());

    let empty = FuzzySet::new("Empty");

    assert_eq!(empty.height(), 0.);
    assert!(empty.support().is_empty());
}

#[test]
fn test_complement() {
    let tall = tall();
    let not_tall = tall.complement();

    assert_eq!(not_tall.name(), "Tall");
    assert_eq!(not_tall.memberships(), vec![1., 1., 0.75, 0.5, 0.25, 0.]);
    assert_eq!(not_tall.universe(), tall.universe());
    assert_eq!(not_tall.complement(), tall);
}

#[test]
fn test_union_intersection() {
    let tall = tall();
    let short = short();

    assert_eq!(tall.union(&short).unwrap().memberships(), vec![1., 0.75, 0.5, 0.5, 0.75, 1.]);
    assert_eq!(
        tall.intersection(&short).unwrap().memberships(),
        vec![0., 0., 0.25, 0.25, 0., 0.]
    );
}

#[test]
fn test_domain_mismatch() {
    let tall = tall();
    let shorter_grid = FuzzySet::from_points("Short", [(150., 1.), (160., 0.5)]).unwrap();
    let shifted_grid = FuzzySet::sample("Shifted", [151., 160., 170., 180., 190., 200.], |_| 0.5).unwrap();

    assert_eq!(
        tall.union(&shorter_grid),
        Err(FisError::DomainMismatch {
            left: "Tall".into(),
            right: "Short".into()
        })
    );
    assert!(tall.intersection(&shifted_grid).is_err());
}

#[test]
fn test_alphacut() {
    let tall = tall();

    assert_eq!(tall.alphacut(0.5, false), vec![180., 190., 200.]);
    assert_eq!(tall.alphacut(0.5, true), vec![190., 200.]);
    assert_eq!(tall.alphacut(0., false).len(), 6);
    assert_eq!(tall.alphacut(1., true), Vec::<f64>::new());
}

#[test]
fn test_membership_lookup() {
    let tall = tall();

    assert_eq!(tall.membership(180.), Ok(0.5));
    assert_eq!(
        tall.membership(185.),
        Err(FisError::OffGridInput {
            set: "Tall".into(),
            value: 185.
        })
    );
    assert_eq!(tall.membership_at(184., GridLookup::Nearest), Ok(0.5));
    assert_eq!(tall.membership_at(185., GridLookup::Nearest), Ok(0.5));
    assert_eq!(tall.membership_at(185., GridLookup::Interpolate), Ok(0.625));
    assert_eq!(tall.membership_at(240., GridLookup::Interpolate), Ok(1.));
    assert!(FuzzySet::new("Empty").membership_at(1., GridLookup::Nearest).is_err());
}

#[test]
fn test_nan_lookup() {
    let set = FuzzySet::from_points("Ramp", [(0., 0.), (1., 0.5), (2., 1.)]).unwrap();

    for lookup in [GridLookup::Exact, GridLookup::Nearest, GridLookup::Interpolate] {
        assert!(
            matches!(set.membership_at(f64::NAN, lookup), Err(FisError::OffGridInput { .. })),
            "{lookup:?}"
        );
    }
}

#[test]
fn test_invalid_values() {
    assert!(FuzzySet::from_points("Dup", [(1., 0.), (1., 1.)]).is_err());
    assert!(FuzzySet::from_points("Range", [(1., 1.5)]).is_err());
    assert!(FuzzySet::with_values("Unsorted", vec![FuzzyValue::new(2., 0.), FuzzyValue::new(1., 0.)]).is_err());

    let mut set = FuzzySet::new("Late");

    assert!(set.is_empty());
    set.set_values(vec![FuzzyValue::new(0., 0.), FuzzyValue::new(1., 1.)]).unwrap();
    assert_eq!(set.len(), 2);

    // A rejected reassignment leaves the previous samples alone
    assert!(set.set_values(vec![FuzzyValue::new(0., 2.)]).is_err());
    assert_eq!(set.memberships(), vec![0., 1.]);

    set.set_values(vec![FuzzyValue::new(5., 0.5)]).unwrap();
    assert_eq!(set.name(), "Late");
    assert_eq!(set.universe(), vec![5.]);
}

#[test]
fn test_deserialize_validates() {
    let set: FuzzySet = serde_json::from_str(
        r#"{ "name": "Tall", "values": [{ "value": 1.0, "membership": 0.0 }, { "value": 2.0, "membership": 1.0 }] }"#,
    )
    .unwrap();

    assert_eq!(set.membership(2.), Ok(1.));
    assert_eq!(serde_json::from_str::<FuzzySet>(&serde_json::to_string(&set).unwrap()).unwrap(), set);
    assert_eq!(serde_json::from_str::<FuzzySet>(r#"{ "name": "Empty" }"#).unwrap().len(), 0);

    for values in [
        r#"[{ "value": 0.0, "membership": 7.5 }]"#,
        r#"[{ "value": 3.0, "membership": 0.0 }, { "value": 1.0, "membership": 0.0 }, { "value": 2.0, "membership": 0.0 }]"#,
        r#"[{ "value": 1.0, "membership": 0.0 }, { "value": 1.0, "membership": 0.5 }]"#,
    ] {
        let json = format!(r#"{{ "name": "Bad", "values": {values} }}"#);

        assert!(serde_json::from_str::<FuzzySet>(&json).is_err(), "{values}");
    }
}

#[test]
fn test_defuzzify_zero_height() {
    let zero = FuzzySet::sample("Zero", [2., 4., 6.], |_| 0.).unwrap();

    assert_eq!(zero.defuzzify(DefuzzificationMethod::Centroid), 0.);
    assert_eq!(
        zero.defuzzify_with(DefuzzificationMethod::Centroid, ZeroHeightPolicy::Midpoint),
        4.
    );
    assert_eq!(zero.defuzzify(DefuzzificationMethod::LargestOfMaxima), 6.);
    assert_eq!(FuzzySet::new("Empty").defuzzify(DefuzzificationMethod::MeanOfMaxima), 0.);
}
