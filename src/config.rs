use serde::{Deserialize, Serialize};

/// How a crisp input is looked up in a sampled fuzzy set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridLookup {
    /// The input must be one of the set's sample values
    #[default]
    Exact,
    /// Membership of the closest sample, ties going to the smaller value
    Nearest,
    /// Linear interpolation between the neighbouring samples, clamped at the ends
    Interpolate,
}

/// Result of a Centroid over a set whose memberships are all zero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroHeightPolicy {
    #[default]
    Zero,
    /// Mean of the set's value grid
    Midpoint,
}

/// Solver settings carried by a `FuzzyInferenceSystem`
///
/// ```
/// use fuzzy_inference::{GridLookup, SolverConfig};
///
/// let config: SolverConfig = serde_json::from_str(r#"{ "lookup": "interpolate" }"#).unwrap();
///
/// assert_eq!(config.lookup, GridLookup::Interpolate);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub lookup: GridLookup,
    pub zero_height: ZeroHeightPolicy,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup(mut self, lookup: GridLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn with_zero_height(mut self, zero_height: ZeroHeightPolicy) -> Self {
        self.zero_height = zero_height;
        self
    }
}

#[test]
fn test_defaults() {
    let config = SolverConfig::new();

    assert_eq!(config.lookup, GridLookup::Exact);
    assert_eq!(config.zero_height, ZeroHeightPolicy::Zero);
    assert_eq!(
        config.with_lookup(GridLookup::Nearest).with_zero_height(ZeroHeightPolicy::Midpoint),
        SolverConfig {
            lookup: GridLookup::Nearest,
            zero_height: ZeroHeightPolicy::Midpoint,
        }
    );
}
