use std::collections::HashMap;

/// Crisp argument per input variable name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, variable: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(variable.into(), value);
        self
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.0.contains_key(variable)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Inputs(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for Inputs {
    fn from(args: [(K, f64); N]) -> Self {
        args.into_iter().collect()
    }
}

impl From<HashMap<String, f64>> for Inputs {
    fn from(args: HashMap<String, f64>) -> Self {
        Inputs(args)
    }
}

#[test]
fn test_inputs() {
    let mut inputs = Inputs::from([("height", 180.), ("age", 40.)]);

    inputs.add("age", 45.).add("weight", 80.);

    assert_eq!(inputs.get("height"), Some(180.));
    assert_eq!(inputs.get("age"), Some(45.));
    assert!(inputs.contains("weight"));
    assert!(!inputs.contains("Service"));
}
