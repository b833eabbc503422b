use indexmap::IndexMap;

use crate::config::SolverConfig;
use crate::dsl::{parse_rule, RuleSpec};
use crate::error::{EmptyPart, FisError, Result, VariableRole};
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::ops::{DefuzzificationMethod, InferenceType};
use crate::outputs::Outputs;
use crate::rules::LinguisticRule;
use crate::variable::LinguisticVariable;

/// Input and output variables plus the rules relating them.
///
/// All mutation goes through the `add_*`/`remove_*` methods, which return the
/// system for chaining. Solving only reads the system, so a shared reference
/// can be solved from several threads at once.
#[derive(Clone, Debug, Default)]
pub struct FuzzyInferenceSystem {
    name: String,
    inputs: IndexMap<String, LinguisticVariable>,
    outputs: IndexMap<String, LinguisticVariable>,
    rules: Vec<LinguisticRule>,
    config: SolverConfig,
}

impl FuzzyInferenceSystem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_variables(
        name: impl Into<String>,
        inputs: impl IntoIterator<Item = LinguisticVariable>,
        outputs: impl IntoIterator<Item = LinguisticVariable>,
    ) -> Result<Self> {
        let mut fis = Self::new(name);

        for input in inputs {
            fis.add_input(input)?;
        }
        for output in outputs {
            fis.add_output(output)?;
        }

        Ok(fis)
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_config(&mut self, config: SolverConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.inputs.values()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.outputs.values()
    }

    pub fn input(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.get(name)
    }

    pub fn output(&self, name: &str) -> Option<&LinguisticVariable> {
        self.outputs.get(name)
    }

    pub fn rules(&self) -> &[LinguisticRule] {
        &self.rules
    }

    pub fn add_input(&mut self, variable: LinguisticVariable) -> Result<&mut Self> {
        Self::add_variable(&mut self.inputs, variable, VariableRole::Input)?;
        Ok(self)
    }

    pub fn add_output(&mut self, variable: LinguisticVariable) -> Result<&mut Self> {
        Self::add_variable(&mut self.outputs, variable, VariableRole::Output)?;
        Ok(self)
    }

    fn add_variable(
        variables: &mut IndexMap<String, LinguisticVariable>,
        variable: LinguisticVariable,
        role: VariableRole,
    ) -> Result<()> {
        if variables.contains_key(variable.name()) {
            return Err(FisError::DuplicateVariable {
                role,
                name: variable.name().to_owned(),
            });
        }

        tracing::debug!(%role, variable = variable.name(), sets = variable.len(), "adding variable");
        variables.insert(variable.name().to_owned(), variable);

        Ok(())
    }

    /// Does nothing if there is no such input. Rules naming it stay in place
    /// and fail to resolve when solved.
    pub fn remove_input(&mut self, name: &str) -> &mut Self {
        self.inputs.shift_remove(name);
        self
    }

    /// Does nothing if there is no such output
    pub fn remove_output(&mut self, name: &str) -> &mut Self {
        self.outputs.shift_remove(name);
        self
    }

    /// Parses, validates and appends a textual rule
    pub fn add_rule(&mut self, rule: &str) -> Result<&mut Self> {
        let rule = parse_rule(rule)?;

        self.push_rule(rule)
    }

    /// Validates and appends a structured rule
    pub fn add_rule_spec(&mut self, spec: RuleSpec) -> Result<&mut Self> {
        let rule = spec.into_rule()?;

        self.push_rule(rule)
    }

    fn push_rule(&mut self, rule: LinguisticRule) -> Result<&mut Self> {
        self.validate(&rule)?;

        tracing::debug!(system = %self.name, %rule, "adding rule");
        self.rules.push(rule);

        Ok(self)
    }

    /// Every antecedent must name an input set, the consequent an output set
    fn validate(&self, rule: &LinguisticRule) -> Result<()> {
        let exists = |variables: &IndexMap<String, LinguisticVariable>, variable: &str, set: &str| {
            variables.get(variable).is_some_and(|var| var.contains_set(set))
        };

        if !rule
            .antecedents()
            .iter()
            .all(|a| exists(&self.inputs, &a.variable, &a.set))
        {
            return Err(FisError::UnknownAntecedentReference);
        }

        let consequent = rule.consequent();

        if !exists(&self.outputs, &consequent.variable, &consequent.set) {
            return Err(FisError::UnknownConsequentReference {
                variable: consequent.variable.clone(),
                set: consequent.set.clone(),
            });
        }

        Ok(())
    }

    /// Crisp value of the first output variable, in declaration order, that
    /// any rule concludes about
    pub fn solve(&self, inference: InferenceType, args: &Inputs, method: DefuzzificationMethod) -> Result<f64> {
        self.solve_all(inference, args, method)?
            .first()
            .map(|(_, crisp)| crisp)
            .ok_or(FisError::EmptySystem(EmptyPart::Rules))
    }

    /// Crisp value of every output variable some rule concludes about
    pub fn solve_all(&self, inference: InferenceType, args: &Inputs, method: DefuzzificationMethod) -> Result<Outputs> {
        self.check_solvable(args)?;

        tracing::debug!(system = %self.name, ?inference, %method, rules = self.rules.len(), "solving");

        match inference {
            InferenceType::Mamdani => {
                MamdaniInference::new(self.config, method).eval(&self.inputs, &self.outputs, &self.rules, args)
            },
        }
    }

    /// `solve` with the inference type and defuzzification method given by tag,
    /// e.g. `"Mamdani"` and `"Centroid"`
    pub fn solve_tagged(&self, inference: &str, args: &Inputs, method: &str) -> Result<f64> {
        self.solve(inference.parse()?, args, method.parse()?)
    }

    fn check_solvable(&self, args: &Inputs) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(FisError::EmptySystem(EmptyPart::Inputs));
        }
        if self.outputs.is_empty() {
            return Err(FisError::EmptySystem(EmptyPart::Outputs));
        }
        if self.rules.is_empty() {
            return Err(FisError::EmptySystem(EmptyPart::Rules));
        }
        if let Some(missing) = self.inputs.keys().find(|name| !args.contains(name)) {
            return Err(FisError::MissingArgument(missing.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
fn gaussian_variable(name: &str, sets: &[(&str, f64)]) -> LinguisticVariable {
    use crate::linspace::Linspace;
    use crate::set::FuzzySet;

    LinguisticVariable::with_sets(
        name,
        sets.iter().map(|(set, center)| {
            FuzzySet::sample(*set, Linspace::with_step(0., 10., 0.5), |x| {
                (-(x - center).powi(2) / (2. * 1.5f64.powi(2))).exp()
            })
            .unwrap()
        }),
    )
    .unwrap()
}

#[cfg(test)]
fn tipper() -> FuzzyInferenceSystem {
    FuzzyInferenceSystem::with_variables(
        "Tipper",
        [
            gaussian_variable("Service", &[("Poor", 0.), ("Good", 5.)]),
            gaussian_variable("Food", &[("Good", 5.)]),
        ],
        [gaussian_variable("Tip", &[("Good", 5.)])],
    )
    .unwrap()
}

#[test]
fn test_variables() {
    let mut fis = FuzzyInferenceSystem::new("Tipper");

    assert_eq!(fis.name(), "Tipper");
    assert_eq!(fis.inputs().count(), 0);
    assert_eq!(fis.outputs().count(), 0);

    let service = gaussian_variable("Service", &[("Good", 5.)]);

    // The same variable may be used on both sides
    fis.add_input(service.clone()).unwrap().add_output(service.clone()).unwrap();

    assert_eq!(fis.inputs().count(), 1);
    assert_eq!(fis.outputs().count(), 1);
    assert_eq!(
        fis.add_input(service.clone()).unwrap_err(),
        FisError::DuplicateVariable {
            role: VariableRole::Input,
            name: "Service".into()
        }
    );
    assert_eq!(
        fis.add_output(service).unwrap_err().to_string(),
        "An output with the name Service already exists"
    );

    fis.remove_input("Service").remove_input("Nothing").remove_output("Service");

    assert_eq!(fis.inputs().count(), 0);
    assert_eq!(fis.outputs().count(), 0);
}

#[test]
fn test_add_rule() {
    let mut fis = tipper();

    fis.add_rule("IF Service IS Good THEN Tip IS Good")
        .unwrap()
        .add_rule("IF Service IS Good AND Food IS Good THEN Tip IS Good")
        .unwrap();

    assert_eq!(fis.rules()[0].pretty_print(), "IF Service IS Good THEN Tip IS Good");
    assert_eq!(
        fis.rules()[1].pretty_print(),
        "IF Service IS Good AND Food IS Good THEN Tip IS Good"
    );
}

#[test]
fn test_add_rule_errors() {
    let mut fis = tipper();

    assert_eq!(fis.add_rule("IF THEN Tip IS Good").unwrap_err(), FisError::NoAntecedents);
    assert!(matches!(
        fis.add_rule("IF Food IS Good AND Service IS THEN Tip IS Good"),
        Err(FisError::RuleMalformed(_))
    ));
    assert_eq!(
        fis.add_rule("IF Service IS Good THEN Tipx IS Good").unwrap_err(),
        FisError::UnknownConsequentReference {
            variable: "Tipx".into(),
            set: "Good".into()
        }
    );
    assert_eq!(
        fis.add_rule("IF Service IS Great THEN Tip IS Good").unwrap_err(),
        FisError::UnknownAntecedentReference
    );
    assert_eq!(
        fis.add_rule("IF Service IS Good AND Food IS Good AND Drinks IS Good THEN Tip IS Good")
            .unwrap_err(),
        FisError::UnknownAntecedentReference
    );
    // Outputs are not inputs
    assert_eq!(
        fis.add_rule("IF Tip IS Good THEN Tip IS Good").unwrap_err(),
        FisError::UnknownAntecedentReference
    );
    assert!(fis.rules().is_empty());
}

#[test]
fn test_solve_preconditions() {
    let args = Inputs::from([("Service", 5.), ("Food", 5.)]);
    let solve = |fis: &FuzzyInferenceSystem| fis.solve(InferenceType::Mamdani, &args, DefuzzificationMethod::Centroid);
    let mut fis = FuzzyInferenceSystem::new("Tipper");
    let tipper = tipper();
    let service = tipper.input("Service").unwrap().clone();
    let tip = tipper.output("Tip").unwrap().clone();

    assert_eq!(solve(&fis), Err(FisError::EmptySystem(EmptyPart::Inputs)));

    fis.add_input(service).unwrap();
    assert_eq!(solve(&fis), Err(FisError::EmptySystem(EmptyPart::Outputs)));

    fis.add_output(tip).unwrap();
    assert_eq!(solve(&fis), Err(FisError::EmptySystem(EmptyPart::Rules)));

    fis.add_rule("Service IS Good THEN Tip IS Good").unwrap();
    assert!(solve(&fis).is_ok());
}

#[test]
fn test_solve_missing_argument() {
    let mut fis = tipper();

    fis.add_rule("Service IS Good THEN Tip IS Good").unwrap();

    assert_eq!(
        fis.solve(
            InferenceType::Mamdani,
            &Inputs::from([("Service", 5.)]),
            DefuzzificationMethod::Centroid
        ),
        Err(FisError::MissingArgument("Food".into()))
    );
}

#[test]
fn test_solve_tipper() {
    let mut fis = tipper();

    fis.add_rule("Service IS Good THEN Tip IS Good").unwrap();

    let args = Inputs::from([("Service", 5.), ("Food", 5.)]);

    // Service is fully Good, so the Tip set passes through unclipped and peaks at 5
    for method in DefuzzificationMethod::ALL {
        let crisp = fis.solve(InferenceType::Mamdani, &args, method).unwrap();

        assert!((crisp - 5.).abs() < 1e-9, "{method}: {crisp}");
    }

    assert_eq!(fis.solve_tagged("Mamdani", &args, "LargestOfMaxima"), Ok(5.));
    assert_eq!(
        fis.solve_tagged("Mamdani", &args, "Bisector"),
        Err(FisError::UnknownDefuzzificationMethod("Bisector".into()))
    );
    assert_eq!(
        fis.solve_tagged("Sugeno", &args, "Centroid"),
        Err(FisError::UnknownInferenceType("Sugeno".into()))
    );
}

#[test]
fn test_solve_after_removing_input() {
    let mut fis = tipper();

    fis.add_rule("IF Food IS Good THEN Tip IS Good").unwrap();
    fis.remove_input("Food");

    assert_eq!(
        fis.solve(
            InferenceType::Mamdani,
            &Inputs::from([("Service", 5.)]),
            DefuzzificationMethod::Centroid
        ),
        Err(FisError::UnresolvedReference {
            variable: "Food".into(),
            set: "Good".into()
        })
    );
}
