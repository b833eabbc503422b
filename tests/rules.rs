use fuzzy_inference::{
    DefuzzificationMethod, ErrorCode, FisError, FuzzyInferenceSystem, FuzzySet, InferenceType, Inputs,
    LinguisticVariable, RuleOperator, RuleSpec,
};

fn variable(name: &str, sets: &[&str]) -> LinguisticVariable {
    LinguisticVariable::with_sets(
        name,
        sets.iter()
            .map(|set| FuzzySet::from_points(*set, [(0., 0.), (5., 1.), (10., 0.)]).unwrap()),
    )
    .unwrap()
}

fn restaurant() -> FuzzyInferenceSystem {
    FuzzyInferenceSystem::with_variables(
        "Restaurant",
        [variable("Service", &["Poor", "Good"]), variable("Food", &["Rancid", "Good"])],
        [variable("Tip", &["Cheap", "Generous"]), variable("Return", &["No", "Yes"])],
    )
    .unwrap()
}

#[test]
fn test_structured_rule_from_json() {
    let spec: RuleSpec = serde_json::from_str(
        r#"{
            "operator": "OR",
            "antecedents": [["Service", "Poor"], ["Food", "Rancid"]],
            "consequent": ["Tip", "Cheap"]
        }"#,
    )
    .unwrap();
    let mut fis = restaurant();

    fis.add_rule_spec(spec).unwrap();

    assert_eq!(
        fis.rules()[0].pretty_print(),
        "IF Service IS Poor OR Food IS Rancid THEN Tip IS Cheap"
    );
}

#[test]
fn test_structured_rule_errors() {
    let mut fis = restaurant();

    let err = fis
        .add_rule_spec(RuleSpec::new(RuleOperator::And, [vec!["Service"]], ["Tip", "Cheap"]))
        .unwrap_err();

    assert_eq!(err, FisError::AntecedentArity { index: 0, found: 1 });
    assert_eq!(err.code(), ErrorCode::AntecedentArity);

    let err = fis
        .add_rule_spec(RuleSpec::new(
            RuleOperator::And,
            [["Service", "Poor"], ["Food", "Burnt"]],
            ["Tip", "Cheap"],
        ))
        .unwrap_err();

    assert_eq!(err, FisError::UnknownAntecedentReference);

    let err = fis
        .add_rule_spec(RuleSpec::new(RuleOperator::And, [["Service", "Poor"]], ["Service", "Poor"]))
        .unwrap_err();

    assert_eq!(
        err,
        FisError::UnknownConsequentReference {
            variable: "Service".into(),
            set: "Poor".into()
        }
    );
    assert!(fis.rules().is_empty());
}

#[test]
fn test_unknown_antecedent_regardless_of_valid_ones() {
    let mut fis = restaurant();

    for rule in [
        "IF Drinks IS Good THEN Tip IS Generous",
        "IF Service IS Good AND Drinks IS Good THEN Tip IS Generous",
        "IF Service IS Good AND Food IS Good AND Food IS Cold THEN Tip IS Generous",
        "IF Drinks IS Good OR Ambience IS Loud THEN Tip IS Generous",
    ] {
        assert_eq!(fis.add_rule(rule).unwrap_err(), FisError::UnknownAntecedentReference, "{rule}");
    }
}

#[test]
fn test_keywords_match_whole_tokens() {
    let mut fis = FuzzyInferenceSystem::with_variables(
        "Islands",
        [variable("ISLAND", &["ORANGE"])],
        [variable("THENCE", &["ANDES"])],
    )
    .unwrap();

    fis.add_rule("IF ISLAND IS ORANGE THEN THENCE IS ANDES").unwrap();

    assert_eq!(fis.rules()[0].antecedents()[0].variable, "ISLAND");
    assert_eq!(fis.rules()[0].operator(), RuleOperator::Or);
}

#[test]
fn test_solve_every_referenced_output() {
    let mut fis = restaurant();

    fis.add_rule("IF Service IS Good AND Food IS Good THEN Tip IS Generous")
        .unwrap()
        .add_rule("IF Food IS Good THEN Return IS Yes")
        .unwrap();

    let args = Inputs::from([("Service", 5.), ("Food", 5.)]);
    let outputs = fis
        .solve_all(InferenceType::Mamdani, &args, DefuzzificationMethod::MeanOfMaxima)
        .unwrap();

    assert_eq!(outputs.iter().collect::<Vec<_>>(), vec![("Tip", 5.), ("Return", 5.)]);
    assert_eq!(
        fis.solve(InferenceType::Mamdani, &args, DefuzzificationMethod::MeanOfMaxima),
        Ok(5.)
    );

    // Return comes first once only it is concluded about
    let mut fis = restaurant();

    fis.add_rule("IF Food IS Good THEN Return IS Yes").unwrap();

    let outputs = fis
        .solve_all(InferenceType::Mamdani, &args, DefuzzificationMethod::Centroid)
        .unwrap();

    assert_eq!(outputs.first(), Some(("Return", 5.)));
    assert_eq!(outputs.get("Tip"), None);
}

#[test]
fn test_mismatched_consequent_grids() {
    let tip = LinguisticVariable::with_sets(
        "Tip",
        [
            FuzzySet::from_points("Cheap", [(0., 1.), (10., 0.)]).unwrap(),
            FuzzySet::from_points("Generous", [(0., 0.), (5., 0.5), (10., 1.)]).unwrap(),
        ],
    )
    .unwrap();
    let mut fis = FuzzyInferenceSystem::with_variables("Uneven", [variable("Service", &["Poor", "Good"])], [tip]).unwrap();

    fis.add_rule("IF Service IS Poor THEN Tip IS Cheap")
        .unwrap()
        .add_rule("IF Service IS Good THEN Tip IS Generous")
        .unwrap();

    assert_eq!(
        fis.solve(
            InferenceType::Mamdani,
            &Inputs::from([("Service", 5.)]),
            DefuzzificationMethod::Centroid
        ),
        Err(FisError::DomainMismatch {
            left: "Cheap".into(),
            right: "Generous".into()
        })
    );
}
