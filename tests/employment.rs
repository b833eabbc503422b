use fuzzy_inference::{
    DefuzzificationMethod, FisError, FuzzyInferenceSystem, FuzzySet, GridLookup, InferenceType, Inputs, Linspace,
    LinguisticVariable, SolverConfig,
};

fn variable(name: &str, grid: Linspace, sets: &[(&str, &[f64])]) -> LinguisticVariable {
    LinguisticVariable::with_sets(
        name,
        sets.iter()
            .map(|(set, memberships)| FuzzySet::from_points(*set, grid.clone().zip(memberships.iter().copied())).unwrap()),
    )
    .unwrap()
}

fn employment() -> FuzzyInferenceSystem {
    let height = variable(
        "height",
        Linspace::with_step(150., 200., 10.),
        &[
            ("short", &[1., 0.75, 0.5, 0.25, 0., 0.]),
            ("tall", &[0., 0., 0.25, 0.5, 0.75, 1.]),
        ],
    );
    let age = variable(
        "age",
        Linspace::with_step(20., 70., 10.),
        &[
            ("young", &[1., 0.75, 0.5, 0.25, 0., 0.]),
            ("old", &[0., 0., 0., 0.25, 0.5, 1.]),
        ],
    );
    let salary = variable(
        "salary",
        Linspace::with_step(0., 10., 1.),
        &[
            ("medium", &[0., 0., 0., 0., 1., 1., 1., 0., 0., 0., 0.]),
            ("high", &[0., 0., 0., 0., 0., 0., 0., 0.5, 1., 0.5, 0.]),
        ],
    );
    let mut fis = FuzzyInferenceSystem::new("Employment");

    fis.add_input(height)
        .unwrap()
        .add_input(age)
        .unwrap()
        .add_output(salary)
        .unwrap()
        .add_rule("IF age IS young AND height IS tall THEN salary IS medium")
        .unwrap()
        .add_rule("IF age IS old OR height IS short THEN salary IS high")
        .unwrap();

    fis
}

fn args() -> Inputs {
    Inputs::from([("height", 180.), ("age", 40.)])
}

#[test]
fn test_employment_defuzzification() {
    let fis = employment();
    let solve = |method| fis.solve(InferenceType::Mamdani, &args(), method).unwrap();

    assert_eq!(solve(DefuzzificationMethod::Centroid), 6.);
    assert_eq!(solve(DefuzzificationMethod::MeanOfMaxima), 5.);
    assert_eq!(solve(DefuzzificationMethod::SmallestOfMaxima), 4.);
    assert_eq!(solve(DefuzzificationMethod::LargestOfMaxima), 6.);
}

#[test]
fn test_employment_aggregated_set() {
    let outputs = employment()
        .solve_all(InferenceType::Mamdani, &args(), DefuzzificationMethod::Centroid)
        .unwrap();
    let aggregated = outputs.aggregated_set("salary").unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs.get("salary"), Some(6.));
    assert_eq!(aggregated.name(), "salary");
    assert_eq!(
        aggregated.memberships(),
        vec![0., 0., 0., 0., 0.5, 0.5, 0.5, 0.25, 0.25, 0.25, 0.]
    );
    assert_eq!(aggregated.height(), 0.5);
    assert_eq!(aggregated.alphacut(0.5, false), vec![4., 5., 6.]);
}

#[test]
fn test_employment_is_idempotent() {
    let fis = employment();
    let first = fis.solve(InferenceType::Mamdani, &args(), DefuzzificationMethod::Centroid);

    for _ in 0..5 {
        assert_eq!(fis.solve(InferenceType::Mamdani, &args(), DefuzzificationMethod::Centroid), first);
    }
}

#[test]
fn test_employment_off_grid() {
    let args = Inputs::from([("height", 185.), ("age", 40.)]);
    let fis = employment();

    assert!(matches!(
        fis.solve(InferenceType::Mamdani, &args, DefuzzificationMethod::Centroid),
        Err(FisError::OffGridInput { .. })
    ));

    // tall(185) = 0.625 and short(185) = 0.125, so the rules fire at 0.5 and 0.125
    let fis = employment().with_config(SolverConfig::new().with_lookup(GridLookup::Interpolate));
    let outputs = fis
        .solve_all(InferenceType::Mamdani, &args, DefuzzificationMethod::MeanOfMaxima)
        .unwrap();

    assert_eq!(outputs.get("salary"), Some(5.));
    assert_eq!(
        outputs.aggregated_set("salary").unwrap().memberships(),
        vec![0., 0., 0., 0., 0.5, 0.5, 0.5, 0.125, 0.125, 0.125, 0.]
    );

    // Nearest snaps 185 down to 180
    let fis = employment().with_config(SolverConfig::new().with_lookup(GridLookup::Nearest));

    assert_eq!(
        fis.solve(InferenceType::Mamdani, &args, DefuzzificationMethod::Centroid),
        Ok(6.)
    );
}

#[test]
fn test_employment_is_shareable_across_threads() {
    let fis = &employment();

    std::thread::scope(|scope| {
        let handles: Vec<_> = DefuzzificationMethod::ALL
            .into_iter()
            .map(|method| scope.spawn(move || fis.solve(InferenceType::Mamdani, &args(), method)))
            .collect();
        let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap().unwrap()).collect();

        assert_eq!(results, vec![6., 5., 4., 6.]);
    });
}
