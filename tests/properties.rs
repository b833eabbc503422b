use fuzzy_inference::{combine_sets_with_maximum, FisError, FuzzySet, LinguisticRule, RuleOperator, RuleSpec};
use proptest::prelude::*;

// Dyadic memberships keep 1 - m exact
fn membership() -> impl Strategy<Value = f64> {
    (0u32..=1024).prop_map(|k| f64::from(k) / 1024.)
}

fn sets_on_grid(count: usize) -> impl Strategy<Value = Vec<FuzzySet>> {
    (1usize..24).prop_flat_map(move |len| {
        prop::collection::vec(prop::collection::vec(membership(), len), count).prop_map(|memberships| {
            memberships
                .into_iter()
                .enumerate()
                .map(|(i, ms)| {
                    let points = ms.into_iter().enumerate().map(|(x, m)| (x as f64 * 0.5, m));

                    FuzzySet::from_points(format!("set{i}"), points).unwrap()
                })
                .collect()
        })
    })
}

const KEYWORDS: [&str; 5] = ["IF", "IS", "THEN", "AND", "OR"];

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.éß-]{1,8}".prop_filter("keywords are not names", |name| !KEYWORDS.contains(&name.as_str()))
}

// Mostly keywords, blanks and multi-word names
fn edge_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \tA-Z]{0,4}",
        prop::sample::select(KEYWORDS.to_vec()).prop_map(String::from),
        name(),
    ]
}

fn operator() -> impl Strategy<Value = RuleOperator> {
    prop_oneof![Just(RuleOperator::And), Just(RuleOperator::Or)]
}

fn rule() -> impl Strategy<Value = LinguisticRule> {
    (
        operator(),
        prop::collection::vec((name(), name()), 1..5),
        (name(), name()),
    )
        .prop_map(|(operator, antecedents, consequent)| {
            RuleSpec::new(
                operator,
                antecedents.into_iter().map(|(v, s)| [v, s]),
                [consequent.0, consequent.1],
            )
            .into_rule()
            .unwrap()
        })
}

proptest! {
    #[test]
    fn double_complement_is_identity(sets in sets_on_grid(1)) {
        let set = &sets[0];

        prop_assert_eq!(&set.complement().complement(), set);
    }

    #[test]
    fn aggregating_one_set_is_identity(sets in sets_on_grid(1)) {
        prop_assert_eq!(combine_sets_with_maximum(&sets).unwrap(), Some(sets[0].clone()));
    }

    #[test]
    fn aggregation_is_commutative(sets in sets_on_grid(2)) {
        let ab = combine_sets_with_maximum([&sets[0], &sets[1]]).unwrap().unwrap();
        let ba = combine_sets_with_maximum([&sets[1], &sets[0]]).unwrap().unwrap();

        prop_assert_eq!(ab.values(), ba.values());
    }

    #[test]
    fn aggregation_is_associative(sets in sets_on_grid(3)) {
        let left = combine_sets_with_maximum([&sets[0], &sets[1]]).unwrap().unwrap();
        let left = combine_sets_with_maximum([&left, &sets[2]]).unwrap().unwrap();
        let right = combine_sets_with_maximum([&sets[1], &sets[2]]).unwrap().unwrap();
        let right = combine_sets_with_maximum([&sets[0], &right]).unwrap().unwrap();

        prop_assert_eq!(left.values(), right.values());
    }

    #[test]
    fn strong_cut_is_within_weak_cut(sets in sets_on_grid(1), alpha in membership()) {
        let set = &sets[0];
        let weak = set.alphacut(alpha, false);

        prop_assert!(set.alphacut(alpha, true).iter().all(|x| weak.contains(x)));
    }

    #[test]
    fn pretty_print_round_trips(rule in rule()) {
        prop_assert_eq!(rule.pretty_print().parse::<LinguisticRule>(), Ok(rule));
    }

    #[test]
    fn structured_rules_are_rejected_or_round_trip(
        operator in operator(),
        antecedents in prop::collection::vec((edge_name(), edge_name()), 1..4),
        consequent in (edge_name(), edge_name()),
    ) {
        let spec = RuleSpec::new(
            operator,
            antecedents.into_iter().map(|(v, s)| [v, s]),
            [consequent.0, consequent.1],
        );

        match spec.into_rule() {
            Ok(rule) => prop_assert_eq!(rule.pretty_print().parse::<LinguisticRule>(), Ok(rule)),
            Err(e) => prop_assert!(matches!(e, FisError::RuleMalformed(_)), "{e:?}"),
        }
    }
}
