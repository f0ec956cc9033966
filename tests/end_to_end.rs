use fuzzy_mamdani::{FuzzyError, FuzzySet, InferenceEngine, MembershipFunction, Rule, Universe};

#[test]
fn test_medium_input_drives_large_output() {
    let low = MembershipFunction::bell(100., 0., 1.).unwrap();
    let med = MembershipFunction::bell(70., 45., 1.).unwrap();
    let high = MembershipFunction::bell(70., 70., 1.).unwrap();
    let small = MembershipFunction::triangular(40., 20., 1.).unwrap();
    let large = MembershipFunction::triangular(40., 80., 1.).unwrap();

    let mut engine = InferenceEngine::with_universe(Universe::new(100., 201).unwrap());

    engine
        .add_rule(Rule::when([FuzzySet::labeled("Low", &low)]).then(FuzzySet::labeled("Small", &small), "Small"))
        .unwrap();
    engine
        .add_rule(Rule::when([FuzzySet::labeled("Med", &med)]).then(FuzzySet::labeled("Large", &large), "Large"))
        .unwrap();
    engine
        .add_rule(Rule::when([FuzzySet::labeled("High", &high)]).then(FuzzySet::labeled("Large", &large), "Large"))
        .unwrap();

    let outputs = engine.evaluate(&[45.]).unwrap();
    let strengths = outputs.firing_strengths();

    assert_eq!(strengths[1], 1.);
    assert!(strengths[0] < 0.1, "{}", strengths[0]);
    assert!(strengths[2] < 0.3, "{}", strengths[2]);
    assert_eq!(outputs.cap("Large"), Some(1.));
    assert_eq!(outputs.cap("Small"), Some(strengths[0]));

    let crisp = outputs.crisp_output().unwrap();

    assert!((crisp - 71.64602178871114).abs() < 1e-9, "{crisp}");
    assert!(crisp > 50.);
}

#[test]
fn test_centroid_converges_to_symmetric_consequent() {
    let trigger = MembershipFunction::triangular(2., 0., 1.).unwrap();
    let target = MembershipFunction::bell(20., 50., 1.).unwrap();
    let elsewhere = MembershipFunction::bell(20., 100., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&trigger)]).then(FuzzySet::with_function(&target), "Target"))
        .unwrap();
    // Never fires for the input below, so its cap stays at zero
    engine
        .add_rule(Rule::when([FuzzySet::with_function(&elsewhere)]).then(FuzzySet::with_function(&elsewhere), "Other"))
        .unwrap();

    let errors: Vec<f64> = [11, 101, 1001]
        .into_iter()
        .map(|resolution| {
            let universe = Universe::new(120., resolution).unwrap();
            let outputs = engine.evaluate_in(&[0.], universe).unwrap();

            assert_eq!(outputs.cap("Target"), Some(1.));
            assert_eq!(outputs.cap("Other"), Some(0.));

            (outputs.crisp_output().unwrap() - 50.).abs()
        })
        .collect();

    assert!(errors[0] > errors[1] && errors[1] > errors[2], "{errors:?}");
    assert!(errors[2] < 1e-3, "{errors:?}");
}

#[test]
fn test_silent_rule_base_reports_degenerate_output() {
    let narrow = MembershipFunction::triangular(1., 10., 1.).unwrap();
    let out = MembershipFunction::bell(4., 5., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&narrow)]).then(FuzzySet::with_function(&out), 0u8))
        .unwrap();
    engine
        .add_rule(Rule::when([FuzzySet::with_function(&narrow)]).then(FuzzySet::with_function(&out), 1u8))
        .unwrap();

    let outputs = engine.evaluate(&[0.]).unwrap();

    assert_eq!(outputs.firing_strengths(), [0., 0.]);
    assert_eq!(outputs.crisp_output(), Err(FuzzyError::DegenerateDefuzzification));
}

#[test]
fn test_repeated_evaluation_is_bit_identical() {
    let a = MembershipFunction::bell(30., 10., 1.).unwrap();
    let b = MembershipFunction::triangular(30., 20., 1.).unwrap();
    let out_a = MembershipFunction::bell(6., 4., 1.).unwrap();
    let out_b = MembershipFunction::triangular(8., 11., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(
            Rule::when([FuzzySet::with_function(&a), FuzzySet::with_function(&b)])
                .then(FuzzySet::with_function(&out_a), "A"),
        )
        .unwrap();
    engine
        .add_rule(
            Rule::when([FuzzySet::with_function(&b), FuzzySet::with_function(&a)])
                .then(FuzzySet::with_function(&out_b), "B"),
        )
        .unwrap();

    let first = engine.evaluate(&[12., 18.]).unwrap();

    // Something different in between must not seed the next call
    engine.evaluate(&[20., 10.]).unwrap();

    let second = engine.evaluate(&[12., 18.]).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.crisp_output().unwrap().to_bits(),
        second.crisp_output().unwrap().to_bits()
    );
}

#[test]
fn test_huge_peaks_still_defuzzify() {
    let huge = MembershipFunction::triangular(1e9, 0., 1e307).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&huge)]).then(FuzzySet::with_function(&huge), "Huge"))
        .unwrap();

    let outputs = engine.evaluate(&[0.]).unwrap();
    let crisp = outputs.crisp_output().unwrap();

    assert_eq!(outputs.firing_strengths(), &[1e307]);
    assert!(!outputs.is_degenerate());
    // Nearly flat over [0, 15]
    assert!((crisp - 7.5).abs() < 1e-6, "{crisp}");

    let tallest = MembershipFunction::triangular(1e9, 0., 1e308).unwrap();
    let out = MembershipFunction::bell(4., 5., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&tallest)]).then(FuzzySet::with_function(&out), "Out"))
        .unwrap();

    let outputs = engine.evaluate(&[0.]).unwrap();

    assert_eq!(outputs.firing_strengths(), &[1e308]);
    assert!((outputs.crisp_output().unwrap() - 5.).abs() < 1e-3);
}

#[test]
fn test_widest_finite_universe_defuzzifies() {
    assert!(matches!(
        Universe::with_range(-1e308..=1e308, 11),
        Err(FuzzyError::InvalidUniverse { .. })
    ));

    let everywhere = MembershipFunction::triangular(1e308, 0., 1.).unwrap();
    let mut engine = InferenceEngine::with_universe(Universe::with_range(-1e307..=1e307, 11).unwrap());

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&everywhere)]).then(FuzzySet::with_function(&everywhere), "All"))
        .unwrap();

    let crisp = engine.evaluate(&[0.]).unwrap().crisp_output().unwrap();

    assert!(crisp.is_finite());
    assert!(crisp.abs() < 1e300, "{crisp}");
}
