use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::math::centroid;
use crate::membership::MembershipFunction;
use crate::ops;
use crate::outputs::Outputs;
use crate::report::Report;
use crate::rules::Rule;
use crate::universe::Universe;

/// A Mamdani rule base.
///
/// Rules are conjoined by minimum, rules sharing a consequent label are
/// aggregated by maximum, each consequent is clipped at its aggregated
/// activation and the union of the clipped consequents is defuzzified by
/// its sampled center of gravity.
///
/// Evaluation takes `&self` and builds all intermediate state per call, so
/// identical inputs always give identical outputs and the engine can be
/// shared between threads.
#[derive(Clone, Debug)]
pub struct InferenceEngine<'m, L> {
    rules: Vec<Rule<'m, L>>,
    rule_limit: Option<usize>,
    universe: Universe,
}

impl<'m, L> Default for InferenceEngine<'m, L> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            rule_limit: None,
            universe: Universe::default(),
        }
    }
}

/// Aggregated activation of one consequent label.
struct Aggregate<'m> {
    cap: f64,
    function: &'m MembershipFunction,
}

impl<'m, L: Clone + Ord> InferenceEngine<'m, L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that defuzzifies over `universe` unless told otherwise.
    pub fn with_universe(universe: Universe) -> Self {
        Self {
            universe,
            ..Self::default()
        }
    }

    /// Bounds the number of rules [`add_rule`](Self::add_rule) accepts.
    pub fn with_rule_limit(mut self, limit: usize) -> Self {
        self.rule_limit = Some(limit);
        self
    }

    pub fn add_rule(&mut self, rule: Rule<'m, L>) -> Result<()> {
        if let Some(limit) = self.rule_limit {
            if self.rules.len() >= limit {
                return Err(FuzzyError::CapacityExceeded {
                    store: "rule base",
                    capacity: limit,
                });
            }
        }

        self.rules.push(rule);

        Ok(())
    }

    pub fn rules(&self) -> &[Rule<'m, L>] {
        &self.rules
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// Infers a crisp output for `inputs`, one value per antecedent
    /// position, over the engine's universe.
    pub fn evaluate(&self, inputs: &[f64]) -> Result<Outputs<L>> {
        self.run(inputs, self.universe, &mut ())
    }

    /// Like [`evaluate`](Self::evaluate) but defuzzifies over `universe`.
    pub fn evaluate_in(&self, inputs: &[f64], universe: Universe) -> Result<Outputs<L>> {
        self.run(inputs, universe, &mut ())
    }

    /// Like [`evaluate`](Self::evaluate), passing every intermediate result
    /// to `report`.
    pub fn evaluate_with<R: Report<L>>(&self, inputs: &[f64], mut report: R) -> Result<Outputs<L>> {
        self.run(inputs, self.universe, &mut report)
    }

    fn run<R: Report<L> + ?Sized>(&self, inputs: &[f64], universe: Universe, report: &mut R) -> Result<Outputs<L>> {
        let mut firing_strengths = Vec::with_capacity(self.rules.len());
        let mut aggregates: BTreeMap<&L, Aggregate<'m>> = BTreeMap::new();

        // Fuzzification and implication, aggregated by consequent label
        for (i, rule) in self.rules.iter().enumerate() {
            let (set, label) = rule.consequent().ok_or(FuzzyError::MissingConsequent { rule: i })?;
            let function = set.bound_function()?;
            let strength = rule.firing_strength(inputs)?;

            trace!(rule = i, strength, "rule fired");
            report.rule_fired(i, label, strength);
            firing_strengths.push(strength);

            // Rules sharing a label are expected to share a consequent set;
            // the last one in rule order is the one sampled
            aggregates
                .entry(label)
                .and_modify(|agg| {
                    agg.cap = ops::union([agg.cap, strength]);
                    agg.function = function;
                })
                .or_insert_with(|| Aggregate {
                    cap: ops::union([strength]),
                    function,
                });
        }

        for (label, agg) in &aggregates {
            report.aggregated(label, agg.cap);
        }

        // Defuzzification of the union of clipped consequents
        let crisp = centroid(universe.samples().map(|x| {
            let mu = ops::union(
                aggregates
                    .values()
                    .map(|agg| ops::implication(agg.function.evaluate(x), agg.cap)),
            );

            (x, mu)
        }));

        if crisp.is_none() {
            debug!(rules = self.rules.len(), "aggregated output is empty, nothing to defuzzify");
        }

        report.defuzzified(crisp);
        debug!(rules = self.rules.len(), labels = aggregates.len(), ?crisp, "evaluated rule base");

        let caps = aggregates
            .into_iter()
            .map(|(label, agg)| (label.clone(), agg.cap))
            .collect();

        Ok(Outputs::new(firing_strengths, caps, crisp))
    }
}

#[cfg(test)]
use crate::sets::FuzzySet;

#[test]
fn test_cap_is_max_of_shared_label() {
    let strong = MembershipFunction::triangular(1e9, 0., 0.6).unwrap();
    let weak = MembershipFunction::triangular(1e9, 0., 0.2).unwrap();
    let out = MembershipFunction::triangular(10., 5., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&weak)]).then(FuzzySet::with_function(&out), "C1"))
        .unwrap();
    engine
        .add_rule(Rule::when([FuzzySet::with_function(&strong)]).then(FuzzySet::with_function(&out), "C1"))
        .unwrap();

    let outputs = engine.evaluate(&[0.]).unwrap();

    assert_eq!(outputs.firing_strengths(), [0.2, 0.6]);
    assert_eq!(outputs.cap("C1"), Some(0.6));
    assert_eq!(outputs.caps().len(), 1);
}

#[test]
fn test_caps_iterate_sorted_by_label() {
    let full = MembershipFunction::triangular(1e9, 0., 1.).unwrap();
    let out = MembershipFunction::triangular(10., 5., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    for label in ["C3", "C1", "C2"] {
        engine
            .add_rule(Rule::when([FuzzySet::with_function(&full)]).then(FuzzySet::with_function(&out), label))
            .unwrap();
    }

    let mut seen = Vec::new();

    struct Labels<'a>(&'a mut Vec<&'static str>);

    impl Report<&'static str> for Labels<'_> {
        fn aggregated(&mut self, label: &&'static str, _cap: f64) {
            self.0.push(*label);
        }
    }

    let outputs = engine.evaluate_with(&[0.], Labels(&mut seen)).unwrap();

    assert_eq!(seen, ["C1", "C2", "C3"]);
    assert_eq!(outputs.caps().keys().copied().collect::<Vec<_>>(), ["C1", "C2", "C3"]);
}

#[test]
fn test_evaluations_do_not_share_state() {
    let low = MembershipFunction::triangular(10., 0., 1.).unwrap();
    let out = MembershipFunction::triangular(4., 5., 1.).unwrap();
    let mut engine = InferenceEngine::with_universe(Universe::new(10., 101).unwrap());

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&low)]).then(FuzzySet::with_function(&out), "Out"))
        .unwrap();

    let first = engine.evaluate(&[0.]).unwrap();
    let second = engine.evaluate(&[4.]).unwrap();
    let third = engine.evaluate(&[0.]).unwrap();

    assert_eq!(first.cap("Out"), Some(1.));
    // A carried-over maximum would still read 1
    assert_eq!(second.cap("Out"), Some(0.19999999999999996));
    assert_eq!(first, third);
    assert_eq!(
        first.crisp_output().unwrap().to_bits(),
        third.crisp_output().unwrap().to_bits()
    );
}

#[test]
fn test_no_rule_fires() {
    let low = MembershipFunction::triangular(2., 0., 1.).unwrap();
    let out = MembershipFunction::triangular(4., 5., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&low)]).then(FuzzySet::with_function(&out), "Out"))
        .unwrap();

    let outputs = engine.evaluate(&[50.]).unwrap();

    assert_eq!(outputs.firing_strengths(), [0.]);
    assert_eq!(outputs.cap("Out"), Some(0.));
    assert!(outputs.is_degenerate());
    assert_eq!(outputs.crisp_output(), Err(FuzzyError::DegenerateDefuzzification));
}

#[test]
fn test_empty_engine_is_degenerate() {
    let engine: InferenceEngine<&str> = InferenceEngine::new();
    let outputs = engine.evaluate(&[]).unwrap();

    assert!(outputs.firing_strengths().is_empty());
    assert!(outputs.caps().is_empty());
    assert!(outputs.is_degenerate());
}

#[test]
fn test_rule_limit() {
    let mf = MembershipFunction::bell(1., 0., 1.).unwrap();
    let mut engine = InferenceEngine::new().with_rule_limit(1);

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&mf)]).then(FuzzySet::with_function(&mf), "A"))
        .unwrap();

    assert_eq!(
        engine.add_rule(Rule::when([FuzzySet::with_function(&mf)]).then(FuzzySet::with_function(&mf), "B")),
        Err(FuzzyError::CapacityExceeded {
            store: "rule base",
            capacity: 1
        })
    );
    assert_eq!(engine.rules().len(), 1);
}

#[test]
fn test_evaluation_errors() {
    let mf = MembershipFunction::bell(1., 0., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(
            Rule::when([FuzzySet::with_function(&mf), FuzzySet::with_function(&mf)])
                .then(FuzzySet::with_function(&mf), "A"),
        )
        .unwrap();

    assert_eq!(
        engine.evaluate(&[0.]),
        Err(FuzzyError::ArityMismatch { expected: 2, actual: 1 })
    );

    let mut engine: InferenceEngine<'_, &str> = InferenceEngine::new();

    engine.add_rule(Rule::when([FuzzySet::with_function(&mf)])).unwrap();

    assert_eq!(engine.evaluate(&[0.]), Err(FuzzyError::MissingConsequent { rule: 0 }));

    let mut unbound = FuzzySet::new();
    unbound.set_label("C9");

    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&mf)]).then(unbound, "C9"))
        .unwrap();

    assert_eq!(
        engine.evaluate(&[0.]),
        Err(FuzzyError::UnboundMembershipFunction {
            label: Some("C9".into())
        })
    );
}

#[test]
fn test_evaluate_in_other_universe() {
    let full = MembershipFunction::triangular(1e9, 0., 1.).unwrap();
    let out = MembershipFunction::triangular(10., 5., 1.).unwrap();
    let mut engine = InferenceEngine::new();

    engine
        .add_rule(Rule::when([FuzzySet::with_function(&full)]).then(FuzzySet::with_function(&out), "Out"))
        .unwrap();

    // The default universe [0, 15] holds the whole triangle
    let centered = engine.evaluate(&[0.]).unwrap().crisp_output().unwrap();
    // [0, 6] cuts off the right flank
    let cut = engine
        .evaluate_in(&[0.], Universe::new(6., 61).unwrap())
        .unwrap()
        .crisp_output()
        .unwrap();

    assert!((centered - 5.).abs() < 1e-3);
    assert!(cut < 5.);
}
