//! Nine-rule controller: rainfall (x0) and body temperature (x1) select one
//! of two remedies, defuzzified over the default universe [0, 15].

use std::sync::Mutex;
use std::thread;

use fuzzy_mamdani::{FuzzyError, InferenceEngine, Key, MembershipFunction, Report, Rule, Terms, TracingReport};

#[derive(Clone, Copy, Debug, Key)]
enum Rainfall {
    Light,
    Moderate,
    Heavy,
}

#[derive(Clone, Copy, Debug, Key)]
enum Temperature {
    Normal,
    Raised,
    Fever,
}

#[derive(Clone, Copy, Debug, Eq, Key, Ord, PartialEq, PartialOrd)]
enum Remedy {
    C1,
    C2,
}

struct Fixture {
    rainfall: Terms<Rainfall>,
    temperature: Terms<Temperature>,
    remedy: Terms<Remedy>,
}

impl Fixture {
    fn new() -> Self {
        let mut rainfall = Terms::new();
        let mut temperature = Terms::new();
        let mut remedy = Terms::new();

        rainfall.insert(Rainfall::Light, MembershipFunction::bell(100., 0., 1.).unwrap());
        rainfall.insert(Rainfall::Moderate, MembershipFunction::bell(70., 45., 1.).unwrap());
        rainfall.insert(Rainfall::Heavy, MembershipFunction::bell(70., 70., 1.).unwrap());
        temperature.insert(Temperature::Normal, MembershipFunction::bell(7., 36.5, 1.).unwrap());
        temperature.insert(Temperature::Raised, MembershipFunction::bell(7., 39., 1.).unwrap());
        temperature.insert(Temperature::Fever, MembershipFunction::bell(7., 41., 1.).unwrap());
        remedy.insert(Remedy::C1, MembershipFunction::bell(18., 0., 1.).unwrap());
        remedy.insert(Remedy::C2, MembershipFunction::bell(22., 15., 1.).unwrap());

        Fixture {
            rainfall,
            temperature,
            remedy,
        }
    }

    fn engine(&self) -> InferenceEngine<'_, Remedy> {
        use Rainfall::*;
        use Remedy::*;
        use Temperature::*;

        let table = [
            (Light, Normal, C1),
            (Light, Raised, C1),
            (Light, Fever, C2),
            (Moderate, Normal, C1),
            (Moderate, Raised, C1),
            (Moderate, Fever, C2),
            (Heavy, Normal, C2),
            (Heavy, Raised, C2),
            (Heavy, Fever, C2),
        ];
        let mut engine = InferenceEngine::new().with_rule_limit(table.len());

        for (rain, temp, remedy) in table {
            let mut rule = Rule::new(2);

            rule.add_antecedent(self.rainfall.set(rain)).unwrap();
            rule.add_antecedent(self.temperature.set(temp)).unwrap();
            rule.set_consequent(self.remedy.set(remedy), remedy);
            engine.add_rule(rule).unwrap();
        }

        engine
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[test]
fn test_moderate_rain_normal_temperature() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let outputs = engine.evaluate(&[40., 36.5]).unwrap();
    let expected = [
        0.18982527265549748,
        0.18982527265549748,
        0.,
        0.9598027825505675,
        0.2940602650767695,
        0.,
        0.12725468356715458,
        0.12725468356715458,
        0.,
    ];

    assert_eq!(outputs.firing_strengths().len(), expected.len());

    for (actual, expected) in outputs.firing_strengths().iter().zip(expected) {
        assert_close(*actual, expected);
    }

    assert_close(outputs.cap(&Remedy::C1).unwrap(), 0.9598027825505675);
    assert_close(outputs.cap(&Remedy::C2).unwrap(), 0.12725468356715458);
    assert_close(outputs.crisp_output().unwrap(), 4.238360707349372);
}

#[test]
fn test_heavy_rain_fever() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let outputs = engine.evaluate(&[70., 41.]).unwrap();

    assert_eq!(outputs.firing_strength(8), Some(1.));
    assert_close(outputs.cap(&Remedy::C1).unwrap(), 0.2940602650767695);
    assert_eq!(outputs.cap(&Remedy::C2), Some(1.));
    assert_close(outputs.crisp_output().unwrap(), 9.568038996611955);
}

#[test]
fn test_out_of_range_inputs_are_degenerate() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let outputs = engine.evaluate(&[200., 100.]).unwrap();

    assert!(outputs.firing_strengths().iter().all(|s| *s == 0.));
    assert_eq!(outputs.crisp_output(), Err(FuzzyError::DegenerateDefuzzification));
}

#[test]
fn test_rule_base_is_full() {
    let fixture = Fixture::new();
    let mut engine = fixture.engine();
    let extra = Rule::when([fixture.rainfall.set(Rainfall::Light)]).then(fixture.remedy.set(Remedy::C1), Remedy::C1);

    assert_eq!(
        engine.add_rule(extra),
        Err(FuzzyError::CapacityExceeded {
            store: "rule base",
            capacity: 9
        })
    );
}

#[derive(Default)]
struct Transcript {
    fired: Vec<(usize, Remedy, f64)>,
    aggregated: Vec<(Remedy, f64)>,
    crisp: Option<Option<f64>>,
}

impl Report<Remedy> for Transcript {
    fn rule_fired(&mut self, rule: usize, label: &Remedy, strength: f64) {
        self.fired.push((rule, *label, strength));
    }

    fn aggregated(&mut self, label: &Remedy, cap: f64) {
        self.aggregated.push((*label, cap));
    }

    fn defuzzified(&mut self, crisp: Option<f64>) {
        self.crisp = Some(crisp);
    }
}

#[test]
fn test_report_sees_every_step() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let mut transcript = Transcript::default();
    let outputs = engine.evaluate_with(&[40., 36.5], &mut transcript).unwrap();

    assert_eq!(transcript.fired.len(), 9);
    assert_eq!(
        transcript.fired.iter().map(|(rule, ..)| *rule).collect::<Vec<_>>(),
        (0..9).collect::<Vec<_>>()
    );
    assert_eq!(transcript.fired[2].1, Remedy::C2);
    assert_eq!(
        transcript.aggregated,
        outputs.caps().iter().map(|(l, c)| (*l, *c)).collect::<Vec<_>>()
    );
    assert_eq!(transcript.aggregated[0].0, Remedy::C1);
    assert_eq!(transcript.crisp, Some(outputs.crisp_output().ok()));
}

#[test]
fn test_tracing_report() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fuzzy_mamdani=trace,rainfall=info")
        .with_test_writer()
        .try_init();

    let fixture = Fixture::new();
    let engine = fixture.engine();
    let traced = engine.evaluate_with(&[40., 36.5], TracingReport).unwrap();

    assert_eq!(traced, engine.evaluate(&[40., 36.5]).unwrap());
}

#[test]
fn test_shared_between_threads() {
    let fixture = Fixture::new();
    let engine = fixture.engine();
    let expected = engine.evaluate(&[40., 36.5]).unwrap();
    let results = Mutex::new(Vec::new());

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut interleaved = Vec::new();

                for inputs in [[70., 41.], [40., 36.5], [0., 39.]] {
                    interleaved.push(engine.evaluate(&inputs).unwrap());
                }

                results.lock().unwrap().push(interleaved.swap_remove(1));
            });
        }
    });

    let results = results.lock().unwrap();

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|outputs| *outputs == expected));
}
