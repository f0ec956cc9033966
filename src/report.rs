use std::fmt::Debug;

use tracing::info;

/// Observer of the intermediate results of an evaluation.
///
/// Every hook defaults to doing nothing. `()` is the silent reporter.
pub trait Report<L> {
    /// Called once per rule, in rule order
    fn rule_fired(&mut self, _rule: usize, _label: &L, _strength: f64) {}

    /// Called once per consequent label, in label order
    fn aggregated(&mut self, _label: &L, _cap: f64) {}

    /// Called last. `None` if the output could not be defuzzified
    fn defuzzified(&mut self, _crisp: Option<f64>) {}
}

impl<L> Report<L> for () {}

impl<L, R: Report<L> + ?Sized> Report<L> for &mut R {
    fn rule_fired(&mut self, rule: usize, label: &L, strength: f64) {
        (**self).rule_fired(rule, label, strength)
    }

    fn aggregated(&mut self, label: &L, cap: f64) {
        (**self).aggregated(label, cap)
    }

    fn defuzzified(&mut self, crisp: Option<f64>) {
        (**self).defuzzified(crisp)
    }
}

/// Writes each step of an evaluation as an `info` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReport;

impl<L: Debug> Report<L> for TracingReport {
    fn rule_fired(&mut self, rule: usize, label: &L, strength: f64) {
        info!(rule = rule + 1, ?label, strength, "rule fired");
    }

    fn aggregated(&mut self, label: &L, cap: f64) {
        info!(?label, max = cap, "aggregated consequent");
    }

    fn defuzzified(&mut self, crisp: Option<f64>) {
        match crisp {
            Some(crisp) => info!(crisp, "defuzzified"),
            None => info!("defuzzification degenerate, no rule fired"),
        }
    }
}
