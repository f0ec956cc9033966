use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::error::{FuzzyError, Result};

/// The result of one evaluation of a rule base.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs<L> {
    firing_strengths: Vec<f64>,
    caps: BTreeMap<L, f64>,
    crisp: Option<f64>,
}

impl<L: Ord> Outputs<L> {
    pub(crate) fn new(firing_strengths: Vec<f64>, caps: BTreeMap<L, f64>, crisp: Option<f64>) -> Self {
        Self {
            firing_strengths,
            caps,
            crisp,
        }
    }

    /// Activation level of every rule, in the order the rules were added
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn firing_strength(&self, rule: usize) -> Option<f64> {
        self.firing_strengths.get(rule).copied()
    }

    /// Aggregated activation per consequent label, sorted by label
    pub fn caps(&self) -> &BTreeMap<L, f64> {
        &self.caps
    }

    pub fn cap<Q>(&self, label: &Q) -> Option<f64>
    where
        L: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.caps.get(label).copied()
    }

    /// Whether the aggregated output carried no membership at all, leaving
    /// nothing to defuzzify.
    pub fn is_degenerate(&self) -> bool {
        self.crisp.is_none()
    }

    /// The defuzzified centroid.
    pub fn crisp_output(&self) -> Result<f64> {
        self.crisp.ok_or(FuzzyError::DegenerateDefuzzification)
    }
}

#[test]
fn test_outputs_accessors() {
    let caps = BTreeMap::from([("Small".to_string(), 0.2), ("Large".to_string(), 0.6)]);
    let outputs = Outputs::new(vec![0.2, 0.6, 0.1], caps, Some(7.5));

    assert_eq!(outputs.firing_strength(1), Some(0.6));
    assert_eq!(outputs.firing_strength(3), None);
    assert_eq!(outputs.cap("Large"), Some(0.6));
    assert_eq!(outputs.cap("Medium"), None);
    assert_eq!(outputs.caps().keys().collect::<Vec<_>>(), ["Large", "Small"]);
    assert_eq!(outputs.crisp_output(), Ok(7.5));
    assert!(!outputs.is_degenerate());
}

#[test]
fn test_degenerate_outputs() {
    let outputs = Outputs::new(vec![0.], BTreeMap::from([("C1", 0.)]), None);

    assert!(outputs.is_degenerate());
    assert_eq!(outputs.crisp_output(), Err(FuzzyError::DegenerateDefuzzification));
    assert_eq!(outputs.cap(&"C1"), Some(0.));
}
