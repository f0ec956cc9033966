use crate::error::{FuzzyError, Result};
use crate::ops;
use crate::sets::FuzzySet;

/// `if x0 is A and x1 is B ... then y is C`
///
/// Antecedent `i` is matched against input `i`. The number of antecedents
/// (the arity) is fixed when the rule is created.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule<'m, L> {
    arity: usize,
    antecedents: Vec<FuzzySet<'m>>,
    consequent: Option<(FuzzySet<'m>, L)>,
}

impl<'m, L> Rule<'m, L> {
    pub fn new(arity: usize) -> Self {
        Rule {
            arity,
            antecedents: Vec::new(),
            consequent: None,
        }
    }

    /// A rule whose arity is the number of `antecedents` given.
    ///
    /// ```
    /// # use fuzzy_mamdani::{FuzzySet, MembershipFunction, Rule};
    /// let cold = MembershipFunction::bell(20., 0., 1.)?;
    /// let heat = MembershipFunction::triangular(10., 10., 1.)?;
    /// let rule = Rule::when([FuzzySet::with_function(&cold)]).then(FuzzySet::with_function(&heat), "High");
    ///
    /// assert_eq!(rule.firing_strength(&[0.])?, 1.);
    /// # Ok::<(), fuzzy_mamdani::FuzzyError>(())
    /// ```
    pub fn when(antecedents: impl IntoIterator<Item = FuzzySet<'m>>) -> Self {
        let antecedents: Vec<_> = antecedents.into_iter().collect();

        Rule {
            arity: antecedents.len(),
            antecedents,
            consequent: None,
        }
    }

    pub fn then(mut self, set: FuzzySet<'m>, label: L) -> Self {
        self.set_consequent(set, label);
        self
    }

    pub fn add_antecedent(&mut self, set: FuzzySet<'m>) -> Result<()> {
        if self.antecedents.len() == self.arity {
            return Err(FuzzyError::CapacityExceeded {
                store: "rule antecedents",
                capacity: self.arity,
            });
        }

        self.antecedents.push(set);

        Ok(())
    }

    /// Replaces any previous consequent.
    pub fn set_consequent(&mut self, set: FuzzySet<'m>, label: L) {
        self.consequent = Some((set, label));
    }

    pub fn antecedent(&self, index: usize) -> Result<&FuzzySet<'m>> {
        self.antecedents.get(index).ok_or(FuzzyError::IndexOutOfRange {
            index,
            len: self.antecedents.len(),
        })
    }

    pub fn antecedents(&self) -> &[FuzzySet<'m>] {
        &self.antecedents
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn consequent(&self) -> Option<(&FuzzySet<'m>, &L)> {
        self.consequent.as_ref().map(|(set, label)| (set, label))
    }

    /// All antecedent slots are filled and a consequent is set.
    pub fn is_complete(&self) -> bool {
        self.antecedents.len() == self.arity && self.consequent.is_some()
    }

    /// The rule's activation level for `inputs`: the minimum of its
    /// antecedents' membership degrees. Inputs past the arity are ignored.
    pub fn firing_strength(&self, inputs: &[f64]) -> Result<f64> {
        if self.arity == 0 {
            return Err(FuzzyError::EmptyPremise);
        }
        if inputs.len() < self.arity {
            return Err(FuzzyError::ArityMismatch {
                expected: self.arity,
                actual: inputs.len(),
            });
        }

        inputs[..self.arity]
            .iter()
            .enumerate()
            .try_fold(f64::INFINITY, |strength, (i, x)| {
                Ok(ops::and(strength, self.antecedent(i)?.evaluate(*x)?))
            })
    }
}

#[cfg(test)]
use crate::membership::MembershipFunction;

#[test]
fn test_firing_strength_is_weakest_condition() {
    // Flat tops make the degrees independent of the input value
    let a = MembershipFunction::triangular(1e9, 0., 0.3).unwrap();
    let b = MembershipFunction::triangular(1e9, 0., 0.7).unwrap();
    let c = MembershipFunction::triangular(1e9, 0., 1.).unwrap();
    let mut rule = Rule::new(2);

    rule.add_antecedent(FuzzySet::with_function(&a)).unwrap();
    rule.add_antecedent(FuzzySet::with_function(&b)).unwrap();
    rule.set_consequent(FuzzySet::with_function(&c), "C1");

    assert_eq!(rule.firing_strength(&[0., 0.]), Ok(0.3));
    assert!(rule.is_complete());
}

#[test]
fn test_firing_strength_over_three_conditions() {
    let a = MembershipFunction::triangular(1e9, 0., 0.9).unwrap();
    let b = MembershipFunction::triangular(1e9, 0., 0.4).unwrap();
    let c = MembershipFunction::triangular(1e9, 0., 0.8).unwrap();
    let rule: Rule<&str> = Rule::when([&a, &b, &c].map(FuzzySet::with_function));

    assert_eq!(rule.firing_strength(&[0., 0., 0.]), Ok(0.4));

    let d = MembershipFunction::triangular(1e9, 0., 0.).unwrap();
    let rule: Rule<&str> = Rule::when([&a, &d, &c].map(FuzzySet::with_function));

    assert_eq!(rule.firing_strength(&[0., 0., 0.]), Ok(0.));
}

#[test]
fn test_huge_arity_does_not_preallocate() {
    let mf = MembershipFunction::bell(1., 0., 1.).unwrap();
    let mut rule: Rule<&str> = Rule::new(usize::MAX);

    rule.add_antecedent(FuzzySet::with_function(&mf)).unwrap();

    assert_eq!(rule.arity(), usize::MAX);
    assert_eq!(rule.antecedents().len(), 1);
    assert_eq!(
        rule.firing_strength(&[0.]),
        Err(FuzzyError::ArityMismatch {
            expected: usize::MAX,
            actual: 1
        })
    );
}

#[test]
fn test_firing_strength_matches_positionally() {
    let low = MembershipFunction::triangular(10., 0., 1.).unwrap();
    let high = MembershipFunction::triangular(10., 10., 1.).unwrap();
    let rule: Rule<&str> = Rule::when([FuzzySet::with_function(&low), FuzzySet::with_function(&high)]);

    assert_eq!(rule.firing_strength(&[0., 10.]), Ok(1.));
    assert_eq!(rule.firing_strength(&[10., 0.]), Ok(0.));
    assert_eq!(rule.firing_strength(&[1., 8.]), Ok(0.6));
    // Trailing inputs are not part of this rule
    assert_eq!(rule.firing_strength(&[0., 10., 99.]), Ok(1.));
}

#[test]
fn test_capacity_exceeded() {
    let mf = MembershipFunction::bell(1., 0., 1.).unwrap();
    let mut rule: Rule<&str> = Rule::new(1);

    rule.add_antecedent(FuzzySet::with_function(&mf)).unwrap();

    assert_eq!(
        rule.add_antecedent(FuzzySet::with_function(&mf)),
        Err(FuzzyError::CapacityExceeded {
            store: "rule antecedents",
            capacity: 1
        })
    );
    assert_eq!(rule.antecedents().len(), 1);
}

#[test]
fn test_arity_mismatch() {
    let mf = MembershipFunction::bell(1., 0., 1.).unwrap();
    let rule: Rule<&str> = Rule::when([FuzzySet::with_function(&mf), FuzzySet::with_function(&mf)]);

    assert_eq!(
        rule.firing_strength(&[0.]),
        Err(FuzzyError::ArityMismatch { expected: 2, actual: 1 })
    );
}

#[test]
fn test_incomplete_rules() {
    let mf = MembershipFunction::bell(1., 0., 1.).unwrap();
    let mut rule: Rule<&str> = Rule::new(2);

    rule.add_antecedent(FuzzySet::with_function(&mf)).unwrap();

    assert!(!rule.is_complete());
    assert_eq!(rule.antecedent(1), Err(FuzzyError::IndexOutOfRange { index: 1, len: 1 }));
    assert_eq!(
        rule.firing_strength(&[0., 0.]),
        Err(FuzzyError::IndexOutOfRange { index: 1, len: 1 })
    );

    let empty: Rule<&str> = Rule::new(0);

    assert_eq!(empty.firing_strength(&[]), Err(FuzzyError::EmptyPremise));
}

#[test]
fn test_unbound_antecedent() {
    let rule: Rule<&str> = Rule::when([FuzzySet::new()]);

    assert_eq!(
        rule.firing_strength(&[0.]),
        Err(FuzzyError::UnboundMembershipFunction { label: None })
    );
}

#[test]
fn test_consequent_last_write_wins() {
    let a = MembershipFunction::bell(1., 0., 1.).unwrap();
    let b = MembershipFunction::bell(1., 5., 1.).unwrap();
    let mut rule = Rule::when([FuzzySet::with_function(&a)]);

    assert_eq!(rule.consequent(), None);

    rule.set_consequent(FuzzySet::labeled("A", &a), "first");
    rule.set_consequent(FuzzySet::labeled("B", &b), "second");

    let (set, label) = rule.consequent().unwrap();

    assert_eq!(set.label(), Some("B"));
    assert_eq!(*label, "second");
}
