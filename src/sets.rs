use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;

/// A (possibly labeled) fuzzy set: the unit rules are written in.
///
/// The set borrows its membership function rather than owning it, so the
/// same function can back any number of sets, rules and engines as long as
/// it outlives them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FuzzySet<'m> {
    label: Option<String>,
    function: Option<&'m MembershipFunction>,
}

impl<'m> FuzzySet<'m> {
    /// An unlabeled set with no membership function bound yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(function: &'m MembershipFunction) -> Self {
        Self {
            label: None,
            function: Some(function),
        }
    }

    pub fn labeled(label: impl Into<String>, function: &'m MembershipFunction) -> Self {
        Self {
            label: Some(label.into()),
            function: Some(function),
        }
    }

    pub fn set_function(&mut self, function: &'m MembershipFunction) {
        self.function = Some(function);
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn function(&self) -> Option<&'m MembershipFunction> {
        self.function
    }

    pub fn is_bound(&self) -> bool {
        self.function.is_some()
    }

    /// Membership function reference, or the error for an unbound set.
    pub(crate) fn bound_function(&self) -> Result<&'m MembershipFunction> {
        self.function.ok_or_else(|| FuzzyError::UnboundMembershipFunction {
            label: self.label.clone(),
        })
    }

    pub fn evaluate(&self, x: f64) -> Result<f64> {
        Ok(self.bound_function()?.evaluate(x))
    }
}

#[test]
fn test_evaluate_delegates() {
    let mf = MembershipFunction::triangular(2., 0., 1.).unwrap();
    let set = FuzzySet::labeled("Zero", &mf);

    assert_eq!(set.label(), Some("Zero"));
    assert_eq!(set.evaluate(0.), Ok(1.));
    assert_eq!(set.evaluate(0.5), Ok(0.5));
    assert_eq!(set.evaluate(5.), Ok(0.));
}

#[test]
fn test_unbound_set() {
    let mut set = FuzzySet::new();

    assert!(!set.is_bound());
    assert_eq!(
        set.evaluate(1.),
        Err(FuzzyError::UnboundMembershipFunction { label: None })
    );

    set.set_label("Later");

    assert_eq!(
        set.evaluate(1.),
        Err(FuzzyError::UnboundMembershipFunction {
            label: Some("Later".into())
        })
    );

    let mf = MembershipFunction::bell(2., 1., 1.).unwrap();
    set.set_function(&mf);

    assert!(set.is_bound());
    assert_eq!(set.evaluate(1.), Ok(1.));
}

#[test]
fn test_sets_share_one_function() {
    let mf = MembershipFunction::bell(10., 5., 1.).unwrap();
    let a = FuzzySet::with_function(&mf);
    let b = a.clone();

    assert!(std::ptr::eq(a.function().unwrap(), b.function().unwrap()));
}
