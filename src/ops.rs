//! The Mamdani operators: conjunction by minimum, union by maximum and
//! implication by clipping.

use num::Float;

/// Fuzzy AND of two membership degrees.
pub(crate) fn and<F: Float>(u: F, v: F) -> F {
    F::min(u, v)
}

/// Fuzzy OR, starting from zero membership.
pub(crate) fn union<F: Float>(degrees: impl IntoIterator<Item = F>) -> F {
    degrees.into_iter().fold(F::zero(), F::max)
}

/// Mamdani implication: the consequent membership clipped at the rule's
/// activation level.
pub(crate) fn implication<F: Float>(membership: F, activation: F) -> F {
    F::min(membership, activation)
}

#[test]
fn test_and() {
    assert_eq!(and(0.3, 0.7), 0.3);
    assert_eq!(and(f64::INFINITY, 0.9), 0.9);
    assert_eq!(and(0.0f32, 0.5), 0.);
}

#[test]
fn test_union() {
    assert_eq!(union([0.2, 0.6, 0.1]), 0.6);
    assert_eq!(union(std::iter::empty::<f32>()), 0.);
}

#[test]
fn test_implication() {
    assert_eq!(implication(0.8, 0.25), 0.25);
    assert_eq!(implication(0.1, 0.25), 0.1);
}
