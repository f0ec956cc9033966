//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified through [`MembershipFunction`]s, each
//! [`Rule`] fires at the minimum of its antecedents' degrees, rules sharing
//! a consequent label are aggregated by maximum, and the union of the
//! clipped consequents is defuzzified to one crisp value by its sampled
//! center of gravity over a [`Universe`].
//!
//! ```
//! use fuzzy_mamdani::{FuzzySet, InferenceEngine, MembershipFunction, Rule, Universe};
//!
//! // The caller owns the membership functions; sets and rules borrow them
//! let cold = MembershipFunction::bell(30., 0., 1.)?;
//! let warm = MembershipFunction::bell(30., 25., 1.)?;
//! let low = MembershipFunction::triangular(40., 20., 1.)?;
//! let high = MembershipFunction::triangular(40., 80., 1.)?;
//!
//! let mut engine = InferenceEngine::with_universe(Universe::new(100., 201)?);
//!
//! engine.add_rule(Rule::when([FuzzySet::labeled("Cold", &cold)]).then(FuzzySet::labeled("High", &high), "High"))?;
//! engine.add_rule(Rule::when([FuzzySet::labeled("Warm", &warm)]).then(FuzzySet::labeled("Low", &low), "Low"))?;
//!
//! let outputs = engine.evaluate(&[2.])?;
//!
//! assert!(outputs.cap("High") > outputs.cap("Low"));
//! assert!(outputs.crisp_output()? > 50.);
//! # Ok::<(), fuzzy_mamdani::FuzzyError>(())
//! ```

mod error;
mod inference;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod report;
mod rules;
mod sets;
mod terms;
mod universe;

pub use error::{FuzzyError, Result};
pub use inference::InferenceEngine;
pub use membership::{MembershipFunction, Shape};
pub use outputs::Outputs;
pub use report::{Report, TracingReport};
pub use rules::Rule;
pub use sets::FuzzySet;
pub use terms::{Key, Terms};
pub use universe::Universe;
