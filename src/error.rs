use thiserror::Error;

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("membership function width must be finite and positive, got {width}")]
    InvalidWidth { width: f64 },
    #[error("membership function peak must be finite and non-negative, got {peak}")]
    InvalidPeak { peak: f64 },
    #[error("membership function {name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
    #[error("fuzzy set {} has no membership function", .label.as_deref().unwrap_or("<unlabeled>"))]
    UnboundMembershipFunction { label: Option<String> },
    #[error("{store} is full (capacity {capacity})")]
    CapacityExceeded { store: &'static str, capacity: usize },
    #[error("index {index} is out of range, only {len} populated")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("rule expects {expected} inputs but got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("rule has no antecedents")]
    EmptyPremise,
    #[error("rule {rule} has no consequent")]
    MissingConsequent { rule: usize },
    #[error("output universe [{min}, {max}] must have finite bounds with min < max")]
    InvalidUniverse { min: f64, max: f64 },
    #[error("resolution must be at least 2 samples, got {resolution}")]
    InvalidResolution { resolution: usize },
    /// Every sampled point of the aggregated output has zero membership,
    /// so the centroid would be 0/0.
    #[error("aggregated output has no membership anywhere in the universe")]
    DegenerateDefuzzification,
}

#[test]
fn test_unbound_message_names_the_set() {
    let err = FuzzyError::UnboundMembershipFunction {
        label: Some("A1".into()),
    };

    assert_eq!(err.to_string(), "fuzzy set A1 has no membership function");

    let err = FuzzyError::UnboundMembershipFunction { label: None };

    assert_eq!(err.to_string(), "fuzzy set <unlabeled> has no membership function");
}
