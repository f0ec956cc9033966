use crate::error::{FuzzyError, Result};

/// The shape of a membership function.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Shape {
    /// Piecewise linear, reaching zero at `center ± width / 2`
    Triangular,
    /// `peak * (1 - q) * exp(-q)` where `q = (x - center)² / (width / 2)²`
    Bell,
}

/// A membership function `ℝ → [0, ∞)` describing one fuzzy set.
///
/// Parameters are validated on construction, so every value of this type
/// evaluates without dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MembershipFunction {
    shape: Shape,
    width: f64,
    center: f64,
    peak: f64,
}

impl MembershipFunction {
    pub fn new(shape: Shape, width: f64, center: f64, peak: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0. {
            return Err(FuzzyError::InvalidWidth { width });
        }
        if !center.is_finite() {
            return Err(FuzzyError::NonFiniteParameter {
                name: "center",
                value: center,
            });
        }
        if !peak.is_finite() || peak < 0. {
            return Err(FuzzyError::InvalidPeak { peak });
        }

        Ok(Self {
            shape,
            width,
            center,
            peak,
        })
    }

    pub fn triangular(width: f64, center: f64, peak: f64) -> Result<Self> {
        Self::new(Shape::Triangular, width, center, peak)
    }

    pub fn bell(width: f64, center: f64, peak: f64) -> Result<Self> {
        Self::new(Shape::Bell, width, center, peak)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Membership degree of `x`. Never negative and never NaN.
    pub fn evaluate(&self, x: f64) -> f64 {
        let d = x - self.center;
        let raw = match self.shape {
            // Scale by peak last so the center is exactly `peak` even when
            // the slope would overflow
            Shape::Triangular => self.peak * (1. - 2. * d.abs() / self.width),
            Shape::Bell => {
                let t = d / (self.width / 2.);
                let q = t * t;

                self.peak * (1. - q) * (-q).exp()
            },
        };

        // f64::max discards NaN, which covers non-finite x
        f64::max(raw, 0.)
    }
}

#[test]
fn test_triangular_shape() {
    let mf = MembershipFunction::triangular(4., 10., 1.).unwrap();

    assert_eq!(mf.evaluate(10.), 1.);
    assert_eq!(mf.evaluate(9.), 0.5);
    assert_eq!(mf.evaluate(11.), 0.5);
    assert_eq!(mf.evaluate(8.), 0.);
    assert_eq!(mf.evaluate(12.), 0.);
    assert_eq!(mf.evaluate(-100.), 0.);
    assert_eq!(mf.evaluate(100.), 0.);
}

#[test]
fn test_bell_shape() {
    let mf = MembershipFunction::bell(70., 45., 1.).unwrap();

    assert_eq!(mf.evaluate(45.), 1.);
    assert_eq!(mf.evaluate(45. + 35.), 0.);
    assert_eq!(mf.evaluate(45. - 35.), 0.);
    // Past the zero crossing the raw curve goes negative and is clamped
    assert_eq!(mf.evaluate(0.), 0.);
    assert!((mf.evaluate(40.) - mf.evaluate(50.)).abs() < 1e-12);
    assert!(mf.evaluate(40.) < 1.);
}

#[test]
fn test_non_finite_inputs_clamp_to_zero() {
    let tri = MembershipFunction::triangular(4., 10., 1.).unwrap();
    let bell = MembershipFunction::bell(4., 10., 1.).unwrap();

    for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(tri.evaluate(x), 0.);
        assert_eq!(bell.evaluate(x), 0.);
    }
}

#[test]
fn test_invalid_parameters() {
    assert_eq!(
        MembershipFunction::triangular(0., 1., 1.),
        Err(FuzzyError::InvalidWidth { width: 0. })
    );
    assert_eq!(
        MembershipFunction::bell(-2., 1., 1.),
        Err(FuzzyError::InvalidWidth { width: -2. })
    );
    assert!(matches!(
        MembershipFunction::bell(f64::NAN, 1., 1.),
        Err(FuzzyError::InvalidWidth { .. })
    ));
    assert!(matches!(
        MembershipFunction::bell(1., f64::INFINITY, 1.),
        Err(FuzzyError::NonFiniteParameter { name: "center", .. })
    ));
    assert_eq!(
        MembershipFunction::triangular(1., 1., -0.5),
        Err(FuzzyError::InvalidPeak { peak: -0.5 })
    );
}

#[test]
fn test_extreme_parameters_keep_the_peak() {
    let narrow = MembershipFunction::triangular(1e-308, 0., 1.).unwrap();

    assert_eq!(narrow.evaluate(0.), 1.);
    assert_eq!(narrow.evaluate(1.), 0.);
    assert_eq!(narrow.evaluate(-1.), 0.);

    let tall = MembershipFunction::triangular(1e9, 0., 1e308).unwrap();

    assert_eq!(tall.evaluate(0.), 1e308);
    assert!(tall.evaluate(1.) > 0.);
    assert_eq!(tall.evaluate(1e9), 0.);

    let narrow_bell = MembershipFunction::bell(1e-308, 0., 1.).unwrap();

    assert_eq!(narrow_bell.evaluate(0.), 1.);
    assert_eq!(narrow_bell.evaluate(1.), 0.);

    let tall_bell = MembershipFunction::bell(1e9, 0., 1e308).unwrap();

    assert_eq!(tall_bell.evaluate(0.), 1e308);
    assert!(tall_bell.evaluate(1.) > 0.);
}

#[test]
fn test_zero_peak_is_flat() {
    let mf = MembershipFunction::bell(10., 0., 0.).unwrap();

    assert_eq!(mf.evaluate(0.), 0.);
    assert_eq!(mf.evaluate(3.), 0.);
}
