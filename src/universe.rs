use std::ops::RangeInclusive;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// The sampled output domain the aggregated fuzzy output is defuzzified over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    resolution: usize,
}

impl Universe {
    pub const DEFAULT_MAX: f64 = 15.;
    pub const DEFAULT_RESOLUTION: usize = 300;

    /// `[0, domain_max]` sampled at `resolution` evenly spaced points
    pub fn new(domain_max: f64, resolution: usize) -> Result<Self> {
        Self::with_range(0. ..=domain_max, resolution)
    }

    pub fn with_range(range: RangeInclusive<f64>, resolution: usize) -> Result<Self> {
        let min = *range.start();
        let max = *range.end();

        // The width must be finite too, or the step overflows
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(FuzzyError::InvalidUniverse { min, max });
        }
        // The step is (max - min) / (resolution - 1)
        if resolution < 2 {
            return Err(FuzzyError::InvalidResolution { resolution });
        }

        Ok(Self { min, max, resolution })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.resolution - 1) as f64
    }

    pub(crate) fn samples(&self) -> Linspace {
        Linspace::new(self.min, self.max, self.resolution)
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            min: 0.,
            max: Self::DEFAULT_MAX,
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }
}

#[test]
fn test_universe_validation() {
    assert_eq!(Universe::new(0., 10), Err(FuzzyError::InvalidUniverse { min: 0., max: 0. }));
    assert_eq!(
        Universe::new(-1., 10),
        Err(FuzzyError::InvalidUniverse { min: 0., max: -1. })
    );
    assert!(matches!(
        Universe::new(f64::INFINITY, 10),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    assert_eq!(
        Universe::with_range(-1e308..=1e308, 11),
        Err(FuzzyError::InvalidUniverse { min: -1e308, max: 1e308 })
    );
    assert!(Universe::with_range(-1e307..=1e307, 11).is_ok());
    assert_eq!(Universe::new(1., 1), Err(FuzzyError::InvalidResolution { resolution: 1 }));
    assert_eq!(Universe::new(1., 0), Err(FuzzyError::InvalidResolution { resolution: 0 }));
}

#[test]
fn test_universe_samples() {
    let universe = Universe::with_range(-1. ..=1., 5).unwrap();

    assert_eq!(universe.step(), 0.5);
    assert_eq!(universe.samples().collect::<Vec<_>>(), vec![-1., -0.5, 0., 0.5, 1.]);

    let universe = Universe::default();

    assert_eq!((universe.min(), universe.max(), universe.resolution()), (0., 15., 300));
    assert_eq!(universe.samples().count(), 300);
}
