use num::Float;

/// Discrete center of gravity of sampled `(x, membership)` pairs:
/// `Σ x·μ(x) / Σ μ(x)`. Returns `None` when the total membership is zero.
/// The result is always finite.
pub(crate) fn centroid<F: Float>(samples: impl IntoIterator<Item = (F, F)>) -> Option<F> {
    let samples: Vec<_> = samples.into_iter().collect();
    let (num, den) = weighted_sums(samples.iter().copied());

    if num.is_finite() && den.is_finite() {
        return ratio(num, den);
    }

    // The sums overflowed. Scaled into [0, 1/n], the weights sum to at most
    // one and the weighted sum stays within the largest |x|.
    let peak = samples.iter().map(|(_, mu)| *mu).fold(F::zero(), F::max);
    let n = F::from(samples.len())?;
    let (num, den) = weighted_sums(samples.iter().map(|&(x, mu)| (x, mu / peak / n)));

    ratio(num, den)
}

fn weighted_sums<F: Float>(samples: impl Iterator<Item = (F, F)>) -> (F, F) {
    samples.fold((F::zero(), F::zero()), |(num, den), (x, mu)| (num + x * mu, den + mu))
}

fn ratio<F: Float>(num: F, den: F) -> Option<F> {
    if den > F::zero() {
        Some(num / den).filter(|c| c.is_finite())
    } else {
        None
    }
}

#[test]
fn test_centroid() {
    let xs = [0., 1., 2., 3., 4.];
    let mus = [0., 0.5, 1., 0.5, 0.];

    assert_eq!(centroid(xs.into_iter().zip(mus)), Some(2.));

    let mus = [1., 0., 0., 0., 1.];

    assert_eq!(centroid(xs.into_iter().zip(mus)), Some(2.));

    let mus = [0., 0., 0., 0., 1.];

    assert_eq!(centroid(xs.into_iter().zip(mus)), Some(4.));
}

#[test]
fn test_centroid_survives_overflowing_sums() {
    assert_eq!(centroid([(1., 1e308), (3., 1e308)]), Some(2.));

    let far = centroid([(1e308, 1.), (1.5e308, 1.)]);

    assert!(far.is_some_and(|c| (c / 1.25e308 - 1.).abs() < 1e-12), "{far:?}");

    let huge = centroid((0..300).map(|i| (i as f64 * 0.05, 1e307)));

    assert!(huge.is_some_and(|c| (c - 7.475).abs() < 1e-9), "{huge:?}");
}

#[test]
fn test_centroid_of_nothing() {
    assert_eq!(centroid([(0., 0.), (1., 0.)]), None);
    assert_eq!(centroid(std::iter::empty::<(f64, f64)>()), None);
}
