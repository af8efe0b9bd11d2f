use num::Float;

/// Area and first moment of a sampled curve using the trapezoid rule.
///
/// `samples` are `(x, y)` pairs spaced `step` apart. Returns `(∫y dx, ∫x·y dx)`,
/// where each panel's moment is taken at its right edge.
pub(crate) fn area_and_moment<F: Float>(samples: impl IntoIterator<Item = (F, F)>, step: F) -> (F, F) {
    let two = F::one() + F::one();
    let mut iter = samples.into_iter();
    let Some((_, mut y_prev)) = iter.next() else {
        return (F::zero(), F::zero());
    };
    let mut area = F::zero();
    let mut moment = F::zero();

    for (x, y) in iter {
        let mean = (y_prev + y) / two;

        area = area + mean;
        moment = moment + x * mean;
        y_prev = y;
    }

    (area * step, moment * step)
}

/// Maximum of the values, or zero for an empty sequence.
pub(crate) fn max_or_zero<F: Float>(values: impl IntoIterator<Item = F>) -> F {
    values.into_iter().fold(F::zero(), F::max)
}

#[test]
fn test_area_and_moment() {
    // Constant 1 over [0, 4] in unit steps
    let samples = (0..=4).map(|x| (x as f64, 1.0f64));
    let (area, moment) = area_and_moment(samples, 1.);

    assert_eq!(area, 4.);
    // Right-edge moments: 1 + 2 + 3 + 4
    assert_eq!(moment, 10.);

    let (area, moment) = area_and_moment(std::iter::empty::<(f64, f64)>(), 1.);

    assert_eq!((area, moment), (0., 0.));
}

#[test]
fn test_max_or_zero() {
    assert_eq!(max_or_zero([0.2, 0.7, 0.1]), 0.7);
    assert_eq!(max_or_zero(Vec::<f32>::new()), 0.);
}
