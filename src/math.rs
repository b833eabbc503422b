use num::Float;

/// Similar to numpy.interp for a single point: linear interpolation over
/// ascending `coords`, clamped to the first/last ordinate outside the range.
///
/// Returns `None` when there are no coordinates to interpolate between.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> Option<F> {
    let (first_x, first_y) = *coords.first()?;
    let (last_x, last_y) = *coords.last()?;

    // Base cases
    if x <= first_x {
        return Some(first_y);
    }
    if x >= last_x {
        return Some(last_y);
    }

    coords.windows(2).find_map(|window| {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        // Actual interpolation
        if x1 <= x && x <= x2 {
            Some(y1 + (x - x1) * (y2 - y1) / (x2 - x1))
        } else {
            None
        }
    })
}

/// Index of the abscissa closest to `x`; ties resolve to the lower one.
///
/// NaN never has a nearest abscissa, and NaN abscissas are skipped.
pub(crate) fn nearest_index<F: Float>(x: F, xs: impl IntoIterator<Item = F>) -> Option<usize> {
    if x.is_nan() {
        return None;
    }

    let mut best: Option<(usize, F)> = None;

    for (i, xi) in xs.into_iter().enumerate() {
        let distance = (xi - x).abs();

        match best {
            _ if distance.is_nan() => {},
            Some((_, d)) if distance >= d => {},
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i)
}

/// Pointwise combination of two equally long membership vectors
pub(crate) fn zip_with<F: Float>(u: &[F], v: &[F], op: impl Fn(F, F) -> F) -> Vec<F> {
    u.iter().copied().zip(v.iter().copied()).map(|(u, v)| op(u, v)).collect()
}

#[test]
fn test_interp() {
    let coords = [(1., 3.), (2., 2.), (3., 0.)];
    let x = [0., 1., 1.5, 2.72, 3.24];

    assert_eq!(
        x.iter().map(|x| interp(*x, &coords).unwrap()).collect::<Vec<_>>(),
        vec![3., 3., 2.5, 0.5599999999999996, 0.]
    );

    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(2.5, &coords), Some(4.));
    assert_eq!(interp(-1., &coords), Some(0.));
    assert_eq!(interp(7.5, &coords), Some(2.));
    assert_eq!(interp::<f64>(1., &[]), None);
}

#[test]
fn test_nearest_index() {
    let xs = [0., 0.5, 1., 1.5];

    assert_eq!(nearest_index(0.7, xs), Some(1));
    assert_eq!(nearest_index(0.75, xs), Some(1));
    assert_eq!(nearest_index(9., xs), Some(3));
    assert_eq!(nearest_index(-2., xs), Some(0));
    assert_eq!(nearest_index::<f64>(1., []), None);
    assert_eq!(nearest_index(f64::NAN, xs), None);
    assert_eq!(nearest_index(1.2, [f64::NAN, 1., 2.]), Some(1));
}
