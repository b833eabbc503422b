/// Evenly spaced samples over a closed interval, like `numpy.linspace`
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }

    /// Grid from `min` to `max` (inclusive when reachable) with spacing `step`.
    ///
    /// A non-positive step or an inverted range yields the single point `min`.
    pub fn with_step(min: f64, max: f64, step: f64) -> Self {
        if step <= 0. || max <= min {
            return Self::new(min, min, 1);
        }
        // floor mirrors python's int() conversion; the epsilon keeps 0.9 / 0.1 from landing on 8.99..
        let num = ((max - min) / step + 1e-9).floor() as usize + 1;

        Linspace {
            start: min,
            step,
            index: 0,
            len: num,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            // Calculate the value just like numpy.linspace does
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    assert_eq!(Linspace::new(0., 1., 5).collect::<Vec<_>>(), vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(3., 9., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}

#[test]
fn test_linspace_with_step() {
    assert_eq!(
        Linspace::with_step(0., 10., 2.5).collect::<Vec<_>>(),
        vec![0., 2.5, 5., 7.5, 10.]
    );
    assert_eq!(Linspace::with_step(0.1, 1., 0.1).count(), 10);
    assert_eq!(Linspace::with_step(150., 200., 10.).len(), 6);
    assert_eq!(Linspace::with_step(5., 1., 1.).collect::<Vec<_>>(), vec![5.]);
}
