/// `n` evenly spaced samples over `[min, max]`, both ends included.
///
/// Samples are computed as `min + step * i` rather than by repeated addition
/// so the last one lands on `max` without drifting.
#[derive(Clone, Debug)]
pub(crate) struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, n: usize) -> Self {
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

    pub(crate) fn step(&self) -> f64 {
        self.step
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
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
    let samples: Vec<_> = Linspace::new(0., 1., 5).collect();

    assert_eq!(samples, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(2., 4., 3).step(), 1.);
    assert_eq!(Linspace::new(3., 3., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}
