//! Linear frequency axis of a sweep.

/// `size` frequencies evenly spaced from `start` to `stop` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyAxis {
    pub start: f64,
    pub stop: f64,
    pub size: usize,
    pub step: f64,
}

impl FrequencyAxis {
    /// Build the axis; `None` when there are no samples.
    ///
    /// A single sample has no spacing, its step is 0 and the only
    /// frequency is `start`.
    pub fn new(start: f64, stop: f64, size: usize) -> Option<Self> {
        let step = match size {
            0 => return None,
            1 => 0.0,
            n => (stop - start) / (n - 1) as f64,
        };
        Some(Self {
            start,
            stop,
            size,
            step,
        })
    }

    /// Frequency of sample `i` (0-based).
    pub fn frequency(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.size).map(move |i| self.frequency(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_midpoint() {
        let axis = FrequencyAxis::new(1000.0, 2000.0, 11).unwrap();
        assert_eq!(axis.step, 100.0);
        assert_eq!(axis.frequency(5), 1500.0);
        assert_eq!(axis.frequency(10), 2000.0);
        assert_eq!(axis.iter().count(), 11);
    }

    #[test]
    fn test_single_sample_has_zero_step() {
        let axis = FrequencyAxis::new(5.0e6, 6.0e6, 1).unwrap();
        assert_eq!(axis.step, 0.0);
        assert_eq!(axis.iter().collect::<Vec<_>>(), [5.0e6]);
    }

    #[test]
    fn test_no_samples() {
        assert!(FrequencyAxis::new(0.0, 1.0, 0).is_none());
    }

    #[test]
    fn test_descending_sweep() {
        let axis = FrequencyAxis::new(3.0, 1.0, 3).unwrap();
        assert_eq!(axis.iter().collect::<Vec<_>>(), [3.0, 2.0, 1.0]);
    }
}
