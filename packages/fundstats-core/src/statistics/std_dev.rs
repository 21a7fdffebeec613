//! Running population standard deviation.

/// Accumulates measurements and reports their population standard deviation.
///
/// Keeps only the count, the sum and the sum of squares, so each update is O(1).
/// Non-finite measurements are accepted and poison every later result.
#[derive(Debug, Clone, Default)]
pub struct StandardDeviation {
    count: usize,
    sum: f64,
    sum_of_squares: f64,
}

impl StandardDeviation {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one measurement.
    pub fn add_measurement(&mut self, x: f64) {
        self.count += 1;
        self.sum += x;
        self.sum_of_squares += x * x;
    }

    /// Number of measurements recorded so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Population standard deviation of the recorded measurements.
    ///
    /// Returns 0 with fewer than two measurements. A variance that comes out
    /// slightly negative from floating point cancellation is clamped to 0.
    pub fn get(&self) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }

        let n = self.count as f64;
        let mean = self.sum / n;
        let variance = self.sum_of_squares / n - mean * mean;

        if variance < 0.0 {
            0.0
        } else {
            variance.sqrt()
        }
    }
}
