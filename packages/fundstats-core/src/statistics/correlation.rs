//! Online Pearson correlation between fund and benchmark daily returns.

/// Running centered moments for an incremental Pearson correlation.
///
/// Covers every pair seen so far; there is no window. Means and co-moments
/// are updated the Welford way, so a constant series keeps a second moment
/// of exactly zero.
#[derive(Debug, Clone, Default)]
pub struct OnlineCorrelation {
    count: usize,
    mean_x: f64,
    mean_y: f64,
    m2_x: f64,
    m2_y: f64,
    c_xy: f64,
}

impl OnlineCorrelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one (fund, benchmark) pair and return the correlation over all pairs.
    pub fn add(&mut self, x: f64, y: f64) -> f64 {
        self.count += 1;
        let n = self.count as f64;

        let dx = x - self.mean_x;
        let dy = y - self.mean_y;
        self.mean_x += dx / n;
        self.mean_y += dy / n;

        let dy_after = y - self.mean_y;
        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * dy_after;
        self.c_xy += dx * dy_after;

        self.get()
    }

    /// Number of pairs seen.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Current correlation; 0 when the denominator is zero or not a number.
    pub fn get(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }

        let denominator = (self.m2_x * self.m2_y).sqrt();

        if denominator == 0.0 || denominator.is_nan() {
            0.0
        } else {
            self.c_xy / denominator
        }
    }
}
