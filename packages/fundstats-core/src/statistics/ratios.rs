//! Shared formulas: compounding, annualization, Sharpe ratio and benchmark consistency.

use std::collections::VecDeque;

/// Trading days in a year, used to annualize daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Compound a cumulative return with one more daily return.
///
/// `(1 + previous) * (1 + daily) - 1`
pub fn compound(previous: f64, daily: f64) -> f64 {
    (1.0 + previous) * (1.0 + daily) - 1.0
}

/// Scale a daily standard deviation to a yearly one.
pub fn annualize_risk(daily_std: f64) -> f64 {
    daily_std * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Sharpe ratio of a fund against its benchmark.
///
/// # Arguments
///
/// * `investment_return` - Compounded fund return so far
/// * `benchmark_return` - Compounded benchmark return so far
/// * `periods` - Number of daily periods of the whole series (records minus one)
/// * `risk` - Annualized fund risk
///
/// # Returns
///
/// `0.0` when `risk` is exactly zero, otherwise the annualized excess return
/// divided by risk. Any other degeneracy propagates as `inf`/`NaN`.
pub fn sharpe_ratio(
    investment_return: f64,
    benchmark_return: f64,
    periods: usize,
    risk: f64,
) -> f64 {
    if risk == 0.0 {
        return 0.0;
    }

    let n = periods as f64;
    let annual_investment = (investment_return / n) * TRADING_DAYS_PER_YEAR;
    let annual_benchmark = (benchmark_return / n) * TRADING_DAYS_PER_YEAR;

    (annual_investment - annual_benchmark) / risk
}

/// Running minimum that sticks at `NaN` once a `NaN` is seen.
pub fn running_min(current: f64, value: f64) -> f64 {
    if value.is_nan() || value < current {
        value
    } else {
        current
    }
}

/// Running maximum that sticks at `NaN` once a `NaN` is seen.
pub fn running_max(current: f64, value: f64) -> f64 {
    if value.is_nan() || value > current {
        value
    } else {
        current
    }
}

/// Trailing window of "fund met or beat the benchmark" days.
///
/// Each point is 1 or 0. Once the window holds `capacity` points the oldest is
/// evicted before the next one is added.
#[derive(Debug, Clone)]
pub struct ConsistencyWindow {
    points: VecDeque<u8>,
    capacity: usize,
    hits: usize,
}

impl ConsistencyWindow {
    /// Create a window holding at most `capacity` days (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
        }
    }

    /// Maximum number of days kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of days currently in the window.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Record one day and return the updated consistency.
    pub fn push(&mut self, investment_return: f64, benchmark_return: f64) -> f64 {
        if self.points.len() >= self.capacity {
            if let Some(evicted) = self.points.pop_front() {
                self.hits -= evicted as usize;
            }
        }

        let point = u8::from(investment_return >= benchmark_return);
        self.hits += point as usize;
        self.points.push_back(point);

        self.value()
    }

    /// Fraction of days in the window where the fund met or beat the benchmark.
    pub fn value(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.hits as f64 / self.points.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound() {
        let r = compound(compound(0.0, 0.01), 0.02);
        // (1.01)(1.02) - 1
        assert_relative_eq!(r, 0.0302, epsilon = 1e-15);
        assert_eq!(compound(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_annualize_risk() {
        assert_relative_eq!(annualize_risk(0.01), 0.01 * 252.0_f64.sqrt());
        assert_eq!(annualize_risk(0.0), 0.0);
    }

    #[test]
    fn test_sharpe_zero_risk() {
        assert_eq!(sharpe_ratio(0.5, 0.1, 10, 0.0), 0.0);
        assert_eq!(sharpe_ratio(f64::NAN, 0.1, 10, 0.0), 0.0);
    }

    #[test]
    fn test_sharpe_formula() {
        // ((0.10 / 20) * 252 - (0.05 / 20) * 252) / 0.2 = (1.26 - 0.63) / 0.2
        let sharpe = sharpe_ratio(0.10, 0.05, 20, 0.2);
        assert_relative_eq!(sharpe, 3.15, epsilon = 1e-12);

        let negative = sharpe_ratio(0.01, 0.05, 20, 0.2);
        assert!(negative < 0.0);
    }

    #[test]
    fn test_running_extrema() {
        assert_eq!(running_min(0.0, -0.1), -0.1);
        assert_eq!(running_min(0.0, 0.1), 0.0);
        assert_eq!(running_max(0.0, 0.1), 0.1);
        assert_eq!(running_max(0.0, -0.1), 0.0);

        // NaN is kept and not displaced by later values
        let min = running_min(running_min(0.0, f64::NAN), -5.0);
        let max = running_max(running_max(0.0, f64::NAN), 5.0);
        assert!(min.is_nan());
        assert!(max.is_nan());
    }

    #[test]
    fn test_consistency_window_evicts_oldest() {
        let mut window = ConsistencyWindow::new(3);

        assert_eq!(window.push(0.02, 0.01), 1.0); // [1]
        assert_eq!(window.push(0.00, 0.01), 0.5); // [1, 0]
        assert_relative_eq!(window.push(0.01, 0.01), 2.0 / 3.0); // [1, 0, 1]
        assert_relative_eq!(window.push(-0.01, 0.00), 1.0 / 3.0); // [0, 1, 0]
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_consistency_window_bounds() {
        let mut window = ConsistencyWindow::new(5);
        for i in 0..40 {
            let fund = ((i * 7) % 11) as f64 / 100.0 - 0.05;
            let bench = ((i * 3) % 5) as f64 / 100.0 - 0.02;
            let value = window.push(fund, bench);
            assert!((0.0..=1.0).contains(&value));
        }
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn test_consistency_window_zero_capacity() {
        let mut window = ConsistencyWindow::new(0);
        assert_eq!(window.capacity(), 1);
        assert!(window.is_empty());
        assert_eq!(window.value(), 0.0);

        window.push(0.0, 1.0);
        assert_eq!(window.push(1.0, 0.0), 1.0);
        assert_eq!(window.len(), 1);
        assert!(!window.is_empty());
    }

    #[test]
    fn test_consistency_nan_counts_as_miss() {
        let mut window = ConsistencyWindow::new(2);
        assert_eq!(window.push(f64::NAN, 0.0), 0.0);
    }
}
