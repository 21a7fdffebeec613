//! Benchmark statistics computed directly from raw quotes.

use super::ratios::{annualize_risk, compound, running_max, running_min};
use super::std_dev::StandardDeviation;
use crate::types::{Benchmark, BenchmarkQuote};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Convert a quote into a daily return.
///
/// `previous` is the quote of the day before; without it the return is 0.
/// CDI is quoted as a daily percentage rate, so its return is `value / 100`.
/// Every other benchmark is a price level and returns `value / previous - 1`.
pub fn quote_return(benchmark: Benchmark, value: f64, previous: Option<f64>) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };

    if benchmark.is_rate_quoted() {
        value / 100.0
    } else {
        value / previous - 1.0
    }
}

/// Daily returns of newest-first `quotes`, returned oldest first.
pub fn daily_returns(quotes: &[BenchmarkQuote], benchmark: Benchmark) -> Vec<f64> {
    let mut previous = None;
    quotes
        .iter()
        .rev()
        .map(|quote| {
            let daily = quote_return(benchmark, quote.value, previous);
            previous = Some(quote.value);
            daily
        })
        .collect()
}

/// Statistics of a benchmark for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    pub date: NaiveDate,
    /// Compounded return since the anchor
    pub investment_return: f64,
    /// Annualized risk
    pub risk: f64,
}

/// Running state for a benchmark series, oldest quote first.
#[derive(Debug, Clone)]
pub struct BenchmarkStatistics {
    benchmark: Benchmark,
    investment_return: f64,
    risk: StandardDeviation,
    previous: Option<f64>,
}

impl BenchmarkStatistics {
    pub fn new(benchmark: Benchmark) -> Self {
        Self {
            benchmark,
            investment_return: 0.0,
            risk: StandardDeviation::new(),
            previous: None,
        }
    }

    /// Baseline point for the oldest quote. Only its value is remembered.
    pub fn anchor(&mut self, quote: &BenchmarkQuote) -> BenchmarkPoint {
        self.previous = Some(quote.value);
        BenchmarkPoint {
            date: quote.date,
            investment_return: 0.0,
            risk: 0.0,
        }
    }

    /// Fold the next day's quote into the state.
    pub fn step(&mut self, quote: &BenchmarkQuote) -> BenchmarkPoint {
        let daily = quote_return(self.benchmark, quote.value, self.previous);
        self.previous = Some(quote.value);

        self.investment_return = compound(self.investment_return, daily);
        self.risk.add_measurement(daily);

        BenchmarkPoint {
            date: quote.date,
            investment_return: self.investment_return,
            risk: annualize_risk(self.risk.get()),
        }
    }
}

/// Parallel output arrays for a benchmark, oldest date first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStatisticsSeries {
    pub benchmark: Benchmark,
    pub date: Vec<NaiveDate>,
    pub investment_return: Vec<f64>,
    pub risk: Vec<f64>,
    pub min_investment_return: f64,
    pub max_investment_return: f64,
}

impl BenchmarkStatisticsSeries {
    pub fn with_capacity(benchmark: Benchmark, capacity: usize) -> Self {
        Self {
            benchmark,
            date: Vec::with_capacity(capacity),
            investment_return: Vec::with_capacity(capacity),
            risk: Vec::with_capacity(capacity),
            min_investment_return: 0.0,
            max_investment_return: 0.0,
        }
    }

    pub fn push(&mut self, point: BenchmarkPoint) {
        self.date.push(point.date);
        self.investment_return.push(point.investment_return);
        self.risk.push(point.risk);

        self.min_investment_return =
            running_min(self.min_investment_return, point.investment_return);
        self.max_investment_return =
            running_max(self.max_investment_return, point.investment_return);
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<BenchmarkPoint> {
        Some(BenchmarkPoint {
            date: *self.date.get(index)?,
            investment_return: *self.investment_return.get(index)?,
            risk: *self.risk.get(index)?,
        })
    }

    /// Newest point together with the extrema.
    pub fn summary(&self) -> Option<BenchmarkSummary> {
        if self.is_empty() {
            return None;
        }
        let latest = self.point(self.len() - 1)?;
        Some(BenchmarkSummary {
            benchmark: self.benchmark,
            latest,
            min_investment_return: self.min_investment_return,
            max_investment_return: self.max_investment_return,
        })
    }
}

/// Headline figures of a benchmark series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub benchmark: Benchmark,
    pub latest: BenchmarkPoint,
    pub min_investment_return: f64,
    pub max_investment_return: f64,
}

/// Compute compounded return and risk for a benchmark.
///
/// `quotes` must be ordered newest first. Returns [`Error::NoData`] when empty.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use fundstats_core::{compute_benchmark_statistics, Benchmark, BenchmarkQuote};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let quotes = vec![
///     BenchmarkQuote::new(day(3), 121.0),
///     BenchmarkQuote::new(day(2), 110.0),
///     BenchmarkQuote::new(day(1), 100.0),
/// ];
///
/// let series = compute_benchmark_statistics(&quotes, Benchmark::Bovespa).unwrap();
/// assert!((series.investment_return[2] - 0.21).abs() < 1e-12);
/// ```
pub fn compute_benchmark_statistics(
    quotes: &[BenchmarkQuote],
    benchmark: Benchmark,
) -> Result<BenchmarkStatisticsSeries> {
    let (anchor, rest) = quotes
        .split_last()
        .ok_or_else(|| Error::NoData(format!("no {} quotes", benchmark)))?;

    let _span =
        tracing::debug_span!("benchmark_statistics", %benchmark, quotes = quotes.len()).entered();

    let mut state = BenchmarkStatistics::new(benchmark);
    let mut series = BenchmarkStatisticsSeries::with_capacity(benchmark, quotes.len());
    series.push(state.anchor(anchor));

    let mut reported_non_finite = false;
    for quote in rest.iter().rev() {
        let point = state.step(quote);
        if !reported_non_finite && !(point.investment_return.is_finite() && point.risk.is_finite())
        {
            tracing::warn!(date = %point.date, "non-finite value in benchmark statistics");
            reported_non_finite = true;
        }
        series.push(point);
    }

    tracing::debug!(points = series.len(), "benchmark statistics computed");

    Ok(series)
}
