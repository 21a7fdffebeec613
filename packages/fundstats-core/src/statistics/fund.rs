//! Fund statistics: compounded returns, risk, Sharpe, consistency and correlation
//! against a benchmark, computed in a single pass.

use super::correlation::OnlineCorrelation;
use super::ratios::{
    annualize_risk, compound, running_max, running_min, sharpe_ratio, ConsistencyWindow,
};
use super::std_dev::StandardDeviation;
use crate::types::{Benchmark, FundDailyRecord};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Caller-tunable knobs for [`compute_fund_statistics_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundStatisticsOptions {
    /// Length of the benchmark consistency window in days.
    ///
    /// `None` uses the whole series (records minus one).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency_window: Option<usize>,
}

impl FundStatisticsOptions {
    pub fn with_consistency_window(mut self, days: usize) -> Self {
        self.consistency_window = Some(days);
        self
    }
}

/// Statistics for one date of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundPoint {
    pub date: NaiveDate,
    /// Compounded fund return since the anchor
    pub investment_return: f64,
    /// Compounded benchmark return since the anchor
    pub benchmark_investment_return: f64,
    /// Fund compounded return divided by the benchmark's (unguarded)
    pub relative_return: f64,
    /// Annualized fund risk
    pub risk: f64,
    pub sharpe: f64,
    /// Fraction of window days where the fund met or beat the benchmark
    pub consistency: f64,
    pub networth: f64,
    pub quotaholders: u64,
    /// Pearson correlation of daily fund and benchmark returns so far
    pub correlation: f64,
}

impl FundPoint {
    fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            investment_return: 0.0,
            benchmark_investment_return: 0.0,
            relative_return: 0.0,
            risk: 0.0,
            sharpe: 0.0,
            consistency: 0.0,
            networth: 0.0,
            quotaholders: 0,
            correlation: 0.0,
        }
    }

    fn is_finite(&self) -> bool {
        [
            self.investment_return,
            self.benchmark_investment_return,
            self.relative_return,
            self.risk,
            self.sharpe,
            self.correlation,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Running state threaded through the records, oldest to newest.
///
/// Feed the oldest record to [`anchor`](Self::anchor) and every later one to
/// [`step`](Self::step).
#[derive(Debug, Clone)]
pub struct FundStatistics {
    benchmark: Benchmark,
    periods: usize,
    investment_return: f64,
    benchmark_return: f64,
    risk: StandardDeviation,
    correlation: OnlineCorrelation,
    consistency: ConsistencyWindow,
}

impl FundStatistics {
    /// Create the state for a series of `total_records` records.
    pub fn new(benchmark: Benchmark, total_records: usize, options: FundStatisticsOptions) -> Self {
        let periods = total_records.saturating_sub(1);
        let window = options.consistency_window.unwrap_or(periods);

        Self {
            benchmark,
            periods,
            investment_return: 0.0,
            benchmark_return: 0.0,
            risk: StandardDeviation::new(),
            correlation: OnlineCorrelation::new(),
            consistency: ConsistencyWindow::new(window),
        }
    }

    pub fn benchmark(&self) -> Benchmark {
        self.benchmark
    }

    /// Baseline point for the oldest record.
    ///
    /// Every figure is zero, including networth and quotaholders; the record
    /// only contributes its date.
    pub fn anchor(&self, record: &FundDailyRecord) -> FundPoint {
        FundPoint::zero(record.date)
    }

    /// Fold one record (the next day after the previous one) into the state.
    pub fn step(&mut self, record: &FundDailyRecord) -> FundPoint {
        let daily_investment = record.investment_return;
        let daily_benchmark = record.benchmark_return(self.benchmark);

        self.investment_return = compound(self.investment_return, daily_investment);
        self.benchmark_return = compound(self.benchmark_return, daily_benchmark);

        self.risk.add_measurement(daily_investment);
        let risk = annualize_risk(self.risk.get());

        let sharpe = sharpe_ratio(
            self.investment_return,
            self.benchmark_return,
            self.periods,
            risk,
        );
        let consistency = self.consistency.push(daily_investment, daily_benchmark);
        let correlation = self.correlation.add(daily_investment, daily_benchmark);

        FundPoint {
            date: record.date,
            investment_return: self.investment_return,
            benchmark_investment_return: self.benchmark_return,
            relative_return: self.investment_return / self.benchmark_return,
            risk,
            sharpe,
            consistency,
            networth: record.accumulated_networth,
            quotaholders: record.accumulated_quotaholders,
            correlation,
        }
    }
}

/// Parallel output arrays, oldest date first, plus running extrema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSeries {
    pub benchmark: Benchmark,
    pub date: Vec<NaiveDate>,
    pub investment_return: Vec<f64>,
    pub benchmark_investment_return: Vec<f64>,
    pub relative_return: Vec<f64>,
    pub risk: Vec<f64>,
    pub sharpe: Vec<f64>,
    pub consistency: Vec<f64>,
    pub networth: Vec<f64>,
    pub quotaholders: Vec<u64>,
    pub correlation: Vec<f64>,
    pub min_investment_return: f64,
    pub max_investment_return: f64,
    pub min_benchmark_investment_return: f64,
    pub max_benchmark_investment_return: f64,
}

impl StatisticsSeries {
    /// Create an empty series with room for `capacity` points.
    pub fn with_capacity(benchmark: Benchmark, capacity: usize) -> Self {
        Self {
            benchmark,
            date: Vec::with_capacity(capacity),
            investment_return: Vec::with_capacity(capacity),
            benchmark_investment_return: Vec::with_capacity(capacity),
            relative_return: Vec::with_capacity(capacity),
            risk: Vec::with_capacity(capacity),
            sharpe: Vec::with_capacity(capacity),
            consistency: Vec::with_capacity(capacity),
            networth: Vec::with_capacity(capacity),
            quotaholders: Vec::with_capacity(capacity),
            correlation: Vec::with_capacity(capacity),
            min_investment_return: 0.0,
            max_investment_return: 0.0,
            min_benchmark_investment_return: 0.0,
            max_benchmark_investment_return: 0.0,
        }
    }

    /// Append a point and fold its compounded returns into the extrema.
    pub fn push(&mut self, point: FundPoint) {
        self.date.push(point.date);
        self.investment_return.push(point.investment_return);
        self.benchmark_investment_return
            .push(point.benchmark_investment_return);
        self.relative_return.push(point.relative_return);
        self.risk.push(point.risk);
        self.sharpe.push(point.sharpe);
        self.consistency.push(point.consistency);
        self.networth.push(point.networth);
        self.quotaholders.push(point.quotaholders);
        self.correlation.push(point.correlation);

        self.min_investment_return =
            running_min(self.min_investment_return, point.investment_return);
        self.max_investment_return =
            running_max(self.max_investment_return, point.investment_return);
        self.min_benchmark_investment_return = running_min(
            self.min_benchmark_investment_return,
            point.benchmark_investment_return,
        );
        self.max_benchmark_investment_return = running_max(
            self.max_benchmark_investment_return,
            point.benchmark_investment_return,
        );
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// Row view of the point at `index`.
    pub fn point(&self, index: usize) -> Option<FundPoint> {
        Some(FundPoint {
            date: *self.date.get(index)?,
            investment_return: *self.investment_return.get(index)?,
            benchmark_investment_return: *self.benchmark_investment_return.get(index)?,
            relative_return: *self.relative_return.get(index)?,
            risk: *self.risk.get(index)?,
            sharpe: *self.sharpe.get(index)?,
            consistency: *self.consistency.get(index)?,
            networth: *self.networth.get(index)?,
            quotaholders: *self.quotaholders.get(index)?,
            correlation: *self.correlation.get(index)?,
        })
    }

    /// Iterate the series as rows, oldest first.
    pub fn points(&self) -> impl Iterator<Item = FundPoint> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }

    /// Newest point together with the extrema.
    pub fn summary(&self) -> Option<FundSummary> {
        if self.is_empty() {
            return None;
        }
        let latest = self.point(self.len() - 1)?;
        Some(FundSummary {
            benchmark: self.benchmark,
            latest,
            min_investment_return: self.min_investment_return,
            max_investment_return: self.max_investment_return,
            min_benchmark_investment_return: self.min_benchmark_investment_return,
            max_benchmark_investment_return: self.max_benchmark_investment_return,
        })
    }
}

/// Headline figures of a fund series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    pub benchmark: Benchmark,
    pub latest: FundPoint,
    pub min_investment_return: f64,
    pub max_investment_return: f64,
    pub min_benchmark_investment_return: f64,
    pub max_benchmark_investment_return: f64,
}

/// Compute fund statistics with default options.
///
/// # Arguments
///
/// * `records` - Daily records of one fund, newest first
/// * `benchmark` - Which benchmark return of each record to compare against
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use fundstats_core::{compute_fund_statistics, Benchmark, FundDailyRecord};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let records = vec![
///     FundDailyRecord::new(day(3), 0.02, 1_100.0, 12).with_benchmark(Benchmark::Cdi, 0.001),
///     FundDailyRecord::new(day(2), 0.01, 1_050.0, 11).with_benchmark(Benchmark::Cdi, 0.001),
///     FundDailyRecord::new(day(1), 0.00, 1_000.0, 10).with_benchmark(Benchmark::Cdi, 0.001),
/// ];
///
/// let series = compute_fund_statistics(&records, Benchmark::Cdi).unwrap();
/// assert_eq!(series.date[0], day(1));
/// assert!((series.investment_return[2] - 0.0302).abs() < 1e-12);
/// ```
pub fn compute_fund_statistics(
    records: &[FundDailyRecord],
    benchmark: Benchmark,
) -> Result<StatisticsSeries> {
    compute_fund_statistics_with(records, benchmark, FundStatisticsOptions::default())
}

/// Compute fund statistics.
///
/// Records must be ordered newest first; they are walked from the oldest
/// one, which serves as the zero baseline. Returns [`Error::NoData`] when
/// `records` is empty.
pub fn compute_fund_statistics_with(
    records: &[FundDailyRecord],
    benchmark: Benchmark,
    options: FundStatisticsOptions,
) -> Result<StatisticsSeries> {
    let (anchor, rest) = records.split_last().ok_or_else(|| {
        Error::NoData(format!("no fund records to compare against {}", benchmark))
    })?;

    let _span = tracing::debug_span!(
        "fund_statistics",
        %benchmark,
        records = records.len(),
        window = ?options.consistency_window
    )
    .entered();

    let mut state = FundStatistics::new(benchmark, records.len(), options);
    let mut series = StatisticsSeries::with_capacity(benchmark, records.len());
    series.push(state.anchor(anchor));

    let mut reported_non_finite = false;
    for record in rest.iter().rev() {
        let point = state.step(record);
        if !reported_non_finite && !point.is_finite() {
            tracing::warn!(
                benchmark = %state.benchmark(),
                date = %point.date,
                "non-finite value in fund statistics"
            );
            reported_non_finite = true;
        }
        series.push(point);
    }

    tracing::debug!(
        points = series.len(),
        min = series.min_investment_return,
        max = series.max_investment_return,
        "fund statistics computed"
    );

    Ok(series)
}
