//! Streaming performance statistics.
//!
//! Both engines walk a newest-first series from its oldest record, treat that
//! record as a zero baseline and emit one point per record, oldest first.

mod benchmark;
mod correlation;
mod fund;
mod ratios;
mod std_dev;

pub use benchmark::{
    compute_benchmark_statistics, daily_returns, quote_return, BenchmarkPoint,
    BenchmarkStatistics, BenchmarkStatisticsSeries, BenchmarkSummary,
};
pub use correlation::OnlineCorrelation;
pub use fund::{
    compute_fund_statistics, compute_fund_statistics_with, FundPoint, FundStatistics,
    FundStatisticsOptions, FundSummary, StatisticsSeries,
};
pub use ratios::{
    annualize_risk, compound, running_max, running_min, sharpe_ratio, ConsistencyWindow,
    TRADING_DAYS_PER_YEAR,
};
pub use std_dev::StandardDeviation;
