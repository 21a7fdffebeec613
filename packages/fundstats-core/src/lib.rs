//! Fundstats Core - Fund performance statistics.
//!
//! Turns a fund's daily history into the series plotted on a fund dashboard:
//!
//! - **Compounded returns**: fund and benchmark, plus their ratio
//! - **Risk metrics**: annualized risk, Sharpe ratio against the benchmark
//! - **Benchmark comparison**: rolling consistency, online Pearson correlation
//! - **Benchmarks on their own**: compounded return and risk from raw quotes
//!
//! # Example
//!
//! ```rust,no_run
//! use fundstats_core::{compute_fund_statistics, loader, Benchmark};
//!
//! // Rows as returned by the data API, newest first
//! let records = loader::load_fund_records("fund.json").unwrap();
//! let series = compute_fund_statistics(&records, Benchmark::Cdi).unwrap();
//!
//! if let Some(summary) = series.summary() {
//!     println!("Return: {:.2}%", summary.latest.investment_return * 100.0);
//!     println!("Sharpe: {:.2}", summary.latest.sharpe);
//! }
//! ```

pub mod loader;
pub mod statistics;
pub mod types;

// Re-export commonly used types
pub use types::{ApiResponse, Benchmark, BenchmarkQuote, FundDailyRecord};

// Re-export main functionality
pub use statistics::{
    compute_benchmark_statistics, compute_fund_statistics, compute_fund_statistics_with,
    BenchmarkStatisticsSeries, BenchmarkSummary, FundPoint, FundStatisticsOptions, FundSummary,
    StandardDeviation, StatisticsSeries, TRADING_DAYS_PER_YEAR,
};

/// Error types for fundstats-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Unknown benchmark: {0}")]
    UnknownBenchmark(String),
}

/// Result type for fundstats-core operations.
pub type Result<T> = std::result::Result<T, Error>;
