//! Fundstats CLI - Command line interface for fund statistics.
//!
//! Reads rows already fetched from the data API and prints the computed
//! series as JSON. Logs go to stderr and are controlled by `RUST_LOG`.

use clap::{Parser, Subcommand};
use fundstats_core::{
    compute_benchmark_statistics, compute_fund_statistics_with, loader, ApiResponse, Benchmark,
    BenchmarkQuote, FundDailyRecord, FundStatisticsOptions,
};
use serde::Serialize;
use serde_json::json;
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fundstats")]
#[command(about = "Fund statistics CLI - returns, risk, Sharpe, consistency and correlation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics of a fund against a benchmark
    Fund {
        /// JSON file with fund rows, newest first ("-" for stdin)
        #[arg(short, long)]
        input: String,
        /// Benchmark to compare against (cdi, bovespa, dolar, euro)
        #[arg(short, long, default_value = "cdi")]
        benchmark: Benchmark,
        /// Consistency window in days (defaults to the whole series)
        #[arg(short, long)]
        window: Option<usize>,
        /// Print only the latest values and extrema
        #[arg(long)]
        summary: bool,
    },
    /// Compute statistics of a benchmark from raw quotes
    Benchmark {
        /// JSON file with quotes, newest first ("-" for stdin)
        #[arg(short, long)]
        input: String,
        /// Benchmark the quotes belong to
        #[arg(short, long)]
        benchmark: Benchmark,
        /// Print only the latest values and extrema
        #[arg(long)]
        summary: bool,
    },
    /// List supported benchmarks
    Benchmarks,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Fund {
            input,
            benchmark,
            window,
            summary,
        } => handle_fund(&input, benchmark, window, summary),
        Commands::Benchmark {
            input,
            benchmark,
            summary,
        } => handle_benchmark(&input, benchmark, summary),
        Commands::Benchmarks => render(ApiResponse::ok(json!({
            "benchmarks": Benchmark::ALL,
        }))),
    };

    println!("{}", output);
}

fn handle_fund(input: &str, benchmark: Benchmark, window: Option<usize>, summary: bool) -> String {
    let records = match read_fund_records(input) {
        Ok(records) => records,
        Err(e) => return render(ApiResponse::<()>::err(e.to_string())),
    };

    let options = FundStatisticsOptions {
        consistency_window: window,
    };

    match compute_fund_statistics_with(&records, benchmark, options) {
        Ok(series) if summary => render(ApiResponse::ok(series.summary())),
        Ok(series) => render(ApiResponse::ok(series)),
        Err(e) => render(ApiResponse::<()>::err(e.to_string())),
    }
}

fn handle_benchmark(input: &str, benchmark: Benchmark, summary: bool) -> String {
    let quotes = match read_benchmark_quotes(input) {
        Ok(quotes) => quotes,
        Err(e) => return render(ApiResponse::<()>::err(e.to_string())),
    };

    match compute_benchmark_statistics(&quotes, benchmark) {
        Ok(series) if summary => render(ApiResponse::ok(series.summary())),
        Ok(series) => render(ApiResponse::ok(series)),
        Err(e) => render(ApiResponse::<()>::err(e.to_string())),
    }
}

fn read_fund_records(input: &str) -> fundstats_core::Result<Vec<FundDailyRecord>> {
    if input == "-" {
        loader::fund_records_from_str(&read_stdin()?)
    } else {
        loader::load_fund_records(input)
    }
}

fn read_benchmark_quotes(input: &str) -> fundstats_core::Result<Vec<BenchmarkQuote>> {
    if input == "-" {
        loader::benchmark_quotes_from_str(&read_stdin()?)
    } else {
        loader::load_benchmark_quotes(input)
    }
}

fn read_stdin() -> io::Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn render<T: Serialize>(response: ApiResponse<T>) -> String {
    serde_json::to_string_pretty(&response).unwrap_or_else(|e| {
        json!({ "ok": false, "error": format!("failed to encode response: {}", e) }).to_string()
    })
}
