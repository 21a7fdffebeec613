//! Input record types and the benchmark catalogue.

use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference index a fund is compared against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Benchmark {
    /// Interbank deposit rate, quoted as a daily percentage.
    Cdi,
    /// Bovespa stock index level.
    Bovespa,
    /// USD/BRL exchange rate.
    Dolar,
    /// EUR/BRL exchange rate.
    Euro,
}

impl Benchmark {
    /// Every supported benchmark, in display order.
    pub const ALL: [Benchmark; 4] = [
        Benchmark::Cdi,
        Benchmark::Bovespa,
        Benchmark::Dolar,
        Benchmark::Euro,
    ];

    /// Field name used for this benchmark in upstream rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Benchmark::Cdi => "cdi",
            Benchmark::Bovespa => "bovespa",
            Benchmark::Dolar => "dolar",
            Benchmark::Euro => "euro",
        }
    }

    /// Whether quotes for this benchmark are already a daily rate rather than a price level.
    pub fn is_rate_quoted(&self) -> bool {
        matches!(self, Benchmark::Cdi)
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Benchmark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Benchmark::ALL
            .into_iter()
            .find(|b| b.as_str() == needle)
            .ok_or_else(|| Error::UnknownBenchmark(s.to_string()))
    }
}

/// One day of a fund's history as served by the data API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundDailyRecord {
    /// Competence date of the row
    pub date: NaiveDate,
    /// Fund daily return as a fraction (0.0012 = 0.12%)
    pub investment_return: f64,
    /// CDI daily return for the same date
    #[serde(default)]
    pub cdi: f64,
    /// Bovespa daily return for the same date
    #[serde(default)]
    pub bovespa: f64,
    /// Dollar daily return for the same date
    #[serde(default)]
    pub dolar: f64,
    /// Euro daily return for the same date
    #[serde(default)]
    pub euro: f64,
    /// Net worth accumulated by the fund
    pub accumulated_networth: f64,
    /// Number of quotaholders in the fund
    pub accumulated_quotaholders: u64,
}

impl FundDailyRecord {
    /// Create a record with all benchmark returns set to zero.
    pub fn new(
        date: NaiveDate,
        investment_return: f64,
        accumulated_networth: f64,
        accumulated_quotaholders: u64,
    ) -> Self {
        Self {
            date,
            investment_return,
            cdi: 0.0,
            bovespa: 0.0,
            dolar: 0.0,
            euro: 0.0,
            accumulated_networth,
            accumulated_quotaholders,
        }
    }

    /// Set the daily return of one benchmark.
    pub fn with_benchmark(mut self, benchmark: Benchmark, daily_return: f64) -> Self {
        match benchmark {
            Benchmark::Cdi => self.cdi = daily_return,
            Benchmark::Bovespa => self.bovespa = daily_return,
            Benchmark::Dolar => self.dolar = daily_return,
            Benchmark::Euro => self.euro = daily_return,
        }
        self
    }

    /// Daily return of the given benchmark on this record's date.
    pub fn benchmark_return(&self, benchmark: Benchmark) -> f64 {
        match benchmark {
            Benchmark::Cdi => self.cdi,
            Benchmark::Bovespa => self.bovespa,
            Benchmark::Dolar => self.dolar,
            Benchmark::Euro => self.euro,
        }
    }
}

/// One raw benchmark quote (index level, exchange rate or CDI rate).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkQuote {
    pub date: NaiveDate,
    pub value: f64,
}

impl BenchmarkQuote {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// JSON envelope printed by the command line tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Wrap a library result, rendering the error with its display message.
    pub fn from_result(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}
