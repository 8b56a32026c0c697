use serde::Serialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::BenchConfig;
use crate::measure;
use crate::outcome::ParseOutcome;
use crate::strategies::Strategy;

/// Mean elapsed time above which streaming strategies are recommended.
const LARGE_DOCUMENT_MS: u64 = 100;

/// Outcomes of every strategy on one document, plus derived rankings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub results: Vec<ParseOutcome>,
    pub fastest: Option<String>,
    pub least_memory: Option<String>,
    pub recommendation: Option<String>,
}

impl ComparisonReport {
    pub fn new() -> ComparisonReport {
        Default::default()
    }

    pub fn add_result(mut self, outcome: ParseOutcome) -> Self {
        self.results.push(outcome);
        self
    }

    /// Derives the rankings from the succeeded outcomes and the recommendation from all of them.
    pub fn compute_statistics(mut self) -> Self {
        let succeeded = || self.results.iter().filter(|r| r.succeeded());

        self.fastest = succeeded()
            .min_by_key(|r| r.elapsed_ms)
            .map(|r| format!("{} ({}ms)", r.strategy, r.elapsed_ms));
        self.least_memory = succeeded()
            .min_by_key(|r| r.memory_delta_kb)
            .map(|r| format!("{} ({}KB)", r.strategy, r.memory_delta_kb));

        self.recommendation = if self.results.is_empty() {
            None
        } else {
            let total: u64 = succeeded().map(|r| r.elapsed_ms).sum();
            let mean = total / self.results.len() as u64;
            let mut text = String::from("For this document: ");
            if mean > LARGE_DOCUMENT_MS {
                text.push_str("SAX or StAX recommended (large document). ");
            } else {
                text.push_str("DOM is acceptable (small document). ");
            }
            text.push_str("Binding for type-safe APIs.");
            Some(text)
        };
        self
    }
}

/// Runs every strategy once, in [`Strategy::ALL`] order, with the default configuration.
pub fn compare_all(xml: Option<&str>) -> ComparisonReport {
    compare_all_with(xml, &BenchConfig::default())
}

pub fn compare_all_with(xml: Option<&str>, config: &BenchConfig) -> ComparisonReport {
    let mut report = ComparisonReport::new();
    for (i, strategy) in Strategy::ALL.into_iter().enumerate() {
        if i > 0 && config.settle_millis > 0 {
            thread::sleep(Duration::from_millis(config.settle_millis));
        }
        debug!(strategy = strategy.name(), "running");
        let outcome = measure::run(strategy, || strategy.parse(xml));
        match outcome.error() {
            None => info!(
                strategy = strategy.name(),
                records = outcome.record_count,
                elapsed_ms = outcome.elapsed_ms,
                memory_delta_kb = outcome.memory_delta_kb,
                "parsed"
            ),
            Some(e) => info!(strategy = strategy.name(), error = e, "failed"),
        }
        report = report.add_result(outcome);
    }

    let report = report.compute_statistics();
    info!(
        fastest = ?report.fastest,
        least_memory = ?report.least_memory,
        "comparison finished"
    );
    report
}
