//! Wall-clock and heap instrumentation around a single strategy call.

use std::time::Instant;

/// Heap accounting allocator. Install it in a binary or test harness to get non-zero memory deltas:
///
/// ```ignore
/// #[global_allocator]
/// static ALLOC: xmlbench::PeakAlloc = xmlbench::PeakAlloc;
/// ```
pub use peak_alloc::PeakAlloc;

use crate::outcome::ParseOutcome;
use crate::reader::ParseError;
use crate::strategies::{RecordSummary, Strategy};

/// Elapsed time and heap growth of one measured call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    pub elapsed_ms: u64,
    pub memory_delta_kb: u64,
}

/// An in-flight measurement. Calls must not overlap: the heap counters are process-wide.
#[derive(Debug)]
pub struct Measurement {
    started: Instant,
    baseline: usize,
}

impl Measurement {
    pub fn start() -> Measurement {
        PeakAlloc.reset_peak_usage();
        Measurement {
            started: Instant::now(),
            baseline: PeakAlloc.current_usage(),
        }
    }

    pub fn finish(self) -> Sample {
        let elapsed = self.started.elapsed();
        let grown = PeakAlloc.peak_usage().saturating_sub(self.baseline);
        Sample {
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            memory_delta_kb: (grown / 1024) as u64,
        }
    }
}

/// Runs `f` once under measurement and flattens its result into a [`ParseOutcome`].
pub fn run<F>(strategy: Strategy, f: F) -> ParseOutcome
where
    F: FnOnce() -> Result<RecordSummary, ParseError>,
{
    let measurement = Measurement::start();
    let result = f();
    let sample = measurement.finish();

    match result {
        Ok(summary) => ParseOutcome::new(strategy.name())
            .summary(summary)
            .timing(sample.elapsed_ms, sample.memory_delta_kb),
        Err(e) => ParseOutcome::new(strategy.name())
            .fail(format!("{} parsing error: {}", strategy.name(), e)),
    }
}
