//! Rendering a record document to HTML through the shared stylesheet.

mod source;
mod stylesheet;

pub use source::*;
pub use stylesheet::*;

use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use crate::measure::Measurement;
use crate::outcome::TransformOutcome;
use crate::reader::TransformError;
use crate::strategies::Strategy;

/// Value of the `generatedBy` stylesheet parameter.
pub const GENERATED_BY: &str = "XML Strategy Bench";

const LAW_XSL: &str = include_str!("law.xsl");

static LAW_STYLESHEET: Lazy<Result<Stylesheet, String>> =
    Lazy::new(|| Stylesheet::parse(LAW_XSL).map_err(|e| e.to_string()));

/// The compiled stylesheet shared by every render call.
pub fn stylesheet() -> Result<&'static Stylesheet, TransformError> {
    LAW_STYLESHEET
        .as_ref()
        .map_err(|e| TransformError::Stylesheet(e.clone()))
}

fn render_with(strategy: Strategy, xml: Option<&str>) -> Result<String, TransformError> {
    let sheet = stylesheet()?;
    let source = strategy.source(xml)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
    sheet.transform(
        source,
        &[("timestamp", timestamp.as_str()), ("generatedBy", GENERATED_BY)],
    )
}

/// Renders `xml` with the named strategy as transformation source.
///
/// Never fails: unknown strategies and broken documents come back as failed outcomes.
pub fn render(xml: Option<&str>, strategy: &str) -> TransformOutcome {
    let strategy = match strategy.parse::<Strategy>() {
        Ok(s) => s,
        Err(e) => {
            warn!("{}", e);
            return TransformOutcome::new(strategy).fail(e.to_string());
        }
    };

    debug!(strategy = strategy.name(), "rendering document");
    let measurement = Measurement::start();
    let result = render_with(strategy, xml);
    let sample = measurement.finish();

    match result {
        Ok(html) => {
            info!(
                strategy = strategy.name(),
                elapsed_ms = sample.elapsed_ms,
                memory_delta_kb = sample.memory_delta_kb,
                bytes = html.len(),
                "rendered"
            );
            TransformOutcome::new(strategy.name())
                .output(html)
                .timing(sample.elapsed_ms, sample.memory_delta_kb)
        }
        Err(e) => {
            warn!(strategy = strategy.name(), error = %e, "render failed");
            TransformOutcome::new(strategy.name())
                .fail(format!("{} transform error: {}", strategy.name(), e))
        }
    }
}
