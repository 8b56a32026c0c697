use serde::Serialize;

use crate::strategies::RecordSummary;

/// Result of running one parsing strategy once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub strategy: String,
    pub record_count: usize,
    pub preview: Vec<String>,
    pub elapsed_ms: u64,
    pub memory_delta_kb: u64,
    succeeded: bool,
    error: Option<String>,
}

impl ParseOutcome {
    pub fn new(strategy: impl Into<String>) -> ParseOutcome {
        ParseOutcome {
            strategy: strategy.into(),
            record_count: 0,
            preview: Vec::new(),
            elapsed_ms: 0,
            memory_delta_kb: 0,
            succeeded: true,
            error: None,
        }
    }

    pub fn summary(mut self, summary: RecordSummary) -> Self {
        self.record_count = summary.count;
        self.preview = summary.preview;
        self
    }

    pub fn timing(mut self, elapsed_ms: u64, memory_delta_kb: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self.memory_delta_kb = memory_delta_kb;
        self
    }

    /// Records an error. Always clears the success flag.
    pub fn fail(mut self, msg: impl Into<String>) -> Self {
        self.error = Some(msg.into());
        self.succeeded = false;
        self
    }

    /// Clears the success flag without attaching a message.
    pub fn mark_failed(mut self) -> Self {
        self.succeeded = false;
        self
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Result of rendering a document through the shared stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutcome {
    pub strategy: String,
    output: Option<String>,
    pub elapsed_ms: u64,
    pub memory_delta_kb: u64,
    succeeded: bool,
    error: Option<String>,
}

impl TransformOutcome {
    /// A fresh outcome is unsuccessful until output is attached.
    pub fn new(strategy: impl Into<String>) -> TransformOutcome {
        TransformOutcome {
            strategy: strategy.into(),
            output: None,
            elapsed_ms: 0,
            memory_delta_kb: 0,
            succeeded: false,
            error: None,
        }
    }

    pub fn output(mut self, markup: impl Into<String>) -> Self {
        self.output = Some(markup.into());
        self.succeeded = true;
        self.error = None;
        self
    }

    pub fn timing(mut self, elapsed_ms: u64, memory_delta_kb: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self.memory_delta_kb = memory_delta_kb;
        self
    }

    /// Records an error and drops any output. Always clears the success flag.
    pub fn fail(mut self, msg: impl Into<String>) -> Self {
        self.error = Some(msg.into());
        self.output = None;
        self.succeeded = false;
        self
    }

    pub fn markup(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    #[cfg(test)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_parse_outcome_succeeds() {
        let outcome = ParseOutcome::new("DOM");
        assert!(outcome.succeeded());
        assert_eq!(outcome.error(), None);
    }

    #[test]
    fn test_fail_forces_unsuccessful() {
        let outcome = ParseOutcome::new("SAX")
            .summary(RecordSummary {
                count: 3,
                preview: vec!["a: b".to_string()],
            })
            .fail("SAX parsing error: boom");
        assert!(!outcome.succeeded());
        assert_eq!(outcome.error(), Some("SAX parsing error: boom"));
    }

    #[test]
    fn test_mark_failed_has_no_message() {
        let outcome = ParseOutcome::new("StAX").mark_failed();
        assert!(!outcome.succeeded());
        assert_eq!(outcome.error(), None);
    }

    #[test]
    fn test_transform_outcome_markup_present_iff_success() {
        let pending = TransformOutcome::new("DOM");
        assert!(!pending.succeeded());
        assert_eq!(pending.markup(), None);

        let done = pending.output("<html></html>");
        assert!(done.succeeded());
        assert_eq!(done.markup(), Some("<html></html>"));

        let failed = done.fail("DOM transform error: x");
        assert!(!failed.succeeded());
        assert_eq!(failed.markup(), None);
    }

    #[test]
    fn test_parse_outcome_json() {
        let outcome = ParseOutcome::new("Binding").timing(4, 12);
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(
            json,
            r#"{"strategy":"Binding","recordCount":0,"preview":[],"elapsedMs":4,"memoryDeltaKb":12,"succeeded":true,"error":null}"#
        );
    }
}
