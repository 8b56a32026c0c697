//! The four ways of consuming a record document.

mod binding;
mod pull;
mod push;
mod tree;

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use crate::reader::ParseError;
use crate::transform::Source;

pub(crate) use pull::pull_tree;

pub(crate) const RECORD_TAG: &str = "artikel";
pub(crate) const HEADING_TAG: &str = "kop";
pub(crate) const ID_ATTRIBUTE: &str = "id";

/// Maximum number of preview headings any strategy collects.
pub const PREVIEW_LIMIT: usize = 10;

/// Heading shown by the tree strategy when an article has no heading text.
pub const FALLBACK_HEADING: &str = "No heading";

/// Record count plus the first [`PREVIEW_LIMIT`] `"{id}: {heading}"` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub count: usize,
    pub preview: Vec<String>,
}

impl RecordSummary {
    pub fn has_room(&self) -> bool {
        self.preview.len() < PREVIEW_LIMIT
    }

    /// Appends a preview line unless the preview is already full.
    pub(crate) fn push_preview(&mut self, id: Option<&str>, heading: &str) {
        if self.has_room() {
            self.preview
                .push(format!("{}: {}", id.unwrap_or_default(), heading));
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown strategy: {0}")]
pub struct UnknownStrategy(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    /// Materialize the whole document, then search it by tag name.
    Tree,
    /// One forward pass with callbacks into a handler.
    EventPush,
    /// One forward pass with an explicit cursor.
    EventPull,
    /// Deserialize into [`crate::Law`] and walk the object graph.
    DataBinding,
}

impl Strategy {
    /// Invocation order of a comparison.
    pub const ALL: [Strategy; 4] = [
        Strategy::Tree,
        Strategy::EventPush,
        Strategy::EventPull,
        Strategy::DataBinding,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Tree => "DOM",
            Strategy::EventPush => "SAX",
            Strategy::EventPull => "StAX",
            Strategy::DataBinding => "Binding",
        }
    }

    /// Counts the articles and collects the heading preview.
    ///
    /// `None` stands for an absent document.
    pub fn parse(&self, xml: Option<&str>) -> Result<RecordSummary, ParseError> {
        match self {
            Strategy::Tree => tree::parse(xml),
            Strategy::EventPush => push::parse(xml),
            Strategy::EventPull => pull::parse(xml),
            Strategy::DataBinding => binding::parse(xml),
        }
    }

    /// Builds this strategy's native representation of the document as stylesheet input.
    pub fn source<'a>(&self, xml: Option<&'a str>) -> Result<Source<'a>, crate::TransformError> {
        match self {
            Strategy::Tree => tree::source(xml),
            Strategy::EventPush => push::source(xml),
            Strategy::EventPull => pull::source(xml),
            Strategy::DataBinding => binding::source(xml),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dom" | "tree" => Ok(Strategy::Tree),
            "sax" | "push" => Ok(Strategy::EventPush),
            "stax" | "pull" => Ok(Strategy::EventPull),
            "binding" | "serde" | "jaxb" => Ok(Strategy::DataBinding),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    #[cfg(test)]
    use pretty_assertions::assert_eq;

    const NESTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wet id="wet-001">
    <metadata>
        <titel>Test Wet</titel>
        <datum>2024-01-01</datum>
    </metadata>
    <hoofdstuk nummer="1">
        <titel>Hoofdstuk 1</titel>
        <artikel id="art-1">
            <kop>Artikel 1</kop>
            <lid nummer="1">Content 1</lid>
        </artikel>
        <artikel id="art-2">
            <kop>Artikel 2</kop>
            <lid nummer="1">Content 2</lid>
        </artikel>
    </hoofdstuk>
</wet>"#;

    #[test]
    fn test_from_str_accepts_names_and_aliases() {
        assert_eq!("DOM".parse::<Strategy>().unwrap(), Strategy::Tree);
        assert_eq!("sax".parse::<Strategy>().unwrap(), Strategy::EventPush);
        assert_eq!("StAX".parse::<Strategy>().unwrap(), Strategy::EventPull);
        assert_eq!("pull".parse::<Strategy>().unwrap(), Strategy::EventPull);
        assert_eq!("jaxb".parse::<Strategy>().unwrap(), Strategy::DataBinding);
        assert_eq!(" Binding ".parse::<Strategy>().unwrap(), Strategy::DataBinding);
    }

    #[test]
    fn test_from_str_rejects_unknown_name() {
        let err = "bogus".parse::<Strategy>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown strategy: bogus");
    }

    #[test]
    fn test_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_all_strategies_agree_on_nested_document() {
        for strategy in Strategy::ALL {
            let summary = strategy.parse(Some(NESTED)).unwrap();
            assert_eq!(summary.count, 2, "{strategy}");
            assert_eq!(
                summary.preview,
                vec!["art-1: Artikel 1", "art-2: Artikel 2"],
                "{strategy}"
            );
        }
    }

    #[test]
    fn test_all_strategies_reject_unclosed_article() {
        let xml = r#"<?xml version="1.0"?><wet><hoofdstuk nummer="1"><artikel id="a">"#;
        for strategy in Strategy::ALL {
            let err = strategy.parse(Some(xml)).unwrap_err();
            assert!(!err.to_string().is_empty(), "{strategy}");
        }
    }

    #[test]
    fn test_all_strategies_reject_absent_document() {
        for strategy in Strategy::ALL {
            assert!(strategy.parse(None).is_err(), "{strategy}");
        }
    }

    #[test]
    fn test_preview_is_capped() {
        let mut summary = RecordSummary::default();
        for i in 0..15 {
            summary.push_preview(Some(&format!("art-{i}")), "kop");
        }
        assert_eq!(summary.preview.len(), PREVIEW_LIMIT);
        assert_eq!(summary.preview[9], "art-9: kop");
    }
}
