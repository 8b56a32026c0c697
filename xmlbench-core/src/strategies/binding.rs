use super::*;
use crate::documents::{BuildXML, Law};
use crate::dom::XmlDocument;
use crate::reader::FromXML;

fn bind(xml: Option<&str>) -> Result<Law, ParseError> {
    Law::from_xml(xml.ok_or(ParseError::NullSource)?.as_bytes())
}

/// Counts by walking chapters -> articles; articles outside a chapter are not counted.
pub(super) fn parse(xml: Option<&str>) -> Result<RecordSummary, ParseError> {
    let law = bind(xml)?;
    let mut summary = RecordSummary::default();
    for article in law.articles() {
        summary.count += 1;
        summary.push_preview(
            article.id.as_deref(),
            article.heading.as_deref().unwrap_or_default(),
        );
    }
    Ok(summary)
}

/// Binds the document, serializes the graph back to XML and loads that as a tree.
pub(super) fn source(xml: Option<&str>) -> Result<Source<'_>, crate::TransformError> {
    let law = bind(xml)?;
    let bytes = law.build()?;
    Ok(Source::Tree(XmlDocument::from_reader(bytes.as_slice())?))
}
