use super::*;
use crate::dom::{XmlDocument, XmlElement};

fn load(xml: Option<&str>) -> Result<XmlDocument, ParseError> {
    xml.ok_or(ParseError::Absent)?.parse()
}

fn heading_of(article: &XmlElement) -> String {
    article
        .elements_by_tag_name(HEADING_TAG)
        .next()
        .map(|kop| kop.text_content())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| FALLBACK_HEADING.to_string())
}

pub(super) fn parse(xml: Option<&str>) -> Result<RecordSummary, ParseError> {
    let doc = load(xml)?;
    let articles: Vec<&XmlElement> = doc.elements_by_tag_name(RECORD_TAG).collect();

    let mut summary = RecordSummary {
        count: articles.len(),
        preview: Vec::with_capacity(articles.len().min(PREVIEW_LIMIT)),
    };
    for article in articles.iter().take(PREVIEW_LIMIT) {
        summary.push_preview(article.attribute(ID_ATTRIBUTE), &heading_of(article));
    }
    Ok(summary)
}

pub(super) fn source(xml: Option<&str>) -> Result<Source<'_>, crate::TransformError> {
    Ok(Source::Tree(load(xml)?))
}
