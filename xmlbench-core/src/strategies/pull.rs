use std::io::Read;
use xml::reader::{EventReader, ParserConfig, XmlEvent};

use super::*;
use crate::dom::{TreeBuilder, XmlDocument};

/// Opens an xml-rs cursor positioned before the first event.
pub(crate) fn cursor(xml: &str) -> EventReader<&[u8]> {
    ParserConfig::new()
        .trim_whitespace(false)
        .whitespace_to_characters(true)
        .cdata_to_characters(true)
        .ignore_comments(true)
        .create_reader(xml.as_bytes())
}

/// Reads the text of the element whose start event was just consumed,
/// leaving the cursor after its end event.
fn read_element_text<R: Read>(reader: &mut EventReader<R>) -> Result<String, ParseError> {
    let mut text = String::new();
    loop {
        match reader.next()? {
            XmlEvent::Characters(s) | XmlEvent::Whitespace(s) | XmlEvent::CData(s) => {
                text.push_str(&s)
            }
            XmlEvent::EndElement { .. } => return Ok(text),
            XmlEvent::StartElement { name, .. } => {
                return Err(ParseError::malformed(format!(
                    "text-only content expected, found element <{}>",
                    name.local_name
                )))
            }
            XmlEvent::EndDocument => {
                return Err(ParseError::malformed(
                    "unexpected end of document while reading element text",
                ))
            }
            _ => {}
        }
    }
}

pub(super) fn parse(xml: Option<&str>) -> Result<RecordSummary, ParseError> {
    let mut reader = cursor(xml.ok_or(ParseError::Absent)?);
    let mut summary = RecordSummary::default();
    let mut current_id: Option<String> = None;

    loop {
        match reader.next()? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                if name.local_name == RECORD_TAG {
                    summary.count += 1;
                    current_id = attributes
                        .into_iter()
                        .find(|a| a.name.local_name == ID_ATTRIBUTE)
                        .map(|a| a.value);
                } else if name.local_name == HEADING_TAG && summary.has_room() {
                    let text = read_element_text(&mut reader)?;
                    summary.push_preview(current_id.as_deref(), &text);
                }
            }
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }
    Ok(summary)
}

pub(super) fn source(xml: Option<&str>) -> Result<Source<'_>, crate::TransformError> {
    Ok(Source::Cursor(cursor(xml.ok_or(ParseError::Absent)?)))
}

/// Drains a cursor into an element tree.
pub(crate) fn pull_tree<R: Read>(reader: &mut EventReader<R>) -> Result<XmlDocument, ParseError> {
    let mut builder = TreeBuilder::new();
    loop {
        match reader.next()? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let attributes = attributes
                    .into_iter()
                    .map(|a| (a.name.local_name, a.value))
                    .collect();
                builder.start(name.local_name, attributes)?;
            }
            XmlEvent::Characters(s) | XmlEvent::CData(s) => builder.text(&s)?,
            XmlEvent::EndElement { name } => builder.end(&name.local_name)?,
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {

    use super::*;
    #[cfg(test)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_text_is_read_verbatim() {
        let xml = r#"<wet><artikel id="a1"><kop> Artikel 1 </kop></artikel></wet>"#;
        let summary = parse(Some(xml)).unwrap();
        assert_eq!(summary.preview, vec!["a1:  Artikel 1 "]);
    }

    #[test]
    fn test_heading_with_child_element_fails() {
        let xml = r#"<wet><artikel id="a1"><kop>Artikel <b>1</b></kop></artikel></wet>"#;
        assert!(parse(Some(xml)).is_err());
    }

    #[test]
    fn test_headings_past_the_limit_are_not_read() {
        let mut xml = String::from("<wet>");
        for i in 1..=11 {
            xml.push_str(&format!(r#"<artikel id="art-{i}"><kop>Artikel {i}</kop></artikel>"#));
        }
        // Headings past the preview limit are never read, so nested markup there is tolerated.
        xml.push_str(r#"<artikel id="art-12"><kop>Artikel <b>12</b></kop></artikel></wet>"#);
        let summary = parse(Some(&xml)).unwrap();
        assert_eq!(summary.count, 12);
        assert_eq!(summary.preview.len(), 10);
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(parse(Some("")).is_err());
    }

    #[test]
    fn test_pull_tree() {
        let mut reader = cursor(r#"<wet id="w"><artikel id="a"><kop>K</kop></artikel></wet>"#);
        let doc = pull_tree(&mut reader).unwrap();
        assert_eq!(doc.to_string(), r#"<wet id="w"><artikel id="a"><kop>K</kop></artikel></wet>"#);
    }
}
