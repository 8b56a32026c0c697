use super::*;
use crate::events::{ContentHandler, EventSource};

/// Per-call handler state; a fresh value is created for every parse.
#[derive(Debug, Default)]
struct ArticleHandler {
    summary: RecordSummary,
    in_heading: bool,
    heading: String,
    current_id: Option<String>,
}

impl ContentHandler for ArticleHandler {
    fn start_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, String)>,
    ) -> Result<(), ParseError> {
        if name == RECORD_TAG {
            self.summary.count += 1;
            self.current_id = attributes
                .into_iter()
                .find(|(k, _)| k == ID_ATTRIBUTE)
                .map(|(_, v)| v);
        } else if name == HEADING_TAG {
            self.in_heading = true;
            self.heading.clear();
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), ParseError> {
        if self.in_heading {
            self.heading.push_str(text);
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), ParseError> {
        if name == HEADING_TAG {
            self.summary
                .push_preview(self.current_id.as_deref(), self.heading.trim());
            self.in_heading = false;
        }
        Ok(())
    }
}

fn events(xml: Option<&str>) -> Result<EventSource<'_>, ParseError> {
    Ok(EventSource::new(xml.ok_or(ParseError::Absent)?))
}

pub(super) fn parse(xml: Option<&str>) -> Result<RecordSummary, ParseError> {
    let mut handler = ArticleHandler::default();
    events(xml)?.drive(&mut handler)?;
    Ok(handler.summary)
}

pub(super) fn source(xml: Option<&str>) -> Result<Source<'_>, crate::TransformError> {
    Ok(Source::Events(events(xml)?))
}

#[cfg(test)]
mod tests {

    use super::*;
    #[cfg(test)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_text_is_trimmed() {
        let xml = r#"<wet><hoofdstuk><artikel id="a1"><kop>
            Artikel 1 - Definities
        </kop></artikel></hoofdstuk></wet>"#;
        let summary = parse(Some(xml)).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.preview, vec!["a1: Artikel 1 - Definities"]);
    }

    #[test]
    fn test_empty_heading_is_kept_empty() {
        let summary = parse(Some(r#"<wet><artikel id="x"><kop/></artikel></wet>"#)).unwrap();
        assert_eq!(summary.preview, vec!["x: "]);
    }

    #[test]
    fn test_heading_takes_id_of_enclosing_article() {
        let xml = r#"<wet>
            <artikel id="a"><kop>Eerste</kop></artikel>
            <artikel><kop>Zonder id</kop></artikel>
        </wet>"#;
        let summary = parse(Some(xml)).unwrap();
        assert_eq!(summary.preview, vec!["a: Eerste", ": Zonder id"]);
    }

    #[test]
    fn test_mismatched_tags_fail() {
        assert!(parse(Some("<wet><artikel></wet>")).is_err());
    }
}
