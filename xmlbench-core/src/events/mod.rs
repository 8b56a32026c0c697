//! Push-style traversal: a single forward pass over the document that
//! notifies a [`ContentHandler`] of every element boundary and text run.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::dom::read_element;
use crate::reader::ParseError;

/// Receiver of document events, in document order.
///
/// Empty elements (`<x/>`) are reported as a start immediately followed by an end.
pub trait ContentHandler {
    fn start_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, String)>,
    ) -> Result<(), ParseError>;

    fn characters(&mut self, text: &str) -> Result<(), ParseError>;

    fn end_element(&mut self, name: &str) -> Result<(), ParseError>;
}

/// A borrowed document that pushes its events into a handler when driven.
#[derive(Debug, Clone, Copy)]
pub struct EventSource<'a> {
    xml: &'a str,
}

impl<'a> EventSource<'a> {
    pub fn new(xml: &'a str) -> Self {
        EventSource { xml }
    }

    pub fn drive<H: ContentHandler>(self, handler: &mut H) -> Result<(), ParseError> {
        let mut reader = Reader::from_str(self.xml);
        reader.config_mut().trim_text(false);

        let mut depth = 0usize;
        let mut seen_root = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    check_single_root(depth, seen_root)?;
                    let (name, attributes) = read_element(&e)?;
                    depth += 1;
                    seen_root = true;
                    handler.start_element(&name, attributes)?;
                }
                Event::Empty(e) => {
                    check_single_root(depth, seen_root)?;
                    let (name, attributes) = read_element(&e)?;
                    seen_root = true;
                    handler.start_element(&name, attributes)?;
                    handler.end_element(&name)?;
                }
                Event::End(e) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| ParseError::malformed("Unexpected end tag"))?;
                    handler.end_element(std::str::from_utf8(e.name().as_ref())?)?;
                }
                Event::Text(t) => {
                    let text = t.unescape()?;
                    if depth > 0 {
                        handler.characters(&text)?;
                    } else if !text.trim().is_empty() {
                        return Err(ParseError::malformed(
                            "Content is not allowed outside the root element",
                        ));
                    }
                }
                Event::CData(t) => {
                    if depth == 0 {
                        return Err(ParseError::malformed(
                            "CDATA is not allowed outside the root element",
                        ));
                    }
                    handler.characters(std::str::from_utf8(&t)?)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth > 0 {
            return Err(ParseError::malformed(
                "XML document structures must start and end within the same entity",
            ));
        }
        if !seen_root {
            return Err(ParseError::malformed(
                "Premature end of file: no root element found",
            ));
        }
        Ok(())
    }
}

fn check_single_root(depth: usize, seen_root: bool) -> Result<(), ParseError> {
    if depth == 0 && seen_root {
        return Err(ParseError::malformed(
            "The markup following the root element must be well-formed",
        ));
    }
    Ok(())
}
