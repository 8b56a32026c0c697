// Licensed under either of
//
// Apache License, Version 2.0, (LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0)
// MIT license (LICENSE-MIT or http://opensource.org/licenses/MIT)
// at your option.
//
// Contribution
// Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::io::{BufReader, Cursor, Read};
use std::str::FromStr;

use crate::events::ContentHandler;
use crate::reader::ParseError;

/// Deepest element nesting a [`TreeBuilder`] accepts.
pub const MAX_DEPTH: usize = 512;

/// An XML document materialized as an owned element tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XmlDocument {
    /// Top-level elements. Documents produced by [`TreeBuilder`] hold exactly one.
    pub roots: Vec<XmlElement>,
}

impl Display for XmlDocument {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for item in self.roots.iter() {
            item.fmt(f)?;
        }
        Ok(())
    }
}

/// Content of an element, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        }
    }
}

/// An XML element.
///
/// For example:
///
/// ```XML
/// <artikel id="art-1">
///     <kop>Artikel 1</kop>
/// </artikel>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XmlElement {
    /// Name of the tag (i.e. "artikel")
    pub name: String,
    /// Key-value pairs of the attributes (i.e. ("id", "art-1"))
    pub attributes: Vec<(String, String)>,
    /// Text runs and sub elements (i.e. the "kop" element)
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |c| c.name == name)
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.elements().collect::<Vec<_>>().into_iter().rev().collect(),
        }
    }

    pub fn elements_by_tag_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> {
        self.descendants().filter(move |e| e.name == name)
    }

    /// All text inside this element, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<&XmlNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(e) => stack.extend(e.children.iter().rev()),
            }
        }
        out
    }
}

enum Step<'a> {
    Open(&'a XmlElement),
    Text(&'a str),
    Close(&'a str),
}

impl Display for XmlElement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut stack = vec![Step::Open(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(e) => {
                    write!(f, "<{}", e.name)?;
                    for (key, val) in e.attributes.iter() {
                        write!(f, r#" {}="{}""#, key, escape(val.as_str()))?;
                    }
                    f.write_str(">")?;
                    stack.push(Step::Close(&e.name));
                    for child in e.children.iter().rev() {
                        stack.push(match child {
                            XmlNode::Element(c) => Step::Open(c),
                            XmlNode::Text(t) => Step::Text(t),
                        });
                    }
                }
                Step::Text(t) => f.write_str(&escape(t))?,
                Step::Close(name) => write!(f, "</{}>", name)?,
            }
        }
        Ok(())
    }
}

/// Pre-order iterator over the descendant elements of an element.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(next.elements());
        self.stack[start..].reverse();
        Some(next)
    }
}

pub(crate) fn read_element(e: &BytesStart) -> Result<(String, Vec<(String, String)>), ParseError> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let attributes = e
        .attributes()
        .map(|a| {
            let a = a?;
            let key = std::str::from_utf8(a.key.as_ref())?.to_string();
            let val = a.unescape_value()?.into_owned();
            Ok((key, val))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;
    Ok((name, attributes))
}

/// Assembles an [`XmlDocument`] from start/text/end notifications.
///
/// Adjacent text runs are merged. Whitespace outside the root element is dropped.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<XmlElement>,
    roots: Vec<XmlElement>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn start(
        &mut self,
        name: String,
        attributes: Vec<(String, String)>,
    ) -> Result<(), ParseError> {
        if self.stack.is_empty() && !self.roots.is_empty() {
            return Err(ParseError::malformed(format!(
                "The markup following the root element must be well-formed: <{name}>"
            )));
        }
        if self.stack.len() >= MAX_DEPTH {
            return Err(ParseError::malformed(format!(
                "Maximum element depth of {MAX_DEPTH} exceeded at <{name}>"
            )));
        }
        self.stack.push(XmlElement {
            name,
            attributes,
            children: Vec::new(),
        });
        Ok(())
    }

    pub fn text(&mut self, text: &str) -> Result<(), ParseError> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(current) = self.stack.last_mut() else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(ParseError::malformed(
                "Content is not allowed outside the root element",
            ));
        };
        match current.children.last_mut() {
            Some(XmlNode::Text(run)) => run.push_str(text),
            _ => current.children.push(XmlNode::Text(text.to_string())),
        }
        Ok(())
    }

    pub fn end(&mut self, end_name: &str) -> Result<(), ParseError> {
        let node = self
            .stack
            .pop()
            .ok_or_else(|| ParseError::malformed(format!("Invalid end tag: {end_name}")))?;
        if node.name != end_name {
            return Err(ParseError::malformed(format!(
                "Invalid end tag: expected {}, got {end_name}",
                node.name
            )));
        }
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(XmlNode::Element(node));
        } else {
            self.roots.push(node);
        }
        Ok(())
    }

    pub fn finish(self) -> Result<XmlDocument, ParseError> {
        if let Some(open) = self.stack.last() {
            return Err(ParseError::malformed(format!(
                "Unexpected end of document: element <{}> is not closed",
                open.name
            )));
        }
        if self.roots.is_empty() {
            return Err(ParseError::malformed(
                "Premature end of file: no root element found",
            ));
        }
        Ok(XmlDocument { roots: self.roots })
    }
}

impl ContentHandler for TreeBuilder {
    fn start_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, String)>,
    ) -> Result<(), ParseError> {
        self.start(name.to_string(), attributes)
    }

    fn characters(&mut self, text: &str) -> Result<(), ParseError> {
        self.text(text)
    }

    fn end_element(&mut self, name: &str) -> Result<(), ParseError> {
        self.end(name)
    }
}

impl XmlDocument {
    pub fn from_reader<R>(source: R) -> Result<Self, ParseError>
    where
        R: Read,
    {
        let mut reader = Reader::from_reader(BufReader::new(source));
        let mut buf = Vec::new();
        let mut builder = TreeBuilder::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let (name, attributes) = read_element(e)?;
                    builder.start(name, attributes)?;
                }
                Event::End(ref e) => {
                    let name_bytes = e.name();
                    let end_name = std::str::from_utf8(name_bytes.as_ref())?;
                    builder.end(end_name)?;
                }
                Event::Empty(ref e) => {
                    let (name, attributes) = read_element(e)?;
                    builder.start(name.clone(), attributes)?;
                    builder.end(&name)?;
                }
                Event::Text(ref t) => {
                    let text = t.unescape()?;
                    builder.text(&text)?;
                }
                Event::CData(ref t) => {
                    let text = std::str::from_utf8(t)?;
                    builder.text(text)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        builder.finish()
    }

    pub fn root(&self) -> Option<&XmlElement> {
        self.roots.first()
    }

    /// All elements with the given name, in document order, root included.
    pub fn elements_by_tag_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> {
        Descendants {
            stack: self.roots.iter().rev().collect(),
        }
        .filter(move |e| e.name == name)
    }
}

impl FromStr for XmlDocument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<XmlDocument, ParseError> {
        XmlDocument::from_reader(Cursor::new(s.as_bytes()))
    }
}
