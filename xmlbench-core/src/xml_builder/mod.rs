mod elements;

use std::io::Write;
#[cfg(test)]
use xml::common::XmlVersion;
use xml::writer::{EmitterConfig, EventWriter, Result, XmlEvent};

use crate::documents::BuildXML;

/// Thin chaining wrapper over an xml-rs [`EventWriter`].
pub struct XMLBuilder<W: Write> {
    writer: EventWriter<W>,
}

impl<W: Write> From<EventWriter<W>> for XMLBuilder<W> {
    fn from(writer: EventWriter<W>) -> Self {
        Self { writer }
    }
}

impl<W: Write> XMLBuilder<W> {
    pub(crate) fn new(writer: W) -> Self {
        let config = EmitterConfig::new()
            .write_document_declaration(false)
            .perform_indent(false);
        Self {
            writer: config.create_writer(writer),
        }
    }

    pub(crate) fn into_inner(self) -> Result<EventWriter<W>> {
        Ok(self.writer)
    }

    // Build XML declaration
    #[cfg(test)]
    pub(crate) fn declaration(mut self, standalone: Option<bool>) -> Result<Self> {
        self.writer.write(XmlEvent::StartDocument {
            version: XmlVersion::Version10,
            encoding: Some("UTF-8"),
            standalone,
        })?;
        Ok(self)
    }

    pub(crate) fn open(mut self, name: &str, attrs: &[(&str, &str)]) -> Result<Self> {
        let mut e = XmlEvent::start_element(name);
        for (key, val) in attrs {
            e = e.attr(*key, *val);
        }
        self.writer.write(e)?;
        Ok(self)
    }

    pub(crate) fn plain_text(mut self, t: &str) -> Result<Self> {
        self.writer.write(XmlEvent::characters(t))?;
        Ok(self)
    }

    // Close tag
    pub(crate) fn close(mut self) -> Result<Self> {
        self.writer.write(XmlEvent::end_element())?;
        Ok(self)
    }

    pub(crate) fn apply_opt<T, F>(self, item: Option<T>, f: F) -> Result<Self>
    where
        F: FnOnce(T, Self) -> Result<Self>,
    {
        match item {
            Some(item) => f(item, self),
            None => Ok(self),
        }
    }

    pub(crate) fn apply_each<'a, T: 'a, I, F>(mut self, items: I, mut f: F) -> Result<Self>
    where
        I: IntoIterator<Item = &'a T>,
        F: FnMut(&'a T, Self) -> Result<Self>,
    {
        for item in items {
            self = f(item, self)?;
        }
        Ok(self)
    }

    pub(crate) fn add_child<T: BuildXML>(self, child: &T) -> Result<Self> {
        let writer = child.build_to(self.writer)?;
        Ok(Self { writer })
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    #[cfg(test)]
    use pretty_assertions::assert_eq;
    use std::str;

    #[test]
    fn test_declaration() {
        let b = XMLBuilder::new(Vec::new())
            .declaration(Some(true))
            .unwrap()
            .open("wet", &[])
            .unwrap()
            .close()
            .unwrap()
            .into_inner()
            .unwrap()
            .into_inner();
        assert_eq!(
            str::from_utf8(&b).unwrap(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><wet />"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let b = XMLBuilder::new(Vec::new())
            .open("kop", &[("id", "a\"b")])
            .unwrap()
            .plain_text("1 < 2 & 3")
            .unwrap()
            .close()
            .unwrap()
            .into_inner()
            .unwrap()
            .into_inner();
        assert_eq!(
            str::from_utf8(&b).unwrap(),
            r#"<kop id="a&quot;b">1 &lt; 2 &amp; 3</kop>"#
        );
    }
}
