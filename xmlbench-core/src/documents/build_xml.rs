use std::io::Write;

use crate::xml_builder::XMLBuilder;

pub trait BuildXML {
    /// Write the XML to the given stream.
    fn build_to<W: Write>(
        &self,
        stream: xml::writer::EventWriter<W>,
    ) -> xml::writer::Result<xml::writer::EventWriter<W>>;

    /// Serialize into a freshly allocated buffer.
    fn build(&self) -> xml::writer::Result<Vec<u8>> {
        let stream = XMLBuilder::new(Vec::new()).into_inner()?;
        Ok(self.build_to(stream)?.into_inner())
    }
}
