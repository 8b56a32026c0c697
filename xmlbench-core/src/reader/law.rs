use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;

use crate::documents::Law;
use crate::reader::{FromXML, FromXMLQuickXml, ParseError};

const ROOT_TAG: &str = "wet";

/// Rejects documents whose first element is not `<wet>`.
/// Documents without any element are left to the deserializer to report.
fn check_root(xml: &str) -> Result<(), ParseError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let name = std::str::from_utf8(e.name().into_inner())?;
                if name != ROOT_TAG {
                    return Err(ParseError::malformed(format!(
                        "unexpected root element <{name}>, expected <{ROOT_TAG}>"
                    )));
                }
                return Ok(());
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
    }
}

impl FromXMLQuickXml for Law {
    fn from_xml_quick<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        check_root(&xml)?;
        Ok(from_str(&xml)?)
    }
}

impl FromXML for Law {
    fn from_xml<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::from_xml_quick(reader)
    }
}
