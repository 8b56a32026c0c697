use crate::reader::ParseError;
use std::io::Read;

pub trait FromXMLQuickXml {
    fn from_xml_quick<R: Read>(reader: R) -> Result<Self, ParseError>
    where
        Self: std::marker::Sized;
}
