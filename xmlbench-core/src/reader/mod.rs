mod errors;
mod from_xml_quick;
mod law;

use std::io::Read;

pub use errors::*;
pub use from_xml_quick::*;

pub trait FromXML {
    fn from_xml<R: Read>(reader: R) -> Result<Self, ParseError>
    where
        Self: std::marker::Sized;
}
