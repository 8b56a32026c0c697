use serde::{Deserialize, Deserializer, Serialize};
use std::io::Write;

use crate::documents::BuildXML;
use crate::xml_builder::*;

/// A numbered line of free text inside an article (`<lid nummer="1">`).
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub number: Option<u32>,
    pub text: String,
}

// XML deserialization helper
#[derive(Deserialize)]
struct ClauseXml {
    #[serde(rename = "@nummer", default)]
    number: Option<String>,
    #[serde(rename = "$text", default)]
    text: String,
}

impl<'de> Deserialize<'de> for Clause {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let xml = ClauseXml::deserialize(deserializer)?;
        Ok(Clause {
            number: xml.number.and_then(|n| n.trim().parse::<u32>().ok()),
            text: xml.text,
        })
    }
}

impl Clause {
    pub fn new(number: u32, text: impl Into<String>) -> Clause {
        Clause {
            number: Some(number),
            text: text.into(),
        }
    }
}

impl BuildXML for Clause {
    fn build_to<W: Write>(
        &self,
        stream: xml::writer::EventWriter<W>,
    ) -> xml::writer::Result<xml::writer::EventWriter<W>> {
        XMLBuilder::from(stream)
            .clause(self.number, &self.text)?
            .into_inner()
    }
}
