use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::documents::BuildXML;
use crate::xml_builder::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(rename(deserialize = "titel"), default)]
    pub title: Option<String>,
    #[serde(rename(deserialize = "datum"), default)]
    pub date: Option<String>,
}

impl Metadata {
    pub fn new() -> Metadata {
        Default::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

impl BuildXML for Metadata {
    fn build_to<W: Write>(
        &self,
        stream: xml::writer::EventWriter<W>,
    ) -> xml::writer::Result<xml::writer::EventWriter<W>> {
        XMLBuilder::from(stream)
            .open_metadata()?
            .apply_opt(self.title.as_deref(), |t, b| b.title(t))?
            .apply_opt(self.date.as_deref(), |d, b| b.date(d))?
            .close()?
            .into_inner()
    }
}
