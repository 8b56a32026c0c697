use serde::{Deserialize, Deserializer, Serialize};
use std::io::Write;

use super::*;
use crate::documents::BuildXML;
use crate::xml_builder::*;

// ============================================================================
// XML Deserialization Helper Structures (for quick-xml serde)
// ============================================================================

#[derive(Debug, Deserialize, Default)]
struct LawXml {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(rename = "$value", default)]
    children: Vec<LawChildXml>,
}

#[derive(Debug, Deserialize)]
enum LawChildXml {
    #[serde(rename = "metadata")]
    Metadata(Metadata),
    #[serde(rename = "hoofdstuk")]
    Chapter(Chapter),
    #[serde(other)]
    Unknown,
}

/// Typed object graph of a record document: law -> chapters -> articles -> clauses.
///
/// Articles that are not nested inside a chapter are not part of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Law {
    pub id: Option<String>,
    pub metadata: Option<Metadata>,
    pub chapters: Vec<Chapter>,
}

impl<'de> Deserialize<'de> for Law {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let xml = LawXml::deserialize(deserializer)?;
        let mut law = Law {
            id: xml.id,
            ..Default::default()
        };
        for child in xml.children {
            match child {
                LawChildXml::Metadata(m) if law.metadata.is_none() => law.metadata = Some(m),
                LawChildXml::Chapter(c) => law.chapters.push(c),
                _ => {}
            }
        }
        Ok(law)
    }
}

impl Law {
    pub fn new(id: impl Into<String>) -> Law {
        Law {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn add_chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    /// Articles of every chapter, in document order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.chapters.iter().flat_map(|c| c.articles.iter())
    }
}

impl BuildXML for Law {
    fn build_to<W: Write>(
        &self,
        stream: xml::writer::EventWriter<W>,
    ) -> xml::writer::Result<xml::writer::EventWriter<W>> {
        XMLBuilder::from(stream)
            .open_law(self.id.as_deref())?
            .apply_opt(self.metadata.as_ref(), |m, b| b.add_child(m))?
            .apply_each(&self.chapters, |c, b| b.add_child(c))?
            .close()?
            .into_inner()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    #[cfg(test)]
    use pretty_assertions::assert_eq;
    use std::str;

    #[test]
    fn test_law() {
        let b = Law::new("wet-1")
            .metadata(Metadata::new().title("T").date("2024-01-01"))
            .add_chapter(
                Chapter::new(1).title("Een").add_article(
                    Article::new("art-1")
                        .heading("Kop")
                        .add_clause(Clause::new(1, "Tekst")),
                ),
            )
            .build()
            .unwrap();
        assert_eq!(
            str::from_utf8(&b).unwrap(),
            r#"<wet id="wet-1"><metadata><titel>T</titel><datum>2024-01-01</datum></metadata><hoofdstuk nummer="1"><titel>Een</titel><artikel id="art-1"><kop>Kop</kop><lid nummer="1">Tekst</lid></artikel></hoofdstuk></wet>"#
        );
    }

    #[test]
    fn test_law_xml_deserialize() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<wet id="wet-001">
    <metadata>
        <titel>Voorbeeldwet</titel>
        <datum>2024-01-15</datum>
    </metadata>
    <hoofdstuk nummer="1">
        <titel>Algemeen</titel>
        <artikel id="art-1"><kop>Artikel 1</kop></artikel>
        <artikel id="art-2"><kop>Artikel 2</kop></artikel>
    </hoofdstuk>
    <hoofdstuk nummer="2">
        <titel>Slot</titel>
        <artikel id="art-3"><kop>Artikel 3</kop></artikel>
    </hoofdstuk>
</wet>"#;
        let law: Law = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(law.id.as_deref(), Some("wet-001"));
        assert_eq!(
            law.metadata,
            Some(Metadata::new().title("Voorbeeldwet").date("2024-01-15"))
        );
        let ids: Vec<_> = law.articles().map(|a| a.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["art-1", "art-2", "art-3"]);
    }

    #[test]
    fn test_articles_outside_chapters_are_not_bound() {
        let xml = r#"<wet id="w"><artikel id="art-1"><kop>Los</kop></artikel></wet>"#;
        let law: Law = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(law.articles().count(), 0);
    }
}
