use serde::{Deserialize, Deserializer, Serialize};
use std::io::Write;

use super::*;
use crate::documents::BuildXML;
use crate::xml_builder::*;

// ============================================================================
// XML Deserialization Helper Structures (for quick-xml serde)
// ============================================================================

#[derive(Debug, Deserialize, Default)]
struct ChapterXml {
    #[serde(rename = "@nummer", default)]
    number: Option<String>,
    #[serde(rename = "$value", default)]
    children: Vec<ChapterChildXml>,
}

#[derive(Debug, Deserialize, Default)]
struct ChapterTitleXml {
    #[serde(rename = "$text", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
enum ChapterChildXml {
    #[serde(rename = "titel")]
    Title(ChapterTitleXml),
    #[serde(rename = "artikel")]
    Article(Article),
    #[serde(other)]
    Unknown,
}

/// Grouping container for articles.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: Option<u32>,
    pub title: Option<String>,
    pub articles: Vec<Article>,
}

impl<'de> Deserialize<'de> for Chapter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let xml = ChapterXml::deserialize(deserializer)?;
        let mut chapter = Chapter {
            number: xml.number.and_then(|n| n.trim().parse::<u32>().ok()),
            ..Default::default()
        };
        for child in xml.children {
            match child {
                ChapterChildXml::Title(t) if chapter.title.is_none() => {
                    chapter.title = Some(t.text);
                }
                ChapterChildXml::Article(a) => chapter.articles.push(a),
                _ => {}
            }
        }
        Ok(chapter)
    }
}

impl Chapter {
    pub fn new(number: u32) -> Chapter {
        Chapter {
            number: Some(number),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_article(mut self, article: Article) -> Self {
        self.articles.push(article);
        self
    }
}

impl BuildXML for Chapter {
    fn build_to<W: Write>(
        &self,
        stream: xml::writer::EventWriter<W>,
    ) -> xml::writer::Result<xml::writer::EventWriter<W>> {
        XMLBuilder::from(stream)
            .open_chapter(self.number)?
            .apply_opt(self.title.as_deref(), |t, b| b.title(t))?
            .apply_each(&self.articles, |a, b| b.add_child(a))?
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
    fn test_chapter() {
        let b = Chapter::new(2)
            .title("Rechten")
            .add_article(Article::new("art-3").heading("Artikel 3"))
            .build()
            .unwrap();
        assert_eq!(
            str::from_utf8(&b).unwrap(),
            r#"<hoofdstuk nummer="2"><titel>Rechten</titel><artikel id="art-3"><kop>Artikel 3</kop></artikel></hoofdstuk>"#
        );
    }

    #[test]
    fn test_chapter_xml_deserialize() {
        let xml = r#"<hoofdstuk nummer="4">
            <titel>Slotbepalingen</titel>
            <artikel id="art-9"><kop>Artikel 9</kop></artikel>
            <artikel id="art-10"><kop>Artikel 10</kop></artikel>
        </hoofdstuk>"#;
        let chapter: Chapter = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(chapter.number, Some(4));
        assert_eq!(chapter.title.as_deref(), Some("Slotbepalingen"));
        assert_eq!(chapter.articles.len(), 2);
        assert_eq!(chapter.articles[1].id.as_deref(), Some("art-10"));
    }
}
