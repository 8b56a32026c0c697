use serde::{Deserialize, Deserializer, Serialize};
use std::io::Write;

use super::*;
use crate::documents::BuildXML;
use crate::xml_builder::*;

// ============================================================================
// XML Deserialization Helper Structures (for quick-xml serde)
// ============================================================================

#[derive(Debug, Deserialize, Default)]
struct ArticleXml {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(rename = "$value", default)]
    children: Vec<ArticleChildXml>,
}

#[derive(Debug, Deserialize, Default)]
struct TextXml {
    #[serde(rename = "$text", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
enum ArticleChildXml {
    #[serde(rename = "kop")]
    Heading(TextXml),
    #[serde(rename = "lid")]
    Clause(Clause),
    #[serde(other)]
    Unknown,
}

/// The record unit: an identified heading plus its numbered clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Option<String>,
    pub heading: Option<String>,
    pub clauses: Vec<Clause>,
}

impl<'de> Deserialize<'de> for Article {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let xml = ArticleXml::deserialize(deserializer)?;
        let mut article = Article {
            id: xml.id,
            ..Default::default()
        };
        for child in xml.children {
            match child {
                // The first heading wins, like a tag-name lookup would.
                ArticleChildXml::Heading(h) if article.heading.is_none() => {
                    article.heading = Some(h.text);
                }
                ArticleChildXml::Clause(c) => article.clauses.push(c),
                _ => {}
            }
        }
        Ok(article)
    }
}

impl Article {
    pub fn new(id: impl Into<String>) -> Article {
        Article {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn add_clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }
}

impl BuildXML for Article {
    fn build_to<W: Write>(
        &self,
        stream: xml::writer::EventWriter<W>,
    ) -> xml::writer::Result<xml::writer::EventWriter<W>> {
        XMLBuilder::from(stream)
            .open_article(self.id.as_deref())?
            .apply_opt(self.heading.as_deref(), |h, b| b.heading(h))?
            .apply_each(&self.clauses, |c, b| b.add_child(c))?
            .close()?
            .into_inner()
    }
}
