use xml::reader::EventReader;

use crate::dom::{TreeBuilder, XmlDocument};
use crate::events::EventSource;
use crate::reader::ParseError;
use crate::strategies::pull_tree;

/// A strategy's native document representation, handed to the stylesheet.
pub enum Source<'a> {
    /// An already materialized tree.
    Tree(XmlDocument),
    /// A push source; the engine registers its own handler.
    Events(EventSource<'a>),
    /// A pull cursor; the engine advances it to the end.
    Cursor(EventReader<&'a [u8]>),
}

impl Source<'_> {
    /// Converts the source into the engine's input model.
    pub fn into_tree(self) -> Result<XmlDocument, ParseError> {
        match self {
            Source::Tree(doc) => Ok(doc),
            Source::Events(events) => {
                let mut builder = TreeBuilder::new();
                events.drive(&mut builder)?;
                builder.finish()
            }
            Source::Cursor(mut reader) => pull_tree(&mut reader),
        }
    }
}
