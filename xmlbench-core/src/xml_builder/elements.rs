use super::XMLBuilder;
use std::io::Write;
use xml::writer::Result;

impl<W: Write> XMLBuilder<W> {
    pub(crate) fn open_law(self, id: Option<&str>) -> Result<Self> {
        match id {
            Some(id) => self.open("wet", &[("id", id)]),
            None => self.open("wet", &[]),
        }
    }

    pub(crate) fn open_metadata(self) -> Result<Self> {
        self.open("metadata", &[])
    }

    pub(crate) fn open_chapter(self, number: Option<u32>) -> Result<Self> {
        match number {
            Some(n) => self.open("hoofdstuk", &[("nummer", n.to_string().as_str())]),
            None => self.open("hoofdstuk", &[]),
        }
    }

    pub(crate) fn open_article(self, id: Option<&str>) -> Result<Self> {
        match id {
            Some(id) => self.open("artikel", &[("id", id)]),
            None => self.open("artikel", &[]),
        }
    }

    pub(crate) fn title(self, text: &str) -> Result<Self> {
        self.text_element("titel", text)
    }

    pub(crate) fn date(self, text: &str) -> Result<Self> {
        self.text_element("datum", text)
    }

    pub(crate) fn heading(self, text: &str) -> Result<Self> {
        self.text_element("kop", text)
    }

    pub(crate) fn clause(self, number: Option<u32>, text: &str) -> Result<Self> {
        let b = match number {
            Some(n) => self.open("lid", &[("nummer", n.to_string().as_str())])?,
            None => self.open("lid", &[])?,
        };
        b.plain_text(text)?.close()
    }

    fn text_element(self, name: &str, text: &str) -> Result<Self> {
        self.open(name, &[])?.plain_text(text)?.close()
    }
}
