
/// Upper bound on the number of articles [`generate_sample`] produces.
pub const MAX_SAMPLE_RECORDS: usize = 10_000;

const ARTICLES_PER_CHAPTER: usize = 10;
const CLAUSES_PER_ARTICLE: usize = 3;

/// A small law with two chapters and three articles.
pub fn sample_document() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<wet id="wet-001">
    <metadata>
        <titel>Voorbeeldwet Educatie</titel>
        <datum>2024-01-15</datum>
    </metadata>
    <hoofdstuk nummer="1">
        <titel>Algemene Bepalingen</titel>
        <artikel id="art-1">
            <kop>Artikel 1 - Definities</kop>
            <lid nummer="1">In deze wet wordt verstaan onder student: een persoon ingeschreven aan een onderwijsinstelling.</lid>
            <lid nummer="2">Onder docent wordt verstaan: een gekwalificeerd persoon belast met onderwijs.</lid>
        </artikel>
        <artikel id="art-2">
            <kop>Artikel 2 - Toepassingsgebied</kop>
            <lid nummer="1">Deze wet is van toepassing op alle onderwijsinstellingen.</lid>
        </artikel>
    </hoofdstuk>
    <hoofdstuk nummer="2">
        <titel>Rechten en Plichten</titel>
        <artikel id="art-3">
            <kop>Artikel 3 - Rechten</kop>
            <lid nummer="1">Studenten hebben recht op kwaliteitsvol onderwijs.</lid>
        </artikel>
    </hoofdstuk>
</wet>"#
}

/// Builds a law with `min(count, MAX_SAMPLE_RECORDS)` articles, ten per chapter.
pub fn generate_sample(count: usize) -> String {
    let count = count.min(MAX_SAMPLE_RECORDS);
    let mut xml = String::with_capacity(256 + count * 256);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<wet id=\"wet-groot\">\n");
    xml.push_str("  <metadata>\n");
    xml.push_str("    <titel>Grote Test Wet</titel>\n");
    xml.push_str("    <datum>2024-12-15</datum>\n");
    xml.push_str("  </metadata>\n");

    for i in 1..=count {
        let chapter = (i - 1) / ARTICLES_PER_CHAPTER + 1;
        let opens_chapter = (i - 1) % ARTICLES_PER_CHAPTER == 0;
        let closes_chapter = i % ARTICLES_PER_CHAPTER == 0 || i == count;

        if opens_chapter {
            xml.push_str(&format!("  <hoofdstuk nummer=\"{chapter}\">\n"));
            xml.push_str(&format!("    <titel>Hoofdstuk {chapter}</titel>\n"));
        }
        xml.push_str(&format!("    <artikel id=\"art-{i}\">\n"));
        xml.push_str(&format!("      <kop>Artikel {i}</kop>\n"));
        for j in 1..=CLAUSES_PER_ARTICLE {
            xml.push_str(&format!(
                "      <lid nummer=\"{j}\">Lid {j} van artikel {i}</lid>\n"
            ));
        }
        xml.push_str("    </artikel>\n");
        if closes_chapter {
            xml.push_str("  </hoofdstuk>\n");
        }
    }

    xml.push_str("</wet>");
    xml
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::dom::XmlDocument;
    #[cfg(test)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_zero_records() {
        let doc: XmlDocument = generate_sample(0).parse().unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.attribute("id"), Some("wet-groot"));
        assert_eq!(root.elements_by_tag_name("artikel").count(), 0);
    }

    #[test]
    fn test_generate_groups_by_ten() {
        let doc: XmlDocument = generate_sample(25).parse().unwrap();
        let root = doc.root().unwrap();
        let chapters: Vec<_> = root.children_named("hoofdstuk").collect();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].children_named("artikel").count(), 10);
        assert_eq!(chapters[2].attribute("nummer"), Some("3"));
        assert_eq!(chapters[2].children_named("artikel").count(), 5);
        assert_eq!(
            chapters[1].child("titel").unwrap().text_content(),
            "Hoofdstuk 2"
        );
        assert!(xml_ends_with_closed_chapter(&generate_sample(25)));
    }

    #[test]
    fn test_generate_article_shape() {
        let xml = generate_sample(1);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<wet id=\"wet-groot\">"));
        assert!(xml.contains(
            "    <artikel id=\"art-1\">\n      <kop>Artikel 1</kop>\n      <lid nummer=\"1\">Lid 1 van artikel 1</lid>\n"
        ));
        assert!(xml.contains("<lid nummer=\"3\">Lid 3 van artikel 1</lid>"));
    }

    #[test]
    fn test_generate_is_capped() {
        let xml = generate_sample(MAX_SAMPLE_RECORDS + 5);
        assert!(xml.contains("art-10000\""));
        assert!(!xml.contains("art-10001\""));
    }

    #[test]
    fn test_sample_document_is_well_formed() {
        let doc: XmlDocument = sample_document().parse().unwrap();
        assert_eq!(
            doc.root().unwrap().elements_by_tag_name("artikel").count(),
            3
        );
    }

    fn xml_ends_with_closed_chapter(xml: &str) -> bool {
        xml.ends_with("    </artikel>\n  </hoofdstuk>\n</wet>")
    }
}
