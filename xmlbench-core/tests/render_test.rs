use pretty_assertions::assert_eq;
use xmlbench::{render, sample_document, Strategy};

const SMALL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wet id="w1">
    <metadata>
        <titel>T</titel>
        <datum>2024-01-01</datum>
    </metadata>
    <hoofdstuk nummer="1">
        <titel>H</titel>
        <artikel id="a1">
            <kop>K</kop>
            <lid nummer="1">L</lid>
        </artikel>
    </hoofdstuk>
</wet>"#;

fn body(html: &str) -> &str {
    let start = html.find("<body>").unwrap();
    let end = html.find("<div class=\"footer\">").unwrap();
    &html[start..end]
}

#[test]
fn test_render_body_with_tree_source() {
    let outcome = render(Some(SMALL), "DOM");
    assert!(outcome.succeeded(), "{:?}", outcome.error());
    insta::assert_snapshot!(body(outcome.markup().unwrap()), @r#"<body><div class="header"><h1>T</h1><div class="metadata"><p>Date: 2024-01-01</p><p>Law ID: w1</p></div></div><div class="chapter"><h2 class="chapter-title">Chapter 1: H</h2><div class="article"><div class="article-heading">K</div><div class="clause"><span class="clause-number">1.</span> L</div></div></div>"#);
}

#[test]
fn test_every_source_renders_the_same_body() {
    let reference = render(Some(SMALL), "DOM");
    let expected = body(reference.markup().unwrap());
    for strategy in ["SAX", "StAX", "Binding", "jaxb", "pull"] {
        let outcome = render(Some(SMALL), strategy);
        assert!(outcome.succeeded(), "{strategy}: {:?}", outcome.error());
        assert_eq!(body(outcome.markup().unwrap()), expected, "{strategy}");
    }
}

#[test]
fn test_render_sample_document() {
    for strategy in Strategy::ALL {
        let outcome = render(Some(sample_document()), strategy.name());
        assert!(outcome.succeeded(), "{strategy}");
        assert_eq!(outcome.strategy, strategy.name());
        let html = outcome.markup().unwrap();
        assert!(html.starts_with("<html><head><meta charset=\"UTF-8\">"));
        assert!(html.contains("<title>Voorbeeldwet Educatie</title>"));
        assert!(html.contains("Artikel 3 - Rechten"));
        assert!(html.contains("Chapter 2: Rechten en Plichten"));
        assert!(html.contains("<p>Generated by: XML Strategy Bench</p>"));
        assert!(html.ends_with("</body></html>"));
    }
}

#[test]
fn test_render_unknown_strategy_skips_measurement() {
    let outcome = render(Some(SMALL), "bogus");
    assert!(!outcome.succeeded());
    assert_eq!(outcome.markup(), None);
    assert_eq!(outcome.error(), Some("Unknown strategy: bogus"));
    assert_eq!((outcome.elapsed_ms, outcome.memory_delta_kb), (0, 0));
}

#[test]
fn test_render_unclosed_document() {
    let xml = r#"<wet id="w"><hoofdstuk nummer="1"><artikel id="a">"#;
    for strategy in Strategy::ALL {
        let outcome = render(Some(xml), strategy.name());
        assert!(!outcome.succeeded(), "{strategy}");
        assert_eq!(outcome.markup(), None);
        assert!(outcome
            .error()
            .unwrap()
            .starts_with(&format!("{} transform error: ", strategy.name())));
    }
}

#[test]
fn test_render_escapes_document_text() {
    let xml = r#"<wet id="x"><metadata><titel>&lt;script&gt;alert(1)&lt;/script&gt;</titel><datum/></metadata></wet>"#;
    let outcome = render(Some(xml), "SAX");
    let html = outcome.markup().unwrap();
    assert!(html.contains("<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_render_mixed_content_clause() {
    let xml = r#"<wet id="w"><metadata><titel>T</titel><datum/></metadata><hoofdstuk nummer="1"><titel>H</titel><artikel id="a"><kop>K</kop><lid nummer="1">Zie <i>artikel 2</i> voor details</lid></artikel></hoofdstuk></wet>"#;
    for strategy in ["DOM", "SAX", "StAX"] {
        let outcome = render(Some(xml), strategy);
        assert!(outcome.succeeded(), "{strategy}: {:?}", outcome.error());
        assert!(
            outcome.markup().unwrap().contains(
                r#"<span class="clause-number">1.</span> Zie artikel 2 voor details</div>"#
            ),
            "{strategy}"
        );
    }
}

#[test]
fn test_render_deeply_nested_document_fails_cleanly() {
    let depth = 50_000;
    let xml = format!("<wet>{}{}</wet>", "<x>".repeat(depth), "</x>".repeat(depth));
    for strategy in ["DOM", "SAX", "StAX"] {
        let outcome = render(Some(&xml), strategy);
        assert!(!outcome.succeeded(), "{strategy}");
        assert!(outcome.error().unwrap().contains("Maximum element depth"), "{strategy}");
    }
}
