//! Flattening scenarios on realistic page shapes.

use blockdex::testing::{blog_front_matter, make_doc};
use blockdex::{Flattener, IndexerConfig, MetaEntry, SearchDocument};
use serde_json::{json, Value};
use std::path::Path;

fn flatten(front_matter: Value, body: &str) -> (SearchDocument, MetaEntry) {
    let config = IndexerConfig::default();
    Flattener::with_content_root(&config, Path::new("content/pages"))
        .flatten(&make_doc("2024/my-post", front_matter, body))
}

#[test]
fn test_minimal_blog_post() {
    let (doc, meta) = flatten(
        json!({
            "title": "Hola",
            "draft": false,
            "blocks": [{"_template": "blog_header", "blog_header_title": "Hola Mundo", "blog_header_read_time": 5}]
        }),
        "Este es un cuerpo de texto suficientemente largo para superar el límite de cuarenta caracteres.",
    );

    assert_eq!(doc.id(), "/blog/2024/my-post");
    assert_eq!(doc.url(), "/blog/2024/my-post");
    assert_eq!(doc.text("headerTitle"), Some("Hola Mundo"));
    assert_eq!(doc.text("readTime"), Some("5 min"));
    assert!(doc.contains_key("mdx_body"));
    assert_eq!(meta.title, "Hola Mundo");
}

#[test]
fn test_full_blog_post_metadata() {
    let (doc, meta) = flatten(blog_front_matter("Como reclamar una herencia", 2), "");

    assert_eq!(meta.title, "Como reclamar una herencia");
    assert_eq!(meta.excerpt.as_deref(), Some("Lo que debes saber antes de empezar"));
    assert_eq!(meta.author.as_deref(), Some("Equipo legal"));
    assert_eq!(meta.date.as_deref(), Some("5 de marzo de 2024"));
    assert_eq!(meta.read_time.as_deref(), Some("5 min"));
    assert_eq!(meta.featured_image.as_deref(), Some("/assets/blog/cover.jpg"));
    let tags = meta.tags.unwrap();
    assert_eq!(tags[0].name, "Civil");
    assert_eq!(tags[0].color, "secondary");

    // header block is also walked as a component
    assert!(doc.contains_key("component_blog_header_0"));
    assert!(doc.contains_key("component_text_section_1"));
    assert!(doc.contains_key("component_text_section_2"));
}

#[test]
fn test_component_text_skips_layout_fields() {
    let (doc, _) = flatten(blog_front_matter("Titulo", 1), "");
    let text = doc.text("component_text_section_1").unwrap();

    assert!(text.starts_with("Seccion 0 del articulo"));
    assert!(text.contains("Dependen del juzgado"));
    assert!(text.contains("Honorarios, tasas y gastos de procurador"));
    assert!(!text.contains("max-w-3xl"));
    assert!(!text.contains("clock"));
}

#[test]
fn test_deny_listed_keys_never_reach_the_document() {
    let (doc, _) = flatten(
        json!({"blocks": [{
            "_template": "hero",
            "className": "Este texto de clase es muy largo pero nunca se indexa",
            "style": {"title": "Titulo escondido dentro de un estilo"},
            "title": "Bienvenidos a nuestro despacho"
        }]}),
        "",
    );
    assert_eq!(doc.text("component_hero_0"), Some("Bienvenidos a nuestro despacho"));
}

#[test]
fn test_long_string_under_unknown_key_is_indexed() {
    let (doc, _) = flatten(
        json!({"blocks": [{"_template": "misc", "foo_bar_baz": "Una frase larga bajo una clave sin significado"}]}),
        "",
    );
    assert_eq!(
        doc.text("component_misc_0"),
        Some("Una frase larga bajo una clave sin significado")
    );
}

#[test]
fn test_component_cap_at_two_hundred() {
    let blocks: Vec<Value> = (0..230)
        .map(|i| json!({"_template": "faq", "question": format!("Pregunta frecuente numero {} sobre el proceso", i)}))
        .collect();
    let (doc, _) = flatten(json!({"blocks": blocks}), "");

    assert_eq!(doc.component_count(), 200);
    assert!(doc.contains_key("component_faq_0"));
    assert!(doc.contains_key("component_faq_199"));
    assert!(!doc.contains_key("component_faq_200"));
}

#[test]
fn test_fallback_paragraphs() {
    let body = "# Introduccion\n\nPrimer parrafo del articulo con contenido.\n\nSegundo parrafo del articulo.\n\nTercero.\n\nCuarto.\n\nQuinto.\n\nSexto.";
    let (doc, _) = flatten(
        json!({"blocks": [{"_template": "spacer", "size": "lg"}, {"_template": "divider", "title": "ok"}]}),
        body,
    );

    assert_eq!(doc.component_count(), 0);
    assert!(doc.contains_key("mdx_body"));
    assert_eq!(doc.text("paragraph_0"), Some("Introduccion"));
    assert_eq!(doc.text("paragraph_1"), Some("Primer parrafo del articulo con contenido."));
    assert_eq!(doc.text("paragraph_4"), Some("Cuarto."));
    assert!(!doc.contains_key("paragraph_5"));
}

#[test]
fn test_seo_fields_feed_meta_fallbacks() {
    let (doc, meta) = flatten(
        json!({
            "title": "",
            "seo": {"metaTitle": "Abogados en <b>Malaga</b>", "metaDescription": "Despacho de abogados"}
        }),
        "",
    );
    assert_eq!(doc.text("metaTitle"), Some("Abogados en Malaga"));
    assert_eq!(meta.title, "Abogados en Malaga");
    assert_eq!(meta.excerpt.as_deref(), Some("Despacho de abogados"));
}
