//! Tests for corpus collection: parsing, draft handling, failure policy.

use blockdex::testing::{blog_front_matter, site_config, write_blog_page};
use blockdex::{collect_corpus, IndexerError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const BODY: &str = "Un cuerpo de articulo lo bastante largo como para indexarse entero.";

#[test]
fn test_documents_follow_discovery_order() {
    let dir = TempDir::new().unwrap();
    write_blog_page(dir.path(), "2024/zeta", &blog_front_matter("Zeta", 1), BODY);
    write_blog_page(dir.path(), "2024/alfa", &blog_front_matter("Alfa", 1), BODY);
    write_blog_page(dir.path(), "2023/beta", &blog_front_matter("Beta", 1), BODY);

    let corpus = collect_corpus(&site_config(dir.path())).unwrap();
    let ids: Vec<&str> = corpus.documents.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["/blog/2023/beta", "/blog/2024/alfa", "/blog/2024/zeta"]);

    let meta_ids: Vec<&str> = corpus.meta.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, meta_ids);
}

#[test]
fn test_drafts_are_excluded() {
    let dir = TempDir::new().unwrap();
    write_blog_page(dir.path(), "2024/publicado", &blog_front_matter("Publicado", 1), BODY);
    write_blog_page(
        dir.path(),
        "2024/borrador",
        &json!({"title": "Borrador", "draft": true}),
        BODY,
    );

    let corpus = collect_corpus(&site_config(dir.path())).unwrap();
    assert_eq!(corpus.documents.len(), 1);
    assert_eq!(corpus.meta.len(), 1);
    assert_eq!(corpus.drafts, 1);
    assert!(corpus.documents.iter().all(|d| d.id() != "/blog/2024/borrador"));
}

#[test]
fn test_only_drafts_is_an_empty_corpus() {
    let dir = TempDir::new().unwrap();
    write_blog_page(dir.path(), "2024/a", &json!({"title": "A", "draft": "yes"}), BODY);
    let corpus = collect_corpus(&site_config(dir.path())).unwrap();
    assert!(corpus.is_empty());
    assert_eq!(corpus.drafts, 1);
}

#[test]
fn test_invalid_front_matter_aborts_collection() {
    let dir = TempDir::new().unwrap();
    write_blog_page(dir.path(), "2024/bien", &blog_front_matter("Bien", 1), BODY);
    let broken = dir.path().join("content/pages/blog/2024/roto/page.mdx");
    fs::create_dir_all(broken.parent().unwrap()).unwrap();
    fs::write(&broken, "---\ntitle: [sin cerrar\n---\nCuerpo").unwrap();

    let err = collect_corpus(&site_config(dir.path())).unwrap_err();
    match err {
        IndexerError::Yaml { path, .. } => assert_eq!(path, broken),
        other => panic!("expected a YAML error, got {other}"),
    }
}

#[test]
fn test_unterminated_front_matter_aborts_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("content/pages/blog/2024/abierto/page.mdx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "---\ntitle: Abierto\n").unwrap();

    let err = collect_corpus(&site_config(dir.path())).unwrap_err();
    assert!(matches!(err, IndexerError::FrontMatter { .. }));
}

#[test]
fn test_missing_content_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let corpus = collect_corpus(&site_config(dir.path())).unwrap();
    assert!(corpus.is_empty());
    assert_eq!(corpus.drafts, 0);
}
