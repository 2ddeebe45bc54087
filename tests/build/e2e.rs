//! End-to-end tests for the build workflow.

use blockdex::build::run_build;
use blockdex::testing::{blog_front_matter, site_config, write_blog_page};
use blockdex::{IndexerConfig, IndexerError};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BODY: &str = "Un cuerpo de articulo lo bastante largo como para indexarse entero.";

fn seed_site(dir: &TempDir) {
    write_blog_page(dir.path(), "2024/a", &blog_front_matter("Primero", 3), BODY);
    write_blog_page(dir.path(), "2024/b", &blog_front_matter("Segundo", 1), BODY);
    write_blog_page(dir.path(), "2023/c", &json!({"title": "Tercero"}), BODY);
}

#[test]
fn test_run_build_e2e_basic() {
    let dir = TempDir::new().unwrap();
    seed_site(&dir);
    let config = site_config(dir.path());

    let report = run_build(&config).unwrap().expect("artifacts should be written");

    assert_eq!(report.documents, 3);
    assert_eq!(report.drafts, 0);
    assert!(config.index_path().is_file(), "search-index.json.gz should be created");
    assert!(config.meta_path().is_file(), "search-meta.json.gz should be created");
    assert_eq!(
        config.index_path(),
        dir.path().join("public/search/search-index.json.gz")
    );
    assert_eq!(
        fs::read(&config.index_path()).unwrap().len(),
        report.artifacts.index.compressed_bytes
    );
}

#[test]
fn test_rebuild_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    seed_site(&dir);
    let config = site_config(dir.path());

    run_build(&config).unwrap();
    let index_first = fs::read(config.index_path()).unwrap();
    let meta_first = fs::read(config.meta_path()).unwrap();

    let report = run_build(&config).unwrap().unwrap();
    assert_eq!(fs::read(config.index_path()).unwrap(), index_first);
    assert_eq!(fs::read(config.meta_path()).unwrap(), meta_first);
    assert_eq!(report.artifacts.index.crc32, crc32fast::hash(&index_first));
}

#[test]
fn test_empty_corpus_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = site_config(dir.path());

    let report = run_build(&config).unwrap();

    assert!(report.is_none());
    assert!(!config.output_path().exists(), "output directory should not be created");
}

#[test]
fn test_drafts_only_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_blog_page(dir.path(), "2024/a", &json!({"title": "A", "draft": true}), BODY);
    let config = site_config(dir.path());

    assert!(run_build(&config).unwrap().is_none());
    assert!(!config.index_path().exists());
}

#[test]
fn test_broken_document_aborts_without_artifacts() {
    let dir = TempDir::new().unwrap();
    seed_site(&dir);
    let broken = dir.path().join("content/pages/blog/2024/roto/page.mdx");
    fs::create_dir_all(broken.parent().unwrap()).unwrap();
    fs::write(&broken, "---\nblocks: [\n---\n").unwrap();
    let config = site_config(dir.path());

    let err = run_build(&config).unwrap_err();
    assert!(matches!(err, IndexerError::Yaml { .. }));
    assert!(!config.index_path().exists());
    assert!(!config.meta_path().exists());
}

#[test]
fn test_broken_document_keeps_previous_artifacts() {
    let dir = TempDir::new().unwrap();
    seed_site(&dir);
    let config = site_config(dir.path());
    run_build(&config).unwrap();
    let before = fs::read(config.index_path()).unwrap();

    let broken = dir.path().join("content/pages/blog/2024/roto/page.mdx");
    fs::create_dir_all(broken.parent().unwrap()).unwrap();
    fs::write(&broken, "---\ntitle: sin cierre\n").unwrap();

    assert!(run_build(&config).is_err());
    assert_eq!(fs::read(config.index_path()).unwrap(), before);
}

#[test]
fn test_custom_output_and_names() {
    let dir = TempDir::new().unwrap();
    seed_site(&dir);
    let config = IndexerConfig {
        output_dir: PathBuf::from("dist/assets/search"),
        index_file: "idx.json.gz".to_string(),
        meta_file: "meta.json.gz".to_string(),
        ..site_config(dir.path())
    };

    run_build(&config).unwrap();
    assert!(dir.path().join("dist/assets/search/idx.json.gz").is_file());
    assert!(dir.path().join("dist/assets/search/meta.json.gz").is_file());
}

#[test]
fn test_invalid_config_is_rejected_before_discovery() {
    let dir = TempDir::new().unwrap();
    seed_site(&dir);
    let config = IndexerConfig {
        title_weight: 0.9,
        ..site_config(dir.path())
    };

    let err = run_build(&config).unwrap_err();
    assert!(matches!(err, IndexerError::Config(_)));
    assert!(!config.output_path().exists());
}
