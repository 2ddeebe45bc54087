//! Tests for the published artifacts: weights, index contents, metadata.

use blockdex::build::{read_artifacts, run_build};
use blockdex::config::WEIGHT_TOLERANCE;
use blockdex::index::total_weight;
use blockdex::testing::{blog_front_matter, site_config, write_blog_page};
use serde_json::json;
use tempfile::TempDir;

const BODY: &str = "Un cuerpo de articulo lo bastante largo como para indexarse entero.";

fn build_site(dir: &TempDir) -> blockdex::build::LoadedArtifacts {
    write_blog_page(dir.path(), "2024/herencias", &blog_front_matter("Herencias", 2), BODY);
    write_blog_page(
        dir.path(),
        "2024/despidos",
        &json!({
            "title": "Despidos",
            "blocks": [{"_template": "hero", "title": "Defensa ante un despido improcedente"}]
        }),
        BODY,
    );
    let config = site_config(dir.path());
    run_build(&config).unwrap().unwrap();
    read_artifacts(&config.index_path(), &config.meta_path()).unwrap()
}

#[test]
fn test_title_weight_leads_and_weights_sum_to_one() {
    let dir = TempDir::new().unwrap();
    let loaded = build_site(&dir);
    let keys = &loaded.index.keys;

    assert_eq!(keys[0].name, "title");
    assert_eq!(keys[0].weight, 0.35);
    assert!((total_weight(keys) - 1.0).abs() < WEIGHT_TOLERANCE);

    let share = keys[1].weight;
    assert!(keys[1..].iter().all(|k| (k.weight - share).abs() < WEIGHT_TOLERANCE));
    assert!(keys.iter().all(|k| k.name != "id" && k.name != "url"));
}

#[test]
fn test_keys_in_first_seen_order() {
    let dir = TempDir::new().unwrap();
    let loaded = build_site(&dir);
    let names: Vec<&str> = loaded.index.keys.iter().map(|k| k.name.as_str()).collect();

    // "2024/despidos" sorts first
    assert_eq!(&names[..3], &["title", "mdx_body", "component_hero_0"]);
    assert!(names.contains(&"headerTitle"));
    assert!(names.contains(&"tags"));
}

#[test]
fn test_index_finds_terms_by_key() {
    let dir = TempDir::new().unwrap();
    let loaded = build_site(&dir);
    let index = &loaded.index.index;

    let hero = index.key_index("component_hero_0").unwrap();
    let postings = index.postings("improcedente");
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].doc, 0);
    assert_eq!(postings[0].key, hero);

    let title = index.key_index("title").unwrap();
    assert!(index.postings("Herencias").iter().any(|p| p.doc == 1 && p.key == title));
}

#[test]
fn test_meta_matches_documents() {
    let dir = TempDir::new().unwrap();
    let loaded = build_site(&dir);

    assert_eq!(loaded.meta.len(), 2);
    assert!(loaded.counts_match());
    assert_eq!(loaded.meta[0].id, "/blog/2024/despidos");
    assert_eq!(loaded.meta[0].title, "Despidos");
    assert_eq!(loaded.meta[0].date, None);
    assert_eq!(loaded.meta[1].title, "Herencias");
    assert_eq!(loaded.meta[1].date.as_deref(), Some("5 de marzo de 2024"));
}
