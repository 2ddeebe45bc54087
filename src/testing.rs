//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::IndexerConfig;
use crate::content::ContentDocument;

/// Relative path of a blog page under the default content layout.
pub fn blog_page_path(slug: &str) -> PathBuf {
    PathBuf::from(format!("content/pages/blog/{}/page.mdx", slug))
}

/// Source text of a page: YAML front-matter followed by the body.
pub fn page_source(front_matter: &Value, body: &str) -> String {
    let yaml = serde_yaml::to_string(front_matter).unwrap_or_default();
    format!("---\n{}---\n{}", yaml, body)
}

/// Write a blog page under `root` and return its path.
pub fn write_blog_page(root: &Path, slug: &str, front_matter: &Value, body: &str) -> PathBuf {
    let path = root.join(blog_page_path(slug));
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).expect("create page directory");
    }
    fs::write(&path, page_source(front_matter, body)).expect("write page");
    path
}

/// In-memory document at `blog_page_path(slug)`.
pub fn make_doc(slug: &str, front_matter: Value, body: &str) -> ContentDocument {
    ContentDocument {
        path: blog_page_path(slug),
        front_matter,
        body: body.to_string(),
    }
}

/// Default config rooted at `root`.
pub fn site_config(root: &Path) -> IndexerConfig {
    IndexerConfig {
        root: root.to_path_buf(),
        ..IndexerConfig::default()
    }
}

/// Front-matter of a typical blog post: header plus a few content blocks.
pub fn blog_front_matter(title: &str, blocks: usize) -> Value {
    let mut all = vec![json!({
        "_template": "blog_header",
        "blog_header_title": title,
        "blog_header_subtitle": "Lo que debes saber antes de empezar",
        "blog_header_author": "Equipo legal",
        "blog_header_date": "2024-03-05",
        "blog_header_read_time": 5,
        "blog_header_tags": [{"name": "Civil", "color": "secondary"}],
        "blog_header_featured_image": "/assets/blog/cover.jpg"
    })];
    for i in 0..blocks {
        all.push(json!({
            "_template": "text_section",
            "className": "max-w-3xl mx-auto",
            "heading": format!("Seccion {} del articulo", i),
            "content": "Explicamos los plazos, los documentos necesarios y los costes habituales del procedimiento.",
            "cards": [
                {"title": "Plazos", "text": "Dependen del juzgado y de la complejidad del caso concreto.", "icon": "clock"},
                {"title": "Costes", "text": "Honorarios, tasas y gastos de procurador en cada fase.", "icon": "euro"}
            ]
        }));
    }
    json!({"title": title, "draft": false, "blocks": all})
}
