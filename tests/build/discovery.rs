//! Tests for content discovery against a real directory tree.

use blockdex::content::discover;
use blockdex::IndexerError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PATTERN: &str = "content/pages/blog/*/**/page.mdx";

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "---\ntitle: x\n---\n").unwrap();
}

fn relative(root: &Path, found: &[std::path::PathBuf]) -> Vec<String> {
    found
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

#[test]
fn test_default_pattern_selects_nested_pages_only() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "content/pages/blog/2024/post-a/page.mdx");
    touch(dir.path(), "content/pages/blog/2024/deep/nested/page.mdx");
    touch(dir.path(), "content/pages/blog/page.mdx");
    touch(dir.path(), "content/pages/servicios/page.mdx");
    touch(dir.path(), "content/pages/blog/2024/post-a/draft.mdx");
    touch(dir.path(), "node_modules/pkg/content/pages/blog/x/page.mdx");

    let found = discover(dir.path(), PATTERN).unwrap();
    assert_eq!(
        relative(dir.path(), &found),
        vec![
            "content/pages/blog/2024/deep/nested/page.mdx",
            "content/pages/blog/2024/post-a/page.mdx",
        ]
    );
}

#[test]
fn test_discovery_order_is_stable() {
    let dir = TempDir::new().unwrap();
    for slug in ["c", "a", "b", "aa"] {
        touch(dir.path(), &format!("content/pages/blog/{}/page.mdx", slug));
    }
    let first = discover(dir.path(), PATTERN).unwrap();
    let second = discover(dir.path(), PATTERN).unwrap();
    assert_eq!(first, second);

    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(first, sorted);
}

#[test]
fn test_custom_pattern() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "docs/intro.mdx");
    touch(dir.path(), "docs/guides/setup.mdx");
    touch(dir.path(), "docs/guides/setup.md");

    let found = discover(dir.path(), "docs/**/*.mdx").unwrap();
    assert_eq!(
        relative(dir.path(), &found),
        vec!["docs/guides/setup.mdx", "docs/intro.mdx"]
    );
}

#[test]
fn test_invalid_pattern_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = discover(dir.path(), "content/{unclosed").unwrap_err();
    assert!(matches!(err, IndexerError::Pattern(_)));
}
