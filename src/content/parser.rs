//! Front-matter + body parsing.
//!
//! A content file is an optional `---`-delimited YAML block followed by free
//! Markdown/MDX. The YAML has no schema, so it is kept as a
//! `serde_json::Value` tree and interpreted lazily by the flattener.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{IndexerError, Result};

const DELIMITER: &str = "---";

/// One source file, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    pub path: PathBuf,
    /// Always an object; empty when the file has no front-matter.
    pub front_matter: Value,
    pub body: String,
}

impl ContentDocument {
    /// Read and parse a file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| IndexerError::io(path, e))?;
        Self::parse(path, &source)
    }

    /// Parse already-loaded source text.
    pub fn parse(path: &Path, source: &str) -> Result<Self> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);

        let (front_matter, body) = match split_front_matter(source) {
            Some(Ok((yaml, body))) => (parse_yaml(path, yaml)?, body),
            Some(Err(message)) => {
                return Err(IndexerError::FrontMatter {
                    path: path.to_path_buf(),
                    message,
                })
            }
            None => (Value::Object(Map::new()), source),
        };

        Ok(Self {
            path: path.to_path_buf(),
            front_matter,
            body: body.to_string(),
        })
    }

    /// `draft` flag, with JavaScript truthiness.
    pub fn is_draft(&self) -> bool {
        self.front_matter.get("draft").is_some_and(is_truthy)
    }

    /// Raw title; empty when absent.
    pub fn title(&self) -> String {
        match self.front_matter.get("title") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Top-level blocks; empty when absent or not an array.
    pub fn blocks(&self) -> &[Value] {
        self.front_matter
            .get("blocks")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// String field of the `seo` object.
    pub fn seo(&self, field: &str) -> Option<&str> {
        self.front_matter.get("seo")?.get(field)?.as_str()
    }
}

/// Split `source` into (yaml, body).
///
/// Returns `None` when the file doesn't open with a delimiter line and
/// `Some(Err)` when the block is never closed.
fn split_front_matter(source: &str) -> Option<std::result::Result<(&str, &str), String>> {
    let mut lines = source.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &source[first.len()..offset];
            let body = &source[offset + line.len()..];
            return Some(Ok((yaml, body)));
        }
        offset += line.len();
    }
    Some(Err("front-matter block is never closed".to_string()))
}

fn parse_yaml(path: &Path, yaml: &str) -> Result<Value> {
    if yaml.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    let value: Value = serde_yaml::from_str(yaml).map_err(|source| IndexerError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(value),
        _ => Err(IndexerError::FrontMatter {
            path: path.to_path_buf(),
            message: "front-matter must be a mapping".to_string(),
        }),
    }
}

/// JavaScript truthiness for a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Derive a URL slug from a content file path.
///
/// The path is taken relative to `content_root`, the file name is dropped,
/// and the remaining directories become an absolute, `/`-separated path.
///
/// `content/pages/blog/2024/my-post/page.mdx` → `/blog/2024/my-post`
pub fn path_to_slug(path: &Path, content_root: &Path) -> String {
    let relative = path.strip_prefix(content_root).unwrap_or(path);
    let dir = relative.parent().unwrap_or(Path::new(""));
    let parts: Vec<String> = dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("/{}", parts.join("/"))
}
