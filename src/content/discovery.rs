//! Content discovery: which files go into the index.
//!
//! The pattern is a glob relative to the build root where `*` stays inside one
//! path segment and `**` spans directories. Walking starts at the pattern's
//! literal prefix (`content/pages/blog` for the default pattern) so a build
//! root full of `node_modules` costs nothing.
//!
//! Output is sorted: the index is built in discovery order, so a stable order
//! is what makes reruns byte-identical.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// Compile a content pattern. Separators are literal.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
    Ok(glob.compile_matcher())
}

/// Leading directories of `pattern` that contain no glob syntax.
///
/// `content/pages/blog/*/**/page.mdx` → `content/pages/blog`
pub fn literal_prefix(pattern: &str) -> PathBuf {
    let segments: Vec<&str> = pattern.split('/').collect();
    // the last segment is a file name, never a directory to walk from
    let dirs = &segments[..segments.len().saturating_sub(1)];
    dirs.iter()
        .take_while(|segment| !segment.contains(GLOB_META))
        .filter(|segment| !segment.is_empty() && **segment != ".")
        .collect()
}

/// Every file under `root` matching `pattern`, sorted.
pub fn discover(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = compile_pattern(pattern)?;
    let start = root.join(literal_prefix(pattern));

    if !start.is_dir() {
        debug!(path = %start.display(), "content directory does not exist");
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(&start).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if matcher.is_match(to_slash(relative)) {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    debug!(count = paths.len(), pattern, "discovered content documents");
    Ok(paths)
}

/// `/`-joined form of a relative path, independent of the host separator.
fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
