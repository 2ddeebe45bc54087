//! Display metadata derived from a finished search record.

use crate::types::{MetaEntry, SearchDocument, KEY_TITLE};

/// Build the `MetaEntry` for `doc`.
///
/// Title falls back `headerTitle` → `metaTitle` → `title` → id, excerpt
/// falls back `headerSubtitle` → `metaDescription`. Empty values never win.
pub fn meta_entry(doc: &SearchDocument) -> MetaEntry {
    let first_of = |keys: &[&str]| -> Option<String> {
        keys.iter()
            .find_map(|key| doc.non_empty(key))
            .map(str::to_string)
    };

    MetaEntry {
        id: doc.id().to_string(),
        title: first_of(&["headerTitle", "metaTitle", KEY_TITLE])
            .unwrap_or_else(|| doc.id().to_string()),
        url: doc.url().to_string(),
        excerpt: first_of(&["headerSubtitle", "metaDescription"]),
        date: first_of(&["date"]),
        read_time: first_of(&["readTime"]),
        author: first_of(&["author"]),
        tags: doc.tags().filter(|tags| !tags.is_empty()),
        featured_image: first_of(&["featuredImage"]),
    }
}
