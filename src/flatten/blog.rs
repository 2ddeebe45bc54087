//! Blog header extraction.
//!
//! The blog header block is the one block with a known shape. Its sub-fields
//! are read by name and copied onto the document under fixed keys, bypassing
//! the text classifier entirely. Dates are rendered the way the site shows
//! them (`5 de marzo de 2024`), read times get a unit suffix.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::template_name;
use crate::classify::clean_string;
use crate::types::{BlogTag, SearchDocument};

const FIELD_TITLE: &str = "blog_header_title";
const FIELD_SUBTITLE: &str = "blog_header_subtitle";
const FIELD_AUTHOR: &str = "blog_header_author";
const FIELD_DATE: &str = "blog_header_date";
const FIELD_READ_TIME: &str = "blog_header_read_time";
const FIELD_TAGS: &str = "blog_header_tags";
const FIELD_FEATURED_IMAGE: &str = "blog_header_featured_image";
const FIELD_IMAGE: &str = "blog_header_image";

/// Naive formats tried after RFC 3339, most specific first.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Structured metadata carried by a blog header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogHeader {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub read_time: Option<String>,
    pub tags: Option<Vec<BlogTag>>,
    pub featured_image: Option<String>,
}

/// First top-level block whose template name is `marker`.
pub fn find_blog_header<'a>(blocks: &'a [Value], marker: &str) -> Option<&'a Value> {
    blocks
        .iter()
        .find(|block| template_name(block).is_some_and(|name| name == marker))
}

impl BlogHeader {
    pub fn extract(block: &Value, default_tag_color: &str) -> Self {
        Self {
            title: cleaned(block.get(FIELD_TITLE)),
            subtitle: cleaned(block.get(FIELD_SUBTITLE)),
            author: block.get(FIELD_AUTHOR).and_then(author_name),
            date: block.get(FIELD_DATE).and_then(|raw| {
                let formatted = format_date_value(raw);
                if formatted.is_none() {
                    debug!(value = %raw, "ignoring unparseable blog date");
                }
                formatted
            }),
            read_time: block.get(FIELD_READ_TIME).and_then(read_time),
            tags: block
                .get(FIELD_TAGS)
                .and_then(|tags| extract_tags(tags, default_tag_color)),
            featured_image: block
                .get(FIELD_FEATURED_IMAGE)
                .and_then(image_src)
                .or_else(|| block.get(FIELD_IMAGE).and_then(image_src)),
        }
    }

    /// Copy every present field onto `doc`.
    pub fn apply(self, doc: &mut SearchDocument) {
        let Self {
            title,
            subtitle,
            author,
            date,
            read_time,
            tags,
            featured_image,
        } = self;

        for (key, value) in [
            ("headerTitle", title),
            ("headerSubtitle", subtitle),
            ("author", author),
            ("date", date),
            ("readTime", read_time),
        ] {
            if let Some(value) = value {
                doc.insert_text(key, value);
            }
        }
        if let Some(tags) = tags {
            doc.insert_tags(&tags);
        }
        if let Some(image) = featured_image {
            doc.insert_text("featuredImage", image);
        }
    }
}

fn cleaned(value: Option<&Value>) -> Option<String> {
    let text = clean_string(value?.as_str()?);
    (!text.is_empty()).then_some(text)
}

fn non_empty_trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Author as a plain string or a `{name}` reference.
fn author_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty_trimmed(s),
        Value::Object(obj) => obj.get("name")?.as_str().and_then(non_empty_trimmed),
        _ => None,
    }
}

/// `5` → `"5 min"`, `5.0` → `"5 min"`.
fn read_time(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(format!("{} min", f as i64))
            }
            _ => Some(format!("{} min", n)),
        },
        Value::String(s) => non_empty_trimmed(s).map(|s| format!("{} min", s)),
        _ => None,
    }
}

/// Image as a path string or a `{src}` object.
fn image_src(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty_trimmed(s),
        Value::Object(obj) => obj.get("src")?.as_str().and_then(non_empty_trimmed),
        _ => None,
    }
}

/// Tags as `{name, color}` objects; bare strings are names.
fn extract_tags(value: &Value, default_color: &str) -> Option<Vec<BlogTag>> {
    let tags: Vec<BlogTag> = value
        .as_array()?
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(BlogTag {
                name: non_empty_trimmed(name)?,
                color: default_color.to_string(),
            }),
            Value::Object(obj) => Some(BlogTag {
                name: obj.get("name")?.as_str().and_then(non_empty_trimmed)?,
                color: obj
                    .get("color")
                    .and_then(Value::as_str)
                    .and_then(non_empty_trimmed)
                    .unwrap_or_else(|| default_color.to_string()),
            }),
            _ => None,
        })
        .collect();
    (!tags.is_empty()).then_some(tags)
}

/// A date string, or epoch milliseconds.
fn format_date_value(value: &Value) -> Option<String> {
    let date = match value {
        Value::String(s) => parse_date(s)?,
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?)?.date_naive(),
        _ => return None,
    };
    format_long_date_es(date)
}

/// Calendar date of a timestamp, taken in UTC.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Long-form Spanish date: `5 de marzo de 2024`.
pub fn format_long_date_es(date: NaiveDate) -> Option<String> {
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(
        midnight
            .format_localized("%-d de %B de %Y", Locale::es_ES)
            .to_string(),
    )
}
