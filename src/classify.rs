// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Heuristic text classification: is this field human text or layout noise?
//!
//! CMS blocks have no fixed schema. A hero banner carries `title` next to
//! `className`, a card grid carries `variant: "outlined"` next to a paragraph
//! of prose. We can't type our way out of that, so we classify by rules,
//! evaluated in priority order for a string under key `k`:
//!
//! | # | Condition                                        | Verdict  |
//! |---|--------------------------------------------------|----------|
//! | a | `k` is deny-listed (exact, case-insensitive)      | reject   |
//! | b | `k` matches the allow-list, value is not noise    | accept   |
//! | c | value is long (≥ prose threshold) and not noise   | accept   |
//! | d | anything else                                     | reject   |
//!
//! Keys are matched raw. Only values are cleaned (HTML, Markdown markers,
//! diacritics) before the noise patterns run.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::utils::{char_len, collapse_whitespace, strip_diacritics};

/// Values shorter than this (trimmed, in chars) are never text.
pub const MIN_TEXT_LEN: usize = 3;

/// Semantic key fragments that usually hold human text.
static TEXTUAL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)title|subtitle|heading|text|description|content|summary|excerpt|caption|name|value|label|meta|specialt(?:y|ies)|focus|card",
    )
    .expect("textual key pattern")
});

/// Presentation/layout keys. Matched by case-insensitive equality, never substring.
const NON_TEXT_KEYS: &[&str] = &[
    "textAlign",
    "className",
    "class",
    "style",
    "width",
    "height",
    "color",
    "variant",
    "template",
    "_template",
    "align",
    "alignment",
    "size",
    "position",
    "layout",
    "direction",
    "icon",
    "image",
    "src",
    "href",
    "url",
    "link",
    "id",
    "type",
    "background",
    "backgroundColor",
    "theme",
    "padding",
    "margin",
    "gap",
    "columns",
    "animation",
];

/// Values that look like structure rather than prose.
static NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // empty or whitespace only
        r"^\s*$",
        // asset paths
        r"(?i)^/?assets/",
        // image/video files
        r"(?i)\.(?:png|jpe?g|gif|svg|webp|avif|ico|bmp|tiff?|mp4|webm|mov|avi|mkv|ogv|m4v)(?:\?\S*)?$",
        // single identifier token, usually a CSS class or enum value
        r"^[A-Za-z0-9_-]{1,30}$",
        // punctuation and symbols only
        r"^[^\p{L}\p{N}]+$",
        // utility classes (Tailwind-style spacing/sizing/color prefixes)
        r"^-?(?:p|px|py|pt|pr|pb|pl|m|mx|my|mt|mr|mb|ml|w|h|min-w|max-w|min-h|max-h|gap|gap-x|gap-y|space-x|space-y|text|bg|border|rounded|shadow|font|leading|tracking|z|inset|opacity|grid-cols|col-span|row-span|flex|justify)-\S+(?:\s|$)",
        r"^(?:sm|md|lg|xl|2xl|hover|focus|dark):\S+",
        // bare size/position tokens
        r"(?i)^(?:xs|sm|md|lg|xl|2xl|3xl|4xl|full|auto|none|left|right|center|top|bottom|middle|start|end|between|around|stretch|baseline|small|medium|large|horizontal|vertical)$",
        // bare HTML tag names
        r"(?i)^</?(?:div|span|p|a|h[1-6]|section|article|header|footer|nav|main|aside|ul|ol|li|img|button|strong|em|br|hr)\s*/?>$",
        r"(?i)^(?:div|span|p|a|h[1-6]|section|article|header|footer|nav|main|aside|ul|ol|li|img|button|strong|em|br|hr)$",
        // literal tokens
        r"(?i)^(?:true|false|null|undefined|parent|child)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("noise pattern"))
    .collect()
});

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("html tag pattern"));
static HTML_SPACE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:nbsp|#160);").expect("entity pattern"));
static MD_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("image pattern"));
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("link pattern"));
static MD_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").expect("heading pattern"));
static MD_BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*>[ \t]?").expect("blockquote pattern"));
static MD_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+").expect("list pattern"));
static MD_UNDERSCORE_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_{1,3}([^_\n]+?)_{1,3}\b").expect("emphasis pattern"));
static MD_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*`]+|~~").expect("marker pattern"));

/// Outcome of running the rule list over one string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Rule (a): the key is presentational
    DeniedKey,
    /// Rule (b): semantic key with a text-like value
    TextualKey,
    /// Rule (c): unknown key but long enough to be prose
    LongProse,
    /// Rule (d)
    Rejected,
}

impl Decision {
    pub fn accepts(self) -> bool {
        matches!(self, Decision::TextualKey | Decision::LongProse)
    }
}

/// True if `key` equals a deny-listed presentation key, ignoring case.
pub fn is_non_text_key(key: &str) -> bool {
    NON_TEXT_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// True if `key` contains a semantic text fragment and is not deny-listed.
pub fn is_textual_key(key: &str) -> bool {
    !is_non_text_key(key) && TEXTUAL_KEY.is_match(key)
}

/// True unless `value` is a string that could plausibly be human text.
pub fn looks_like_non_text_value(value: &Value) -> bool {
    match value {
        Value::String(s) => looks_like_non_text(s),
        _ => true,
    }
}

/// String form of [`looks_like_non_text_value`].
pub fn looks_like_non_text(value: &str) -> bool {
    let trimmed = value.trim();
    if char_len(trimmed) < MIN_TEXT_LEN {
        return true;
    }
    NOISE_PATTERNS.iter().any(|re| re.is_match(trimmed))
}

/// Strip markup and diacritics, then collapse whitespace.
pub fn clean_string(value: &str) -> String {
    let text = HTML_TAG.replace_all(value, " ");
    let text = HTML_SPACE_ENTITY.replace_all(&text, " ");
    let text = MD_IMAGE.replace_all(&text, "$1");
    let text = MD_LINK.replace_all(&text, "$1");
    let text = MD_HEADING.replace_all(&text, "");
    let text = MD_BLOCKQUOTE.replace_all(&text, "");
    let text = MD_LIST.replace_all(&text, "");
    let text = MD_UNDERSCORE_EMPHASIS.replace_all(&text, "$1");
    let text = MD_MARKERS.replace_all(&text, "");
    collapse_whitespace(&strip_diacritics(&text))
}

/// Run the rule list over an already-cleaned value.
pub fn decide(key: &str, cleaned: &str, prose_min_len: usize) -> Decision {
    if is_non_text_key(key) {
        return Decision::DeniedKey;
    }
    let noise = looks_like_non_text(cleaned);
    if TEXTUAL_KEY.is_match(key) {
        if noise {
            Decision::Rejected
        } else {
            Decision::TextualKey
        }
    } else if char_len(cleaned) >= prose_min_len && !noise {
        Decision::LongProse
    } else {
        Decision::Rejected
    }
}

/// Clean `raw` and return it if the rules accept it as text under `key`.
pub fn classify(key: &str, raw: &str, prose_min_len: usize) -> Option<String> {
    if is_non_text_key(key) {
        return None;
    }
    let cleaned = clean_string(raw);
    decide(key, &cleaned, prose_min_len)
        .accepts()
        .then_some(cleaned)
}
