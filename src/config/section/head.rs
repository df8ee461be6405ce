//! `head` configuration: elements injected into every document head.
//!
//! ```toml
//! [[head]]
//! tag = "link"
//! attrs = { rel = "preconnect", href = "https://fonts.googleapis.com" }
//!
//! [[head]]
//! tag = "meta"
//! attrs = { name = "robots", content = "index, follow" }
//!
//! [[head]]
//! tag = "script"
//! attrs = { src = "https://plausible.io/js/script.js", defer = true }
//! ```
//!
//! Order is significant: preconnect hints should come before stylesheets,
//! stylesheets before analytics scripts.

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

use crate::config::raw::{RawTable, kind_of};
use crate::config::{ConfigDiagnostics, ErrorCode, FieldPath};
use crate::utils::html::{escape, escape_attr, escape_script};

pub(crate) const KEY: &str = "head";

const FIELDS: &[&str] = &["tag", "attrs", "content"];

/// Meta attributes naming what a `<meta>` describes.
const META_NAMES: &[&str] = &["name", "property", "http-equiv"];

// ============================================================================
// Types
// ============================================================================

/// Element kinds allowed in the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadTagKind {
    Link,
    Meta,
    Script,
}

impl HeadTagKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Meta => "meta",
            Self::Script => "script",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "link" => Some(Self::Link),
            "meta" => Some(Self::Meta),
            "script" => Some(Self::Script),
            _ => None,
        }
    }

    /// Void elements have no closing tag and no content.
    const fn is_void(&self) -> bool {
        !matches!(self, Self::Script)
    }
}

/// Attribute value: text, or a boolean attribute (`defer`, `async`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Text(String),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// One element to inject into the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadTag {
    pub tag: HeadTagKind,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, AttrValue>,
    /// Inline content (scripts only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// What a head tag is for, used to lint load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadIntent {
    /// `preconnect` / `dns-prefetch` hints.
    Preconnect,
    Stylesheet,
    /// `preload` / `modulepreload` (fonts, critical assets).
    Preload,
    Script,
    Meta,
    Other,
}

/// De-duplication identity of a head tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadKey {
    tag: HeadTagKind,
    identity: String,
}

impl fmt::Display for HeadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {}", self.tag.as_str(), self.identity)
    }
}

// ============================================================================
// HeadTag
// ============================================================================

impl HeadTag {
    pub fn new(tag: HeadTagKind) -> Self {
        Self {
            tag,
            attrs: IndexMap::new(),
            content: None,
        }
    }

    /// `<link rel=.. href=..>`
    pub fn link(rel: &str, href: &str) -> Self {
        Self::new(HeadTagKind::Link)
            .with_attr("rel", rel)
            .with_attr("href", href)
    }

    /// `<meta name=.. content=..>`
    pub fn meta(name: &str, content: &str) -> Self {
        Self::new(HeadTagKind::Meta)
            .with_attr("name", name)
            .with_attr("content", content)
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Text value of an attribute, ignoring boolean attributes.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(AttrValue::as_text)
    }

    /// Identity used for de-duplication.
    ///
    /// `href`, then `src`, then the meta naming attributes, then `charset`,
    /// then inline content; a tag with none of these is identified by all of
    /// its attributes.
    pub fn key(&self) -> HeadKey {
        let charset = self.attrs.contains_key("charset");
        let identity = ["href", "src"]
            .into_iter()
            .chain(META_NAMES.iter().copied())
            .find_map(|name| self.attr(name).map(|v| format!("{name}={v}")))
            .or_else(|| charset.then(|| "charset".to_string()))
            .or_else(|| self.content.as_ref().map(|c| format!("content={c}")))
            .unwrap_or_else(|| {
                self.attrs
                    .iter()
                    .map(|(k, v)| match v {
                        AttrValue::Text(t) => format!("{k}={t}"),
                        AttrValue::Flag(b) => format!("{k}:{b}"),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            });

        HeadKey {
            tag: self.tag,
            identity,
        }
    }

    pub fn intent(&self) -> HeadIntent {
        match self.tag {
            HeadTagKind::Meta => HeadIntent::Meta,
            HeadTagKind::Script => HeadIntent::Script,
            HeadTagKind::Link => {
                let rel = self.attr("rel").unwrap_or_default().to_ascii_lowercase();
                let has = |token: &str| rel.split_ascii_whitespace().any(|t| t == token);
                if has("preconnect") || has("dns-prefetch") {
                    HeadIntent::Preconnect
                } else if has("stylesheet") {
                    HeadIntent::Stylesheet
                } else if has("preload") || has("modulepreload") {
                    HeadIntent::Preload
                } else {
                    HeadIntent::Other
                }
            }
        }
    }

    // ========================================================================
    // parsing
    // ========================================================================

    pub(crate) fn from_raw(
        value: &Value,
        path: FieldPath,
        diag: &mut ConfigDiagnostics,
    ) -> Option<Self> {
        let table = RawTable::open(value, path, FIELDS, diag)?;

        let tag = match table.required_string("tag", diag) {
            Some(raw) => match HeadTagKind::parse(raw.trim()) {
                Some(tag) => Some(tag),
                None => {
                    diag.error_with_hint(
                        ErrorCode::InvalidConfig,
                        table.path_of("tag"),
                        format!("unsupported head tag '{raw}'"),
                        "use one of: link, meta, script",
                    );
                    None
                }
            },
            None => None,
        };
        let attrs = table
            .table("attrs", diag)
            .map(|map| parse_attrs(map, &table.path_of("attrs"), diag))
            .unwrap_or_default();
        let content = table.string("content", diag).map(str::to_string);

        let parsed = Self {
            tag: tag?,
            attrs,
            content,
        };
        parsed.check_required(table.path(), diag).then_some(parsed)
    }

    /// Report missing or conflicting attributes for this tag kind.
    fn check_required(&self, path: &FieldPath, diag: &mut ConfigDiagnostics) -> bool {
        let before = diag.len();

        if self.tag.is_void() && self.content.is_some() {
            diag.error_with_hint(
                ErrorCode::InvalidConfig,
                path.key("content"),
                format!("<{}> cannot carry inline content", self.tag.as_str()),
                "move the value into `attrs`",
            );
        }

        let has_text = |name: &str| self.attr(name).is_some_and(|v| !v.trim().is_empty());

        match self.tag {
            HeadTagKind::Link => {
                if !has_text("href") {
                    diag.error(
                        ErrorCode::IncompleteHeadTag,
                        path.clone(),
                        "<link> requires `attrs.href`",
                    );
                }
            }
            HeadTagKind::Meta => {
                let named = META_NAMES.iter().any(|&name| has_text(name));
                if !self.attrs.contains_key("charset") && !(named && has_text("content")) {
                    diag.error_with_hint(
                        ErrorCode::IncompleteHeadTag,
                        path.clone(),
                        "<meta> requires `attrs.charset`, or `attrs.content` with one of `name`, `property`, `http-equiv`",
                        "e.g. attrs = { name = \"robots\", content = \"index, follow\" }",
                    );
                }
            }
            HeadTagKind::Script => {
                let has_src = self.attrs.contains_key("src");
                if has_src && !has_text("src") {
                    diag.error(
                        ErrorCode::IncompleteHeadTag,
                        path.key("attrs").key("src"),
                        "<script> `attrs.src` must be a non-empty URL",
                    );
                }
                match (has_src, self.content.is_some()) {
                    (true, true) => diag.error_with_hint(
                        ErrorCode::AmbiguousTarget,
                        path.clone(),
                        "<script> has both `attrs.src` and inline `content`",
                        "keep exactly one of them",
                    ),
                    (false, false) => diag.error(
                        ErrorCode::IncompleteHeadTag,
                        path.clone(),
                        "<script> requires `attrs.src` or inline `content`",
                    ),
                    _ => {}
                }
            }
        }

        diag.len() == before
    }
}

fn parse_attrs(
    map: &serde_json::Map<String, Value>,
    path: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> IndexMap<String, AttrValue> {
    let mut attrs = IndexMap::with_capacity(map.len());

    for (name, value) in map {
        let attr_path = path.key(name);
        if !is_valid_attr_name(name) {
            diag.error(
                ErrorCode::InvalidConfig,
                attr_path,
                format!("'{name}' is not a valid attribute name"),
            );
            continue;
        }
        let value = match value {
            Value::String(s) => AttrValue::Text(s.clone()),
            Value::Bool(b) => AttrValue::Flag(*b),
            Value::Number(n) => AttrValue::Text(n.to_string()),
            other => {
                diag.error(
                    ErrorCode::InvalidConfig,
                    attr_path,
                    format!(
                        "attribute value must be text or boolean, found a {}",
                        kind_of(other)
                    ),
                );
                continue;
            }
        };
        let lower = name.to_ascii_lowercase();
        if attrs.contains_key(&lower) {
            diag.error_with_hint(
                ErrorCode::InvalidConfig,
                attr_path,
                format!("attribute '{name}' is already set; names are case-insensitive"),
                format!("keep a single `{lower}`"),
            );
            continue;
        }
        attrs.insert(lower, value);
    }

    attrs
}

fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| {
                c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=')
            })
}

// ============================================================================
// sequence operations
// ============================================================================

/// Parse the `head` sequence.
///
/// Valid tags are returned in declaration order with repeated identities
/// collapsed onto their last occurrence.
pub(crate) fn parse_head(
    items: &[Value],
    path: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> Vec<HeadTag> {
    let parsed: Vec<(FieldPath, HeadTag)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let item_path = path.index(i);
            HeadTag::from_raw(item, item_path.clone(), diag).map(|tag| (item_path, tag))
        })
        .collect();

    lint_order(&parsed, diag);

    let last = last_positions(parsed.iter().map(|(_, tag)| tag));
    let mut kept = Vec::with_capacity(parsed.len());
    for (i, (item_path, tag)) in parsed.iter().enumerate() {
        let last_index = last[&tag.key()];
        if last_index == i {
            kept.push(tag.clone());
        } else {
            diag.warn(
                item_path.clone(),
                format!(
                    "{} is declared again at {}; only the last one is kept",
                    tag.key(),
                    parsed[last_index].0.as_str()
                ),
            );
        }
    }
    kept
}

/// Remove repeated identities, keeping each tag at its last occurrence.
pub fn dedup_head(tags: impl IntoIterator<Item = HeadTag>) -> Vec<HeadTag> {
    let tags: Vec<HeadTag> = tags.into_iter().collect();
    let last = last_positions(tags.iter());
    tags.into_iter()
        .enumerate()
        .filter(|(i, tag)| last[&tag.key()] == *i)
        .map(|(_, tag)| tag)
        .collect()
}

fn last_positions<'a>(tags: impl Iterator<Item = &'a HeadTag>) -> FxHashMap<HeadKey, usize> {
    let mut last = FxHashMap::default();
    for (i, tag) in tags.enumerate() {
        last.insert(tag.key(), i);
    }
    last
}

/// Warn when a connection hint comes after something that already fetches.
fn lint_order(tags: &[(FieldPath, HeadTag)], diag: &mut ConfigDiagnostics) {
    let mut first_fetch: Option<&FieldPath> = None;
    for (path, tag) in tags {
        match tag.intent() {
            HeadIntent::Stylesheet | HeadIntent::Script if first_fetch.is_none() => {
                first_fetch = Some(path);
            }
            HeadIntent::Preconnect => {
                if let Some(fetch) = first_fetch {
                    diag.warn(
                        path.clone(),
                        format!(
                            "preconnect hint comes after {}; move it earlier so it can take effect",
                            fetch.as_str()
                        ),
                    );
                }
            }
            _ => {}
        }
    }
}

// ============================================================================
// rendering
// ============================================================================

impl fmt::Display for HeadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag.as_str())?;
        for (name, value) in &self.attrs {
            match value {
                AttrValue::Text(text) => write!(f, " {name}=\"{}\"", escape_attr(text))?,
                AttrValue::Flag(true) => write!(f, " {name}")?,
                AttrValue::Flag(false) => {}
            }
        }
        f.write_str(">")?;

        if self.tag.is_void() {
            return Ok(());
        }
        if let Some(content) = &self.content {
            f.write_str(&escape_script(content))?;
        }
        write!(f, "</{}>", self.tag.as_str())
    }
}

/// Serialize head tags to HTML, one element per line, in order.
pub fn render_head<'a>(tags: impl IntoIterator<Item = &'a HeadTag>) -> String {
    tags.into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `<title>` element for a page title.
pub fn render_title(title: &str) -> String {
    format!("<title>{}</title>", escape(title))
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> (Vec<HeadTag>, ConfigDiagnostics) {
        let mut diag = ConfigDiagnostics::new();
        let tags = parse_head(value.as_array().unwrap(), &FieldPath::new(KEY), &mut diag);
        (tags, diag)
    }

    #[test]
    fn test_parse_all_kinds() {
        let (tags, diag) = parse(json!([
            { "tag": "link", "attrs": { "rel": "preconnect", "href": "https://fonts.googleapis.com" } },
            { "tag": "meta", "attrs": { "name": "robots", "content": "index, follow" } },
            { "tag": "script", "attrs": { "src": "https://plausible.io/js/script.js", "defer": true } },
            { "tag": "script", "content": "window.dataLayer = [];" },
        ]));
        assert!(diag.is_empty(), "{diag}");
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[0].intent(), HeadIntent::Preconnect);
        assert_eq!(tags[2].attrs["defer"], AttrValue::Flag(true));
        assert_eq!(tags[3].content.as_deref(), Some("window.dataLayer = [];"));
    }

    #[test]
    fn test_link_without_href() {
        let (tags, diag) = parse(json!([{ "tag": "link", "attrs": { "rel": "icon" } }]));
        assert!(tags.is_empty());
        assert_eq!(diag.errors()[0].code, ErrorCode::IncompleteHeadTag);
        assert_eq!(diag.errors()[0].path.as_str(), "head/0");
    }

    #[test]
    fn test_meta_requires_name_and_content() {
        let (_, diag) = parse(json!([
            { "tag": "meta", "attrs": { "name": "robots" } },
            { "tag": "meta", "attrs": { "charset": "utf-8" } },
        ]));
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].path.as_str(), "head/0");
    }

    #[test]
    fn test_script_src_and_content() {
        let (tags, diag) = parse(json!([
            { "tag": "script", "attrs": { "src": "a.js" }, "content": "x()" },
            { "tag": "script", "attrs": { "async": true } },
        ]));
        assert!(tags.is_empty());
        let codes: Vec<_> = diag.errors().iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            [ErrorCode::AmbiguousTarget, ErrorCode::IncompleteHeadTag]
        );
    }

    #[test]
    fn test_script_with_blank_src() {
        let (tags, diag) = parse(json!([
            { "tag": "script", "attrs": { "src": "" }, "content": "run()" },
            { "tag": "script", "attrs": { "src": "  " } },
        ]));
        assert!(tags.is_empty());
        let found: Vec<_> = diag
            .errors()
            .iter()
            .map(|d| (d.code, d.path.as_str()))
            .collect();
        assert_eq!(
            found,
            [
                (ErrorCode::IncompleteHeadTag, "head/0/attrs/src"),
                (ErrorCode::AmbiguousTarget, "head/0"),
                (ErrorCode::IncompleteHeadTag, "head/1/attrs/src"),
            ]
        );
    }

    #[test]
    fn test_attr_names_differing_in_case() {
        let (_, diag) = parse(json!([
            { "tag": "link", "attrs": { "HREF": "a.css", "href": "b.css", "rel": "stylesheet" } },
        ]));
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].code, ErrorCode::InvalidConfig);
        assert_eq!(diag.errors()[0].path.as_str(), "head/0/attrs/href");
    }

    #[test]
    fn test_unknown_tag_and_bad_attr() {
        let (_, diag) = parse(json!([
            { "tag": "style", "content": "body {}" },
            { "tag": "link", "attrs": { "href": "a.css", "bad name": "x", "data": [1] } },
        ]));
        assert_eq!(diag.len(), 3);
        assert_eq!(diag.errors()[0].path.as_str(), "head/0/tag");
        assert_eq!(diag.errors()[1].path.as_str(), "head/1/attrs/bad name");
        assert_eq!(diag.errors()[2].path.as_str(), "head/1/attrs/data");
    }

    #[test]
    fn test_void_tag_with_content() {
        let (_, diag) = parse(json!([
            { "tag": "link", "attrs": { "rel": "stylesheet", "href": "a.css" }, "content": "x" },
        ]));
        assert_eq!(diag.errors()[0].path.as_str(), "head/0/content");
    }

    #[test]
    fn test_duplicates_keep_last() {
        let (tags, diag) = parse(json!([
            { "tag": "meta", "attrs": { "name": "robots", "content": "noindex" } },
            { "tag": "link", "attrs": { "rel": "stylesheet", "href": "a.css" } },
            { "tag": "meta", "attrs": { "name": "robots", "content": "index, follow" } },
        ]));
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].0.as_str(), "head/0");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].attr("content"), Some("index, follow"));
    }

    #[test]
    fn test_distinct_meta_tags_are_not_collapsed() {
        let tags = dedup_head([
            HeadTag::meta("robots", "index"),
            HeadTag::meta("description", "docs"),
            HeadTag::new(HeadTagKind::Meta)
                .with_attr("property", "og:title")
                .with_attr("content", "T"),
        ]);
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_preconnect_order_lint() {
        let (_, diag) = parse(json!([
            { "tag": "link", "attrs": { "rel": "stylesheet", "href": "https://fonts.googleapis.com/css2" } },
            { "tag": "link", "attrs": { "rel": "preconnect", "href": "https://fonts.gstatic.com" } },
        ]));
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].0.as_str(), "head/1");
    }

    #[test]
    fn test_render() {
        let tags = [
            HeadTag::link("preconnect", "https://fonts.gstatic.com")
                .with_attr("crossorigin", true),
            HeadTag::meta("description", "Fast & small"),
            HeadTag::new(HeadTagKind::Script)
                .with_attr("src", "/a.js")
                .with_attr("defer", true)
                .with_attr("async", false),
            HeadTag::new(HeadTagKind::Script).with_content("let s = '</script>';"),
        ];
        let html = render_head(&tags);
        let lines: Vec<_> = html.lines().collect();
        assert_eq!(
            lines,
            [
                r#"<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>"#,
                r#"<meta name="description" content="Fast &amp; small">"#,
                r#"<script src="/a.js" defer></script>"#,
                r#"<script>let s = '<\/script>';</script>"#,
            ]
        );
    }

    #[test]
    fn test_render_title() {
        assert_eq!(render_title("A <B>"), "<title>A &lt;B&gt;</title>");
    }
}
