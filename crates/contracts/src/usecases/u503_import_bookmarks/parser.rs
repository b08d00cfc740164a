//! Browser bookmark export (Netscape bookmark HTML).
//!
//! Only document order matters: every `<A>` after an `<H3>` and before the
//! next `<H3>` belongs to that heading, whatever the nesting.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::shared::error::DashboardError;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<h3\b[^>]*>(.*?)</h3\s*>|<a\b([^>]*)>(.*?)</a\s*>")
        .expect("bookmark token regex is valid")
});

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(href|icon)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("bookmark attribute regex is valid")
});

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("entity regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkLink {
    pub title: String,
    pub url: String,
    /// Embedded icon (usually a data URI), empty when absent
    pub icon: String,
}

/// Папка закладок (заголовок H3 и ссылки под ним)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkFolder {
    pub name: String,
    pub links: Vec<BookmarkLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBookmarks {
    pub folders: Vec<BookmarkFolder>,
}

impl ParsedBookmarks {
    pub fn total(&self) -> usize {
        self.folders.iter().map(|f| f.links.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn decode_entity(caps: &Captures) -> String {
    let name = &caps[1];
    let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            _ => None,
        }
    };
    decoded.map_or_else(|| caps[0].to_string(), String::from)
}

/// Text content of an HTML fragment: tags stripped, entities decoded, trimmed
pub fn text_content(fragment: &str) -> String {
    let without_tags = TAG_RE.replace_all(fragment, "");
    ENTITY_RE
        .replace_all(&without_tags, decode_entity)
        .trim()
        .to_string()
}

fn attribute(attrs: &str, name: &str) -> String {
    ATTR_RE
        .captures_iter(attrs)
        .find(|c| c[1].eq_ignore_ascii_case(name))
        .and_then(|c| c.get(2).or_else(|| c.get(3)))
        .map(|m| ENTITY_RE.replace_all(m.as_str(), decode_entity).trim().to_string())
        .unwrap_or_default()
}

/// Links before the first heading and links without `href` are dropped,
/// as are folders left without links.
pub fn parse_bookmarks_html(html: &str) -> Result<ParsedBookmarks, DashboardError> {
    let mut folders: Vec<BookmarkFolder> = Vec::new();
    let mut saw_heading = false;

    for caps in TOKEN_RE.captures_iter(html) {
        if let Some(heading) = caps.get(1) {
            saw_heading = true;
            folders.push(BookmarkFolder {
                name: text_content(heading.as_str()),
                links: Vec::new(),
            });
            continue;
        }
        let Some(folder) = folders.last_mut() else {
            continue;
        };
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let url = attribute(attrs, "href");
        if url.is_empty() {
            continue;
        }
        let title = text_content(caps.get(3).map_or("", |m| m.as_str()));
        folder.links.push(BookmarkLink {
            title,
            url,
            icon: attribute(attrs, "icon"),
        });
    }

    if !saw_heading {
        return Err(DashboardError::format("no bookmark folders (<H3>) found"));
    }
    folders.retain(|f| !f.links.is_empty());
    Ok(ParsedBookmarks { folders })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ErrorKind;

    const EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><A HREF="https://orphan.test/">Before any folder</A>
    <DT><H3 ADD_DATE="1700000000" PERSONAL_TOOLBAR_FOLDER="true">Bookmarks bar</H3>
    <DL><p>
        <DT><A HREF="https://rust-lang.org/" ADD_DATE="1" ICON="data:image/png;base64,AAA">Rust &amp; Cargo</A>
        <DT><H3>Empty</H3>
        <DL><p>
        </DL><p>
        <DT><H3>Dev &lt;tools&gt;</H3>
        <DL><p>
            <DT><A HREF="https://github.com/">Git<b>Hub</b></A>
            <DT><A>No href</A>
            <DT><a href='https://docs.rs/'>  docs.rs  </a>
        </DL><p>
    </DL><p>
</DL><p>
"#;

    #[test]
    fn test_links_follow_the_preceding_heading() {
        let parsed = parse_bookmarks_html(EXPORT).unwrap();
        let names: Vec<&str> = parsed.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Bookmarks bar", "Dev <tools>"]);
        assert_eq!(parsed.total(), 3);

        let rust = &parsed.folders[0].links[0];
        assert_eq!(rust.title, "Rust & Cargo");
        assert_eq!(rust.url, "https://rust-lang.org/");
        assert_eq!(rust.icon, "data:image/png;base64,AAA");

        let dev = &parsed.folders[1].links;
        assert_eq!(dev[0].title, "GitHub");
        assert_eq!(dev[0].icon, "");
        assert_eq!(dev[1].url, "https://docs.rs/");
        assert_eq!(dev[1].title, "docs.rs");
    }

    #[test]
    fn test_missing_headings_is_format_error() {
        let err = parse_bookmarks_html(r#"<A HREF="https://x.test">X</A>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_headings_without_links_yield_empty_result() {
        let parsed = parse_bookmarks_html("<H3>Only</H3><H3>Folders</H3>").unwrap();
        assert!(parsed.is_empty());
        assert!(parsed.folders.is_empty());
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(text_content("caf&#233; &#x263A; &bogus;"), "café ☺ &bogus;");
    }
}
