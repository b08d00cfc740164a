//! Case-insensitive substring matching shared by filtering and highlighting.

use super::dto::Segment;

fn chars_eq(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Non-overlapping match ranges, in char indices
fn match_ranges(haystack: &[char], needle: &[char]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    if needle.is_empty() || needle.len() > haystack.len() {
        return ranges;
    }
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        let hit = haystack[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&h, &n)| chars_eq(h, n));
        if hit {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

pub fn matches(text: &str, term: &str) -> bool {
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = term.chars().collect();
    !match_ranges(&haystack, &needle).is_empty()
}

/// Split `text` into plain and highlighted segments. An empty term yields
/// one plain segment; empty text yields none.
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = term.chars().collect();
    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, end) in match_ranges(&haystack, &needle) {
        if start > cursor {
            segments.push(Segment::plain(haystack[cursor..start].iter().collect::<String>()));
        }
        segments.push(Segment::mark(haystack[start..end].iter().collect::<String>()));
        cursor = end;
    }
    if cursor < haystack.len() {
        segments.push(Segment::plain(haystack[cursor..].iter().collect::<String>()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_ignores_case() {
        assert!(matches("GitHub", "hub"));
        assert!(matches("Привет Мир", "мир"));
        assert!(!matches("GitHub", "lab"));
        assert!(!matches("", "a"));
    }

    #[test]
    fn test_highlight_keeps_original_case() {
        assert_eq!(
            highlight("Rust rusty", "RUST"),
            vec![
                Segment::mark("Rust"),
                Segment::plain(" "),
                Segment::mark("rust"),
                Segment::plain("y"),
            ]
        );
    }

    #[test]
    fn test_highlight_without_term_is_plain() {
        assert_eq!(highlight("Docs", ""), vec![Segment::plain("Docs")]);
        assert!(highlight("", "x").is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(
            highlight("a.b axb", "a.b"),
            vec![Segment::mark("a.b"), Segment::plain(" axb")]
        );
    }
}
