//! Glob-style request path patterns.
//!
//! # Pattern Syntax
//! - `?` matches exactly one character within a segment
//! - `*` matches zero or more characters within a segment
//! - `**` matches zero or more whole segments
//!
//! ```
//! use snippet_security_core::http::security::path_matcher::PathPattern;
//!
//! let pattern = PathPattern::new("/api/**");
//! assert!(pattern.matches("/api/snippets"));
//! assert!(pattern.matches("/api/snippets/42/raw"));
//! assert!(!pattern.matches("/manage/status"));
//! ```

/// A parsed path pattern. Matching is case-sensitive; leading and trailing
/// slashes are normalized away on both sides.
#[derive(Clone, Debug)]
pub struct PathPattern {
    pattern: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    /// Exact text, no wildcards.
    Literal(String),
    /// `*` on its own: any single segment.
    AnyOne,
    /// `**`: any run of segments, including none.
    AnyMany,
    /// Text containing embedded `*` or `?`.
    Glob(String),
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| match part {
                "**" => Segment::AnyMany,
                "*" => Segment::AnyOne,
                _ if part.contains('*') || part.contains('?') => Segment::Glob(part.to_string()),
                _ => Segment::Literal(part.to_string()),
            })
            .collect();
        PathPattern {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// The original pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the given request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match_segments(&self.segments, &parts)
    }
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::AnyMany, rest)) => {
            // Greedy would do, but trying every split keeps `**` usable in
            // the middle of a pattern.
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((head, rest)) => match path.split_first() {
            None => false,
            Some((part, path_rest)) => {
                let head_matches = match head {
                    Segment::Literal(text) => text == part,
                    Segment::AnyOne => true,
                    Segment::Glob(glob) => match_glob(glob.as_bytes(), part.as_bytes()),
                    Segment::AnyMany => unreachable!("handled above"),
                };
                head_matches && match_segments(rest, path_rest)
            }
        },
    }
}

fn match_glob(glob: &[u8], text: &[u8]) -> bool {
    match glob.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|skip| match_glob(rest, &text[skip..])),
        Some((b'?', rest)) => match text.split_first() {
            Some((_, text_rest)) => match_glob(rest, text_rest),
            None => false,
        },
        Some((ch, rest)) => match text.split_first() {
            Some((t, text_rest)) => ch == t && match_glob(rest, text_rest),
            None => false,
        },
    }
}
