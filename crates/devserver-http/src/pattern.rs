//! URL pattern compilation and matching.
//!
//! Handler urls are regular expressions matched against the request path from
//! its first character. Two compiled forms exist:
//!
//! - [`UrlPattern::prefix`]: `^(?:url)`, used by `script` and `static_files`
//!   handlers. The user's own capture groups are kept.
//! - [`UrlPattern::prefix_with_remainder`]: `^(?:url)(?P<remainder>(?s:.*))`,
//!   used by `static_dir` handlers to split off the part of the path after the
//!   prefix. The remainder always runs to the end of the path, newlines included.

use regex::{Captures, Regex};

/// Name of the group capturing a `static_dir` remainder.
const REMAINDER_GROUP: &str = "remainder";

/// A compiled, start-anchored url pattern.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    url: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile `url` as an anchored prefix pattern.
    pub fn prefix(url: &str) -> Result<Self, regex::Error> {
        Self::compile(url, format!("^(?:{url})"))
    }

    /// Compile `url` as an anchored prefix followed by a catch-all remainder group.
    pub fn prefix_with_remainder(url: &str) -> Result<Self, regex::Error> {
        Self::compile(url, format!("^(?:{url})(?P<{REMAINDER_GROUP}>(?s:.*))"))
    }

    fn compile(url: &str, anchored: String) -> Result<Self, regex::Error> {
        Ok(Self {
            url: url.to_owned(),
            regex: Regex::new(&anchored)?,
        })
    }

    /// The url this pattern was compiled from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns `true` if `path` matches.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path`, returning the capture groups on success.
    #[must_use]
    pub fn captures<'p>(&self, path: &'p str) -> Option<Captures<'p>> {
        self.regex.captures(path)
    }

    /// Split `path` after the prefix, returning the remainder.
    ///
    /// Returns `None` when the prefix does not match. A matched path with
    /// nothing after the prefix yields `Some("")`. Patterns built with
    /// [`UrlPattern::prefix`] have no remainder group and always yield `None`.
    #[must_use]
    pub fn remainder<'p>(&self, path: &'p str) -> Option<&'p str> {
        self.regex
            .captures(path)?
            .name(REMAINDER_GROUP)
            .map(|m| m.as_str())
    }
}

/// Substitute `\N` backreferences in `template` with groups from `captures`.
///
/// `\\` produces a literal backslash. A reference to a group that does not
/// exist or did not participate in the match expands to nothing. A backslash
/// followed by anything else is kept as is.
#[must_use]
pub fn expand_template(template: &str, captures: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some(&(_, '\\')) => {
                chars.next();
                out.push('\\');
            }
            Some(&(start, d)) if d.is_ascii_digit() => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                if let Ok(group) = template[start..end].parse::<usize>() {
                    if let Some(m) = captures.get(group) {
                        out.push_str(m.as_str());
                    }
                }
            }
            _ => out.push('\\'),
        }
    }

    out
}
