//! Tag pattern matching over raw template content.
//!
//! The translation tag is recognized by a single regular expression built
//! from the configured delimiter tokens, not by a template grammar. The
//! attribute segment runs to the first close delimiter and the body to the
//! next closing tag, so a same-name tag nested inside its own body will
//! mis-parse. This is a known limitation of the pattern, kept as-is.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::Config;

/// One occurrence of the translation tag in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Raw attribute text between the command name and the close delimiter.
    pub attributes: &'a str,
    /// Inner text between the opening and closing tag.
    pub body: &'a str,
    /// Byte offset of the attribute text within the scanned content.
    pub offset: usize,
}

// Attribute values may be bare or quoted with single or double quotes;
// the capture runs from the first non-whitespace character to the first
// quote, so quoted values may contain spaces.
static CONTEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"context\s*=?\s*["']?\s*(.[^"']*)"#).unwrap());

static PLURAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"plural\s*=?\s*["']?\s*(.[^"']*)"#).unwrap());

impl<'a> TagMatch<'a> {
    /// The `context` attribute value, if present.
    pub fn context(&self) -> Option<&'a str> {
        capture_value(&CONTEXT_REGEX, self.attributes)
    }

    /// The `plural` attribute value, if present.
    ///
    /// When set, the entry is emitted with `msgid_plural` equal to this
    /// captured value while `msgid` stays the tag body.
    pub fn plural(&self) -> Option<&'a str> {
        capture_value(&PLURAL_REGEX, self.attributes)
    }
}

fn capture_value<'a>(regex: &Regex, attributes: &'a str) -> Option<&'a str> {
    regex
        .captures(attributes)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Scans template content for translation tags.
///
/// The pattern is compiled once per configuration and matches left to
/// right, non-overlapping, in a single pass over the content.
#[derive(Debug)]
pub struct TagExtractor {
    pattern: Regex,
}

impl TagExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        let ldq = regex::escape(&config.left_delimiter);
        let rdq = regex::escape(&config.right_delimiter);
        let cmd = regex::escape(&config.command);
        let not_ldq = negated_class(&config.left_delimiter);
        let not_rdq = negated_class(&config.right_delimiter);

        let pattern = format!(
            r"{ldq}\s*{cmd}\s*({not_rdq}*)(?:{rdq})+({not_ldq}*){ldq}/{cmd}{rdq}"
        );
        let pattern = Regex::new(&pattern).with_context(|| {
            format!(
                "Invalid tag pattern built from delimiters {:?} {:?} and command {:?}",
                config.left_delimiter, config.right_delimiter, config.command
            )
        })?;

        Ok(Self { pattern })
    }

    /// Lazily yields every tag occurrence in `content`.
    pub fn matches<'a>(&'a self, content: &'a str) -> impl Iterator<Item = TagMatch<'a>> + 'a {
        self.pattern.captures_iter(content).map(|caps| {
            let attributes = caps.get(1).map_or("", |m| m.as_str());
            let offset = caps.get(1).map_or(0, |m| m.start());
            let body = caps.get(2).map_or("", |m| m.as_str());
            TagMatch {
                attributes,
                body,
                offset,
            }
        })
    }
}

/// Character class matching anything but the characters of `token`.
fn negated_class(token: &str) -> String {
    let mut class = String::from("[^");
    for c in token.chars() {
        if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
            class.push('\\');
        }
        class.push(c);
    }
    class.push(']');
    class
}

/// 1-indexed line number of a byte offset within `content`.
pub fn line_from_offset(content: &str, offset: usize) -> usize {
    content
        .as_bytes()
        .iter()
        .take(offset)
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
