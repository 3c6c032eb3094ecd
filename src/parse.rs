//! Text to tree.
//!
//! The grammar is line based. Each non-blank line is one of:
//!
//! - a header made of one or more bracketed groups, `[outer][inner]`, which
//!   selects (creating as needed) the section at that path from the root;
//! - an assignment `key=value`, stored as a scalar in the current section.
//!
//! Whitespace around keys, around `=`, and around or inside brackets is not
//! significant. Everything after the `=` (minus leading whitespace) is the
//! value, kept verbatim except that the two characters `\n` become a newline.
//!
//! Anything else is malformed. By default a malformed line fails the parse
//! with [`IniError::Parse`]; [`Parser::skip_malformed`] turns that into a
//! logged skip.

use std::borrow::Cow;
use std::io::Read;
use std::str::FromStr;

use crate::error::{IniError, Result};
use crate::node::Node;

/// Line-oriented parser with its options.
///
/// ```ignore
/// let root = Parser::new().skip_malformed(true).parse(text)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    skip_malformed: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip lines that are neither headers nor assignments instead of failing
    /// (default: `false`). Each skipped line is logged at `warn` level.
    pub fn skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    /// Parse a complete document into a root section.
    pub fn parse(&self, text: &str) -> Result<Node> {
        let mut root = Node::section();
        let mut path: Vec<String> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            match classify(raw) {
                Line::Blank => {}
                Line::Header(names) => {
                    path = names.into_iter().map(str::to_string).collect();
                    descend(&mut root, &path);
                }
                Line::Assign(key, value) => {
                    let value = unescape(value).into_owned();
                    descend(&mut root, &path).insert(key, Node::Scalar(value));
                }
                Line::Malformed if self.skip_malformed => {
                    tracing::warn!(line = index + 1, content = raw, "skipping malformed line");
                }
                Line::Malformed => {
                    return Err(IniError::Parse {
                        line: index + 1,
                        content: raw.to_string(),
                    });
                }
            }
        }

        Ok(root)
    }

    /// Read `reader` to the end and parse it.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Node> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse(&text)
    }
}

/// Parse a document with the default (strict) options.
pub fn parse(text: &str) -> Result<Node> {
    Parser::new().parse(text)
}

/// Parse a document from any reader with the default (strict) options.
pub fn from_reader<R: Read>(reader: R) -> Result<Node> {
    Parser::new().parse_reader(reader)
}

impl FromStr for Node {
    type Err = IniError;

    fn from_str(text: &str) -> Result<Self> {
        parse(text)
    }
}

enum Line<'a> {
    Blank,
    Header(Vec<&'a str>),
    Assign(&'a str, &'a str),
    Malformed,
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if let Some(names) = header_names(trimmed) {
        return Line::Header(names);
    }
    if let Some((key, value)) = line.split_once('=') {
        let key = key.trim();
        if !key.is_empty() && !key.contains(['[', ']']) {
            return Line::Assign(key, value.trim_start());
        }
    }
    Line::Malformed
}

/// Split `[a][ b ][c]` into `["a", "b", "c"]`. Returns `None` unless the whole
/// line is made of non-empty bracketed groups.
fn header_names(line: &str) -> Option<Vec<&str>> {
    let mut names = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let name = inner[..close].trim();
        if name.is_empty() || name.contains('[') {
            return None;
        }
        names.push(name);
        rest = inner[close + 1..].trim_start();
    }
    if names.is_empty() { None } else { Some(names) }
}

/// Walk `path` from `root`, creating sections on the way. Scalars in the way
/// are replaced by sections.
fn descend<'a>(root: &'a mut Node, path: &[String]) -> &'a mut Node {
    let mut node = root;
    for name in path {
        node = node.child_mut(name);
        if node.is_scalar() {
            tracing::debug!(section = %name, "header replaces scalar value with a section");
            node.make_section();
        }
    }
    node
}

pub(crate) fn unescape(value: &str) -> Cow<'_, str> {
    if value.contains("\\n") {
        Cow::Owned(value.replace("\\n", "\n"))
    } else {
        Cow::Borrowed(value)
    }
}
