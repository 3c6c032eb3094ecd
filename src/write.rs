//! Tree to text.
//!
//! A section is written as its scalar children (`key=value`, in child order)
//! followed by each child section, depth first. Every child section gets a
//! blank separator line and a header spelling its full path from the root,
//! e.g. `[d][a][b]`. A section holding only other sections gets no header of
//! its own: its children's headers already recreate it when parsed. Empty
//! sections keep their header so they survive a round trip.
//!
//! The output is the canonical form of a document: parsing it and writing the
//! result again reproduces it byte for byte.

use std::borrow::Cow;
use std::fmt;
use std::io;

use crate::error::Result;
use crate::node::{Node, Section};

impl fmt::Display for Node {
    /// Sections render as a full document. A scalar renders as its escaped
    /// text, which is not a document on its own.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(text) => f.write_str(&escape(text)),
            Node::Section(children) => {
                let mut writer = SectionWriter {
                    out: f,
                    started: false,
                };
                let mut path = Vec::new();
                writer.body(children, &mut path)
            }
        }
    }
}

/// Serialize `node` into `writer`.
pub fn to_writer<W: io::Write>(node: &Node, mut writer: W) -> Result<()> {
    write!(writer, "{node}")?;
    writer.flush()?;
    Ok(())
}

struct SectionWriter<'f, W: fmt::Write> {
    out: &'f mut W,
    /// Whether anything has been written yet; the first header gets no
    /// separator line.
    started: bool,
}

impl<W: fmt::Write> SectionWriter<'_, W> {
    fn body<'t>(&mut self, children: &'t Section, path: &mut Vec<&'t str>) -> fmt::Result {
        for (key, child) in children {
            if let Node::Scalar(text) = child {
                writeln!(self.out, "{key}={}", escape(text))?;
                self.started = true;
            }
        }

        for (key, child) in children {
            let Node::Section(grandchildren) = child else {
                continue;
            };
            path.push(key);
            if needs_header(grandchildren) {
                self.header(path)?;
            }
            self.body(grandchildren, path)?;
            path.pop();
        }

        Ok(())
    }

    fn header(&mut self, path: &[&str]) -> fmt::Result {
        if self.started {
            self.out.write_char('\n')?;
        }
        for name in path {
            write!(self.out, "[{name}]")?;
        }
        self.out.write_char('\n')?;
        self.started = true;
        Ok(())
    }
}

fn needs_header(children: &Section) -> bool {
    children.is_empty() || children.values().any(Node::is_scalar)
}

pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    if text.contains('\n') {
        Cow::Owned(text.replace('\n', "\\n"))
    } else {
        Cow::Borrowed(text)
    }
}
