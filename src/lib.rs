//! Nested-section INI documents as a tree of nodes, with typed conversion in
//! both directions.
//!
//! A document is parsed into a [`Node`]: either a scalar holding text, or a
//! section holding named children in insertion order. Values are read out of
//! the tree by converting nodes into Rust types and written back the same
//! way.
//!
//! ```ignore
//! let root = nestini::parse("port=8080\n\n[db][pool]\nsize=4\n")?;
//! let port: u16 = root["port"].get()?;
//! let size: u32 = root["db"]["pool"]["size"].get()?;
//! ```
//!
//! # Document format
//!
//! Each line is one of:
//!
//! - **blank**: ignored.
//! - **header** `[a][b][c]`: selects (creating as needed) the section at that
//!   path from the root. Every following assignment lands in it.
//! - **assignment** `key=value`: sets a scalar in the current section. The
//!   key is trimmed, the value keeps everything after the first `=` except
//!   leading whitespace.
//!
//! The only escape is `\n`, which stands for a line break inside a value.
//! Anything else is malformed and fails the parse with [`IniError::Parse`];
//! use [`Parser::skip_malformed`] to ignore such lines instead.
//!
//! Writing a tree produces a canonical document: scalars of a section first,
//! then its subsections depth-first, each introduced by its full header path.
//! Parsing a canonical document and writing it back yields the same bytes.
//!
//! # Conversions
//!
//! Types take part through two traits: [`FromIni`] fills an existing value
//! from a node, [`ToIni`] builds a node from a value. Implementations ship
//! for integers, floats, `bool`, `char`, strings, `Option`, `Box`,
//! sequences (`Vec`, `VecDeque`, arrays), and maps (`BTreeMap`, `HashMap`,
//! `IndexMap`).
//!
//! Reading comes in two flavors:
//!
//! - [`Node::get`] starts from `T::default()` and returns the default when the
//!   node does not convert.
//! - [`Node::get_to`] converts into an existing value and leaves it untouched
//!   when the node does not convert.
//!
//! [`Node::try_get`] is the strict form that reports every failure.
//!
//! Sequences are stored as sections keyed `"0"`, `"1"`, ...; maps as sections
//! keyed by the rendered key.
//!
//! # Records and enums
//!
//! Structs bind field by field through [`RecordReader`] / [`RecordWriter`],
//! or all at once with [`ini_record!`]. A [`Binding::Required`] record fails
//! with [`IniError::KeyNotFound`] on the first missing field; a
//! [`Binding::Lenient`] record only updates the fields that are present.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Server { host: String, port: u16 }
//! nestini::ini_record!(Server { host, port });
//! ```
//!
//! Fieldless enums register by name with [`ini_enum!`] or by discriminant
//! with [`ini_ordinal_enum!`].
//!
//! # Serde
//!
//! With the `serde` feature (on by default), [`to_node`] and [`from_node`]
//! bridge any `Serialize` / `Deserialize` type to and from a tree, and
//! [`Node`] itself implements both traits. Unlike [`Node::get`], the serde
//! path reports conversion failures as errors.
//!
//! # Layering
//!
//! [`deep_merge`] lays one tree over another: sections merge recursively,
//! everything else is replaced. Use it to stack defaults, a system file and a
//! user file.
//!
//! # Error handling
//!
//! All fallible operations return [`IniError`]. See the [`error`] module for
//! the full set.

pub mod convert;
pub mod error;
pub mod node;
pub mod parse;
pub mod record;
pub mod write;

mod enums;
mod merge;

#[cfg(feature = "serde")]
mod de;
#[cfg(feature = "serde")]
mod ser;

#[cfg(test)]
mod fixtures;

pub use convert::{FromIni, ToIni};
pub use error::{IniError, Result};
pub use merge::deep_merge;
pub use node::{Node, Section};
pub use parse::{Parser, from_reader, parse};
pub use record::{Binding, RecordReader, RecordWriter};
pub use write::to_writer;

#[cfg(feature = "serde")]
pub use de::{Deserializer, from_node, from_str};
#[cfg(feature = "serde")]
pub use ser::{to_node, to_string};
