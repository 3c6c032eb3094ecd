//! Serde deserializer that reads any `Deserialize` type out of a [`Node`].
//!
//! Scalars are converted with the same rules as [`FromIni`], except that a
//! failed conversion is an error instead of a silent fallback. Sections feed
//! structs and maps, index-keyed sections (`"0"`, `"1"`, ...) feed sequences
//! and tuples.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct Server { host: String, port: u16, tls: Option<bool> }
//!
//! let server: Server = nestini::from_str("host=0.0.0.0\nport=80\n")?;
//! assert_eq!(server.tls, None);
//! ```
//!
//! # Enums
//!
//! A unit variant is a scalar holding the variant name. Newtype, tuple and
//! struct variants are a section with exactly one child named after the
//! variant, the same layout [`to_node`](crate::to_node) produces.

use indexmap::map::Iter;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
    value::BorrowedStrDeserializer,
};
use serde::forward_to_deserialize_any;

use crate::convert::{FromIni, scalar_text, sequence_items};
use crate::error::{IniError, Result};
use crate::node::{Node, Section};

/// Deserialize a `T` borrowing from a tree.
pub fn from_node<'de, T: de::Deserialize<'de>>(node: &'de Node) -> Result<T> {
    T::deserialize(Deserializer::new(node))
}

/// Parse a document and deserialize a `T` from its root.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T> {
    let root = crate::parse::parse(text)?;
    from_node(&root)
}

/// Deserializer over a single node of a tree.
#[derive(Debug, Clone, Copy)]
pub struct Deserializer<'de> {
    node: &'de Node,
}

impl<'de> Deserializer<'de> {
    pub fn new(node: &'de Node) -> Self {
        Self { node }
    }

    fn convert<T: FromIni + Default>(self) -> Result<T> {
        let mut value = T::default();
        value.from_ini(self.node)?;
        Ok(value)
    }

    fn section(self, expected: &'static str) -> Result<&'de Section> {
        self.node
            .as_section()
            .ok_or_else(|| IniError::conversion(expected, "a scalar"))
    }
}

macro_rules! deserialize_scalar {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            visitor.$visit(self.convert::<$ty>()?)
        }
    )*};
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = IniError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.node {
            Node::Scalar(text) => visitor.visit_borrowed_str(text),
            Node::Section(children) => visitor.visit_map(SectionAccess::new(children)),
        }
    }

    deserialize_scalar! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
        deserialize_char => visit_char: char,
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(scalar_text(self.node, "string")?)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(IniError::Custom("bytes are not supported".into()))
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    // A node that exists is always `Some`; absent fields become `None`
    // through serde's missing-field handling.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let items = sequence_items(self.node, "sequence")?;
        visitor.visit_seq(ItemsAccess {
            items: items.into_iter(),
        })
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_map(SectionAccess::new(self.section("map")?))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_map(SectionAccess::new(self.section(name)?))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.node {
            Node::Scalar(text) => visitor.visit_enum(BorrowedStrDeserializer::new(text)),
            Node::Section(children) if children.len() == 1 => {
                let (variant, node) = children
                    .first()
                    .ok_or_else(|| IniError::conversion(name, "an empty section"))?;
                visitor.visit_enum(VariantNode { variant, node })
            }
            Node::Section(children) => Err(IniError::conversion(
                name,
                format!("a section with {} children", children.len()),
            )),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

// --- Sequences ---

struct ItemsAccess<'de> {
    items: std::vec::IntoIter<&'de Node>,
}

impl<'de> SeqAccess<'de> for ItemsAccess<'de> {
    type Error = IniError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        self.items
            .next()
            .map(|item| seed.deserialize(Deserializer::new(item)))
            .transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

// --- Sections (structs and maps) ---

struct SectionAccess<'de> {
    children: Iter<'de, String, Node>,
    value: Option<&'de Node>,
}

impl<'de> SectionAccess<'de> {
    fn new(children: &'de Section) -> Self {
        Self {
            children: children.iter(),
            value: None,
        }
    }
}

impl<'de> MapAccess<'de> for SectionAccess<'de> {
    type Error = IniError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.children.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let value = self
            .value
            .take()
            .ok_or_else(|| IniError::Custom("value requested before key".into()))?;
        seed.deserialize(Deserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.children.len())
    }
}

// --- Child names ---

/// Deserializes a child name as a map key or field identifier.
struct KeyDeserializer<'de> {
    key: &'de str,
}

impl KeyDeserializer<'_> {
    fn parse<T: std::str::FromStr>(&self, expected: &'static str) -> Result<T> {
        self.key
            .parse()
            .map_err(|_| IniError::conversion(expected, format!("key '{}'", self.key)))
    }
}

macro_rules! deserialize_key {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
        }
    )*};
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = IniError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(self.key)
    }

    deserialize_key! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_char => visit_char: char,
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_enum(BorrowedStrDeserializer::new(self.key))
    }

    forward_to_deserialize_any! {
        f32 f64 str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

// --- Enums with data ---

struct VariantNode<'de> {
    variant: &'de str,
    node: &'de Node,
}

impl<'de> EnumAccess<'de> for VariantNode<'de> {
    type Error = IniError;
    type Variant = Deserializer<'de>;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self::Variant)> {
        let variant: BorrowedStrDeserializer<'de, IniError> =
            BorrowedStrDeserializer::new(self.variant);
        Ok((seed.deserialize(variant)?, Deserializer::new(self.node)))
    }
}

impl<'de> VariantAccess<'de> for Deserializer<'de> {
    type Error = IniError;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(self)
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        de::Deserializer::deserialize_map(self, visitor)
    }
}

// --- Node itself ---

impl<'de> de::Deserialize<'de> for Node {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a scalar or a section")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Node, E> {
        Ok(Node::new(&v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Node, E> {
        Ok(Node::new(&v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Node, E> {
        Ok(Node::new(&v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Node, E> {
        Ok(Node::new(&v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Node, E> {
        Ok(Node::scalar(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Node, E> {
        Ok(Node::section())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Node, E> {
        Ok(Node::section())
    }

    fn visit_some<D: de::Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Node, D::Error> {
        de::Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Node, A::Error> {
        let mut children = Section::new();
        while let Some(item) = seq.next_element::<Node>()? {
            children.insert(children.len().to_string(), item);
        }
        Ok(Node::Section(children))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Node, A::Error> {
        let mut children = Section::new();
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            children.insert(key, value);
        }
        Ok(Node::Section(children))
    }
}
