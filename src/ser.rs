//! Serde serializer that builds a [`Node`] tree from any `Serialize` value.
//!
//! Structs and maps become sections keyed by field or map key, sequences and
//! tuples become sections keyed `"0"`, `"1"`, ..., and everything else becomes
//! a scalar in the same canonical text as [`ToIni`](crate::ToIni). `None`
//! fields are left out instead of being written as empty values.
//!
//! ```ignore
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! let text = nestini::to_string(&Server { host: "0.0.0.0".into(), port: 80 })?;
//! assert_eq!(text, "host=0.0.0.0\nport=80\n");
//! ```

use serde::ser::{self, Serialize};

use crate::error::{IniError, Result};
use crate::node::{Node, Section};

/// Build a tree from a `Serialize` value.
///
/// A value that serializes to nothing (`None`, `()`) yields an empty section.
pub fn to_node<S: Serialize + ?Sized>(value: &S) -> Result<Node> {
    Ok(value.serialize(NodeSerializer)?.unwrap_or_default())
}

/// Serialize a value straight to document text.
pub fn to_string<S: Serialize + ?Sized>(value: &S) -> Result<String> {
    Ok(to_node(value)?.to_string())
}

impl Serialize for Node {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(text) => serializer.serialize_str(text),
            Node::Section(children) => serializer.collect_map(children),
        }
    }
}

/// Produces `None` for values that have no representation (`None`, unit).
struct NodeSerializer;

fn scalar(text: impl ToString) -> Result<Option<Node>> {
    Ok(Some(Node::Scalar(text.to_string())))
}

fn wrap_variant(variant: &'static str, inner: Node) -> Node {
    Node::Section(Section::from([(variant.to_string(), inner)]))
}

impl ser::Serializer for NodeSerializer {
    type Ok = Option<Node>;
    type Error = IniError;
    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = SeqSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = MapSerializer;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        scalar(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(IniError::Custom("bytes are not supported".into()))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        scalar(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        let inner = value.serialize(self)?.unwrap_or_default();
        Ok(Some(wrap_variant(variant, inner)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer {
            items: Section::with_capacity(len.unwrap_or(0)),
            variant: None,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SeqSerializer {
            items: Section::with_capacity(len),
            variant: Some(variant),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            children: Section::with_capacity(len.unwrap_or(0)),
            current_key: None,
            variant: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(MapSerializer {
            children: Section::with_capacity(len),
            current_key: None,
            variant: Some(variant),
        })
    }
}

// --- SerializeStruct / SerializeMap ---

struct MapSerializer {
    children: Section,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl MapSerializer {
    fn push<T: Serialize + ?Sized>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(child) = value.serialize(NodeSerializer)? {
            self.children.insert(key, child);
        }
        Ok(())
    }

    fn finish(self) -> Result<Option<Node>> {
        let node = Node::Section(self.children);
        Ok(Some(match self.variant {
            Some(variant) => wrap_variant(variant, node),
            None => node,
        }))
    }
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Option<Node>;
    type Error = IniError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        self.current_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| IniError::Custom("map value without a key".into()))?;
        self.push(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStruct for MapSerializer {
    type Ok = Option<Node>;
    type Error = IniError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.push(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MapSerializer {
    type Ok = Option<Node>;
    type Error = IniError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

// --- SerializeSeq (for Vec/array/tuple fields) ---

struct SeqSerializer {
    items: Section,
    variant: Option<&'static str>,
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Option<Node>;
    type Error = IniError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        // Absent elements still occupy their index so the keys stay dense.
        let item = value
            .serialize(NodeSerializer)?
            .unwrap_or_else(|| Node::Scalar(String::new()));
        self.items.insert(self.items.len().to_string(), item);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        let node = Node::Section(self.items);
        Ok(Some(match self.variant {
            Some(variant) => wrap_variant(variant, node),
            None => node,
        }))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Option<Node>;
    type Error = IniError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Option<Node>;
    type Error = IniError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SeqSerializer {
    type Ok = Option<Node>;
    type Error = IniError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok> {
        ser::SerializeSeq::end(self)
    }
}

// --- Key serializer (map keys become child names) ---

struct KeySerializer;

fn key_error() -> IniError {
    IniError::Custom("map keys must be strings, numbers, booleans or unit variants".into())
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = IniError;
    type SerializeSeq = ser::Impossible<String, IniError>;
    type SerializeTuple = ser::Impossible<String, IniError>;
    type SerializeTupleStruct = ser::Impossible<String, IniError>;
    type SerializeTupleVariant = ser::Impossible<String, IniError>;
    type SerializeMap = ser::Impossible<String, IniError>;
    type SerializeStruct = ser::Impossible<String, IniError>;
    type SerializeStructVariant = ser::Impossible<String, IniError>;

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_f32(self, _: f32) -> Result<String> {
        Err(key_error())
    }
    fn serialize_f64(self, _: f64) -> Result<String> {
        Err(key_error())
    }
    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_bytes(self, _: &[u8]) -> Result<String> {
        Err(key_error())
    }
    fn serialize_none(self) -> Result<String> {
        Err(key_error())
    }
    fn serialize_some<T: Serialize + ?Sized>(self, _: &T) -> Result<String> {
        Err(key_error())
    }
    fn serialize_unit(self) -> Result<String> {
        Err(key_error())
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<String> {
        Err(key_error())
    }
    fn serialize_unit_variant(self, _: &'static str, _: u32, v: &'static str) -> Result<String> {
        Ok(v.to_string())
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        v: &T,
    ) -> Result<String> {
        v.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<String> {
        Err(key_error())
    }
    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_error())
    }
    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple> {
        Err(key_error())
    }
    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_error())
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_error())
    }
    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_error())
    }
    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self::SerializeStruct> {
        Err(key_error())
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_error())
    }
}
