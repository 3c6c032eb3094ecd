//! Typed access to nodes.
//!
//! [`FromIni`] and [`ToIni`] are the two halves of the conversion protocol.
//! Primitives, strings, options, sequences and maps implement them here;
//! enums get them through [`ini_enum!`](crate::ini_enum) or
//! [`ini_ordinal_enum!`](crate::ini_ordinal_enum), records through
//! [`ini_record!`](crate::ini_record) or a hand-written
//! [`RecordReader`](crate::RecordReader).
//!
//! Conversion failures are routine: [`Node::get`] falls back to the type's
//! default and [`Node::get_to`] keeps the existing value. Only structural
//! errors ([`IniError::KeyNotFound`] from a required record field) escape.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use crate::error::{IniError, Result};
use crate::node::{Node, Section};

/// Read a value out of a node.
pub trait FromIni {
    /// Convert `node` into `self`.
    ///
    /// A scalar or container conversion that fails must leave `self` as it
    /// was. Records are updated field by field.
    fn from_ini(&mut self, node: &Node) -> Result<()>;
}

/// Build a node from a value.
pub trait ToIni {
    fn to_ini(&self) -> Node;
}

impl Node {
    /// Convert this node into a fresh `T`.
    ///
    /// Starts from `T::default()`; if the conversion fails the default is
    /// returned. Errs only with [`IniError::KeyNotFound`] from a required
    /// record binding.
    pub fn get<T: FromIni + Default>(&self) -> Result<T> {
        let mut value = T::default();
        self.get_to(&mut value)?;
        Ok(value)
    }

    /// Convert this node into an existing value, keeping it unchanged when
    /// the conversion fails.
    pub fn get_to<T: FromIni + ?Sized>(&self, target: &mut T) -> Result<()> {
        match target.from_ini(self) {
            Err(err) if err.is_conversion() => {
                tracing::trace!(%err, "conversion failed, keeping previous value");
                Ok(())
            }
            other => other,
        }
    }

    /// Strict variant of [`Node::get`]: every failure is an error.
    pub fn try_get<T: FromIni + Default>(&self) -> Result<T> {
        let mut value = T::default();
        value.from_ini(self)?;
        Ok(value)
    }

    /// Replace this node's content with the conversion of `value`.
    pub fn assign<T: ToIni + ?Sized>(&mut self, value: &T) {
        *self = value.to_ini();
    }
}

pub(crate) fn scalar_text<'a>(node: &'a Node, expected: &'static str) -> Result<&'a str> {
    node.as_scalar()
        .ok_or_else(|| IniError::conversion(expected, "a section"))
}

fn section_children<'a>(node: &'a Node, expected: &'static str) -> Result<&'a Section> {
    node.as_section()
        .ok_or_else(|| IniError::conversion(expected, "a scalar"))
}

/// The longest prefix of `text` (after leading whitespace) that looks like an
/// integer: an optional sign followed by at least one digit.
fn integer_prefix(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let start = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let end = start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();
    (end > start).then(|| &text[..end])
}

/// The longest prefix of `text` (after leading whitespace) that looks like a
/// decimal float: `[sign] digits [. digits] [e [sign] digits]`.
fn float_prefix(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |pos: usize| bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    Some(&text[..end])
}

/// Whether a parsed float is what `digits` actually spells: overflow to
/// infinity and underflow to zero are out of range.
fn float_in_range(digits: &str, finite: bool, zero: bool) -> bool {
    if !finite {
        let word = digits.trim_start_matches(['+', '-']).to_ascii_lowercase();
        return matches!(word.as_str(), "inf" | "infinity" | "nan");
    }
    if zero {
        let mantissa = digits.split(['e', 'E']).next().unwrap_or(digits);
        return !mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'));
    }
    true
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl FromIni for $ty {
            fn from_ini(&mut self, node: &Node) -> Result<()> {
                let text = scalar_text(node, stringify!($ty))?;
                *self = integer_prefix(text)
                    .and_then(|digits| digits.parse::<$ty>().ok())
                    .ok_or_else(|| IniError::conversion(stringify!($ty), format!("'{text}'")))?;
                Ok(())
            }
        }

        impl ToIni for $ty {
            fn to_ini(&self) -> Node {
                Node::Scalar(self.to_string())
            }
        }

        impl From<$ty> for Node {
            fn from(value: $ty) -> Self {
                value.to_ini()
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromIni for $ty {
            fn from_ini(&mut self, node: &Node) -> Result<()> {
                let text = scalar_text(node, stringify!($ty))?;
                let fail = || IniError::conversion(stringify!($ty), format!("'{text}'"));
                let trimmed = text.trim();
                let (digits, value) = match trimmed.parse::<$ty>() {
                    Ok(value) => (trimmed, value),
                    Err(_) => {
                        let digits = float_prefix(text).ok_or_else(fail)?;
                        (digits, digits.parse::<$ty>().map_err(|_| fail())?)
                    }
                };
                if !float_in_range(digits, value.is_finite(), value == 0.0) {
                    return Err(fail());
                }
                *self = value;
                Ok(())
            }
        }

        impl ToIni for $ty {
            fn to_ini(&self) -> Node {
                Node::Scalar(self.to_string())
            }
        }

        impl From<$ty> for Node {
            fn from(value: $ty) -> Self {
                value.to_ini()
            }
        }
    )*};
}

impl_float!(f32, f64);

impl FromIni for bool {
    /// Case-insensitive `true`/`on`/`1` and `false`/`off`/`0`.
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        let text = scalar_text(node, "bool")?.trim();
        *self = if ["true", "on", "1"].iter().any(|t| t.eq_ignore_ascii_case(text)) {
            true
        } else if ["false", "off", "0"].iter().any(|t| t.eq_ignore_ascii_case(text)) {
            false
        } else {
            return Err(IniError::conversion("bool", format!("'{text}'")));
        };
        Ok(())
    }
}

impl ToIni for bool {
    fn to_ini(&self) -> Node {
        Node::Scalar(self.to_string())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        value.to_ini()
    }
}

impl FromIni for String {
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        let text = scalar_text(node, "String")?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

impl ToIni for String {
    fn to_ini(&self) -> Node {
        Node::Scalar(self.clone())
    }
}

impl ToIni for str {
    fn to_ini(&self) -> Node {
        Node::Scalar(self.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.to_string())
    }
}

impl FromIni for char {
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        let text = scalar_text(node, "char")?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(IniError::conversion("char", format!("'{text}'"))),
        }
    }
}

impl ToIni for char {
    fn to_ini(&self) -> Node {
        Node::Scalar(self.to_string())
    }
}

impl FromIni for Node {
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        *self = node.clone();
        Ok(())
    }
}

impl ToIni for Node {
    fn to_ini(&self) -> Node {
        self.clone()
    }
}

impl<T: ToIni + ?Sized> ToIni for &T {
    fn to_ini(&self) -> Node {
        (**self).to_ini()
    }
}

impl<T: ToIni + ?Sized> ToIni for Box<T> {
    fn to_ini(&self) -> Node {
        (**self).to_ini()
    }
}

impl<T: FromIni + ?Sized> FromIni for Box<T> {
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        (**self).from_ini(node)
    }
}

impl<T: FromIni + Default> FromIni for Option<T> {
    /// Set to `Some` when `node` converts; left as it was otherwise.
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        match self {
            Some(existing) => existing.from_ini(node),
            None => {
                let mut value = T::default();
                value.from_ini(node)?;
                *self = Some(value);
                Ok(())
            }
        }
    }
}

/// `None` becomes an empty scalar. Reading it back gives `None` only for types
/// that reject empty text, such as numbers; `Option<String>` reads `Some("")`.
/// The serde bridge leaves `None` fields out instead.
impl<T: ToIni> ToIni for Option<T> {
    fn to_ini(&self) -> Node {
        match self {
            Some(value) => value.to_ini(),
            None => Node::Scalar(String::new()),
        }
    }
}

// --- Sequences ---

/// Order the children of an index-keyed section (`"0"`, `"1"`, ...).
///
/// Children may appear in any order, but the keys must cover `0..len` exactly.
pub(crate) fn sequence_items<'a>(node: &'a Node, expected: &'static str) -> Result<Vec<&'a Node>> {
    let children = section_children(node, expected)?;
    let mut slots: Vec<Option<&Node>> = vec![None; children.len()];
    for (key, child) in children {
        let index = parse_index(key)
            .filter(|&index| index < slots.len() && slots[index].is_none())
            .ok_or_else(|| IniError::conversion(expected, format!("index key '{key}'")))?;
        slots[index] = Some(child);
    }
    // Every slot is filled: there are as many distinct in-range keys as slots.
    Ok(slots.into_iter().flatten().collect())
}

fn parse_index(key: &str) -> Option<usize> {
    let canonical = key == "0" || (!key.starts_with('0') && key.bytes().all(|b| b.is_ascii_digit()));
    if canonical { key.parse().ok() } else { None }
}

fn sequence_node<'a, T: ToIni + 'a>(items: impl IntoIterator<Item = &'a T>) -> Node {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (index.to_string(), item.to_ini()))
        .collect()
}

fn convert_items<T: FromIni + Default>(items: Vec<&Node>) -> Result<Vec<T>> {
    items
        .into_iter()
        .map(|item| {
            let mut value = T::default();
            value.from_ini(item)?;
            Ok(value)
        })
        .collect()
}

impl<T: FromIni + Default> FromIni for Vec<T> {
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        *self = convert_items(sequence_items(node, "sequence")?)?;
        Ok(())
    }
}

impl<T: ToIni> ToIni for Vec<T> {
    fn to_ini(&self) -> Node {
        sequence_node(self)
    }
}

impl<T: ToIni> ToIni for [T] {
    fn to_ini(&self) -> Node {
        sequence_node(self)
    }
}

impl<T: FromIni + Default> FromIni for VecDeque<T> {
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        *self = convert_items(sequence_items(node, "sequence")?)?.into();
        Ok(())
    }
}

impl<T: ToIni> ToIni for VecDeque<T> {
    fn to_ini(&self) -> Node {
        sequence_node(self)
    }
}

impl<T: FromIni + Default, const N: usize> FromIni for [T; N] {
    /// Requires exactly `N` index-keyed children.
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        let items = sequence_items(node, "array")?;
        if items.len() != N {
            return Err(IniError::conversion(
                "array",
                format!("{} elements, expected {N}", items.len()),
            ));
        }
        let values: Vec<T> = convert_items(items)?;
        if let Ok(array) = <[T; N]>::try_from(values) {
            *self = array;
        }
        Ok(())
    }
}

impl<T: ToIni, const N: usize> ToIni for [T; N] {
    fn to_ini(&self) -> Node {
        sequence_node(self)
    }
}

// --- Associative containers ---

/// Convert every child of a section into a `(key, value)` pair, in child order.
fn convert_entries<K, V>(node: &Node) -> Result<Vec<(K, V)>>
where
    K: FromIni + Default,
    V: FromIni + Default,
{
    section_children(node, "map")?
        .iter()
        .map(|(name, child)| {
            let mut key = K::default();
            key.from_ini(&Node::Scalar(name.clone()))?;
            let mut value = V::default();
            value.from_ini(child)?;
            Ok((key, value))
        })
        .collect()
}

/// Child name for a map key: the key's scalar text, or its rendered form if
/// it converts to a section.
fn key_name<K: ToIni + ?Sized>(key: &K) -> String {
    match key.to_ini() {
        Node::Scalar(text) => text,
        other => other.to_string(),
    }
}

fn map_node<'a, K, V>(entries: impl IntoIterator<Item = (&'a K, &'a V)>) -> Node
where
    K: ToIni + 'a,
    V: ToIni + 'a,
{
    entries
        .into_iter()
        .map(|(key, value)| (key_name(key), value.to_ini()))
        .collect()
}

impl<K, V> FromIni for BTreeMap<K, V>
where
    K: FromIni + Default + Ord,
    V: FromIni + Default,
{
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        *self = convert_entries(node)?.into_iter().collect();
        Ok(())
    }
}

impl<K: ToIni, V: ToIni> ToIni for BTreeMap<K, V> {
    fn to_ini(&self) -> Node {
        map_node(self)
    }
}

impl<K, V, S> FromIni for HashMap<K, V, S>
where
    K: FromIni + Default + Eq + Hash,
    V: FromIni + Default,
    S: BuildHasher + Default,
{
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        *self = convert_entries(node)?.into_iter().collect();
        Ok(())
    }
}

impl<K: ToIni, V: ToIni, S> ToIni for HashMap<K, V, S> {
    fn to_ini(&self) -> Node {
        map_node(self)
    }
}

impl<K, V, S> FromIni for IndexMap<K, V, S>
where
    K: FromIni + Default + Eq + Hash,
    V: FromIni + Default,
    S: BuildHasher + Default,
{
    fn from_ini(&mut self, node: &Node) -> Result<()> {
        *self = convert_entries(node)?.into_iter().collect();
        Ok(())
    }
}

impl<K: ToIni, V: ToIni, S> ToIni for IndexMap<K, V, S> {
    fn to_ini(&self) -> Node {
        map_node(self)
    }
}
