//! The value tree.
//!
//! A [`Node`] is either a [`Scalar`](Node::Scalar) holding opaque text or a
//! [`Section`](Node::Section) holding named children. Sections keep their
//! children in insertion order so that a parsed file serializes back the way it
//! was written; equality, however, only looks at keys and values.
//!
//! Nodes carry no parent pointers. The bracket path of a nested section is
//! computed by the writer while it walks the tree.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::convert::ToIni;
use crate::error::{IniError, Result};

/// Ordered mapping of child names to nodes.
pub type Section = IndexMap<String, Node>;

/// A single element of the value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(String),
    Section(Section),
}

impl Default for Node {
    /// An empty section, the shape of an empty document.
    fn default() -> Self {
        Node::Section(Section::new())
    }
}

impl Node {
    /// Build a node from any convertible value.
    ///
    /// Scalars are formatted to their canonical text; records and containers
    /// expand into sections.
    pub fn new<T: ToIni + ?Sized>(value: &T) -> Self {
        value.to_ini()
    }

    pub fn scalar(text: impl Into<String>) -> Self {
        Node::Scalar(text.into())
    }

    /// An empty section.
    pub fn section() -> Self {
        Node::Section(Section::new())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Node::Section(_))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            Node::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Node::Section(children) => Some(children),
            Node::Scalar(_) => None,
        }
    }

    pub fn as_section_mut(&mut self) -> Option<&mut Section> {
        match self {
            Node::Section(children) => Some(children),
            Node::Scalar(_) => None,
        }
    }

    /// Whether this node is a section with a child named `key`.
    pub fn has(&self, key: &str) -> bool {
        self.as_section().is_some_and(|s| s.contains_key(key))
    }

    /// Look up a child, failing with [`IniError::KeyNotFound`] when it is
    /// missing or this node is a scalar.
    pub fn at(&self, key: &str) -> Result<&Node> {
        self.as_section()
            .and_then(|s| s.get(key))
            .ok_or_else(|| IniError::KeyNotFound(key.to_string()))
    }

    pub fn at_mut(&mut self, key: &str) -> Result<&mut Node> {
        self.as_section_mut()
            .and_then(|s| s.get_mut(key))
            .ok_or_else(|| IniError::KeyNotFound(key.to_string()))
    }

    /// Turn this node into a section, dropping scalar content if any, and
    /// return its children.
    pub fn make_section(&mut self) -> &mut Section {
        if let Node::Scalar(_) = self {
            *self = Node::section();
        }
        match self {
            Node::Section(children) => children,
            Node::Scalar(_) => unreachable!("scalar was just replaced"),
        }
    }

    /// Get the child `key`, creating an empty section for it if absent.
    ///
    /// A scalar node is replaced by a section first.
    pub fn child_mut(&mut self, key: &str) -> &mut Node {
        self.make_section()
            .entry(key.to_string())
            .or_insert_with(Node::section)
    }

    /// Insert a child, replacing any previous child with that name in place.
    pub fn insert(&mut self, key: impl Into<String>, child: Node) -> Option<Node> {
        self.make_section().insert(key.into(), child)
    }

    /// Convert `value` and store it under `key`.
    pub fn set<T: ToIni + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> &mut Node {
        let key = key.into();
        let children = self.make_section();
        children.insert(key.clone(), value.to_ini());
        &mut children[&key]
    }

    /// Remove a child, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.as_section_mut().and_then(|s| s.shift_remove(key))
    }

    /// Number of children; zero for scalars.
    pub fn len(&self) -> usize {
        self.as_section().map_or(0, Section::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children in insertion order. Scalars have none.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.as_section()
            .into_iter()
            .flat_map(|s| s.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }
}

impl Index<&str> for Node {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if the child does not exist. Use [`Node::at`] for a fallible
    /// lookup.
    fn index(&self, key: &str) -> &Node {
        match self.at(key) {
            Ok(child) => child,
            Err(_) => panic!("no child named '{key}'"),
        }
    }
}

impl IndexMut<&str> for Node {
    /// Get or create the child `key`; see [`Node::child_mut`].
    fn index_mut(&mut self, key: &str) -> &mut Node {
        self.child_mut(key)
    }
}

impl From<Section> for Node {
    fn from(children: Section) -> Self {
        Node::Section(children)
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        Node::Section(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::section();
        root["a"] = Node::scalar("1");
        root["b"] = Node::scalar("2");
        root["c"]["x"] = Node::scalar("15");
        root
    }

    #[test]
    fn default_is_empty_section() {
        let node = Node::default();
        assert!(node.is_section());
        assert!(node.is_empty());
    }

    #[test]
    fn index_mut_creates_nested_sections() {
        let root = sample();
        assert_eq!(root["c"]["x"], Node::scalar("15"));
        assert!(root["c"].is_section());
    }

    #[test]
    fn overwrite_keeps_insertion_position() {
        let mut root = sample();
        root["a"] = Node::scalar("changed");
        let keys: Vec<&str> = root.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(root["a"].as_scalar(), Some("changed"));
    }

    #[test]
    fn assigning_scalar_replaces_section() {
        let mut root = sample();
        root["c"] = Node::scalar("flat");
        assert!(root["c"].is_scalar());
        assert!(!root["c"].has("x"));
    }

    #[test]
    fn indexing_scalar_turns_it_into_section() {
        let mut node = Node::scalar("text");
        node["k"] = Node::scalar("v");
        assert!(node.is_section());
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn at_missing_key_fails() {
        let root = sample();
        assert!(matches!(root.at("zzz"), Err(IniError::KeyNotFound(k)) if k == "zzz"));
    }

    #[test]
    fn at_on_scalar_fails() {
        let node = Node::scalar("x");
        assert!(matches!(node.at("x"), Err(IniError::KeyNotFound(_))));
    }

    #[test]
    fn has_reports_presence() {
        let root = sample();
        assert!(root.has("a"));
        assert!(!root.has("missing"));
        assert!(!root["a"].has("a"));
    }

    #[test]
    #[should_panic(expected = "no child named 'nope'")]
    fn index_missing_panics() {
        let root = sample();
        let _ = &root["nope"];
    }

    #[test]
    fn equality_ignores_order() {
        let left: Node = [("a", Node::scalar("1")), ("b", Node::scalar("2"))]
            .into_iter()
            .collect();
        let right: Node = [("b", Node::scalar("2")), ("a", Node::scalar("1"))]
            .into_iter()
            .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn equality_is_structural() {
        let mut other = sample();
        assert_eq!(sample(), other);
        other["c"]["x"] = Node::scalar("16");
        assert_ne!(sample(), other);
        assert_ne!(Node::scalar(""), Node::section());
    }

    #[test]
    fn remove_preserves_order() {
        let mut root = sample();
        assert_eq!(root.remove("a"), Some(Node::scalar("1")));
        let keys: Vec<&str> = root.keys().collect();
        assert_eq!(keys, vec!["b", "c"]);
        assert_eq!(root.remove("a"), None);
    }

    #[test]
    fn scalar_has_no_children() {
        let node = Node::scalar("x");
        assert_eq!(node.len(), 0);
        assert_eq!(node.iter().count(), 0);
    }

    #[test]
    fn set_converts_value() {
        let mut root = Node::section();
        root.set("port", &8080u16);
        root.set("name", "svc");
        assert_eq!(root["port"], Node::scalar("8080"));
        assert_eq!(root["name"], Node::scalar("svc"));
    }
}
