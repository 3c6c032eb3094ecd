//! Record (struct) bindings.
//!
//! A record is converted through an ordered list of `(field name, field)`
//! pairs. [`RecordReader`] walks that list against a section and
//! [`RecordWriter`] builds a section from it. How the list is produced does
//! not matter: write it by hand, or let [`ini_record!`](crate::ini_record)
//! generate both directions.
//!
//! ```ignore
//! impl FromIni for Point {
//!     fn from_ini(&mut self, node: &Node) -> Result<()> {
//!         RecordReader::new(node, Binding::Lenient)
//!             .field("x", &mut self.x)?
//!             .field("y", &mut self.y)?
//!             .finish()
//!     }
//! }
//! ```

use crate::convert::{FromIni, ToIni};
use crate::error::Result;
use crate::node::Node;

/// How a record treats fields missing from its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    /// A missing field fails the whole conversion with
    /// [`IniError::KeyNotFound`](crate::IniError::KeyNotFound).
    #[default]
    Required,
    /// A missing field keeps its previous value. Nothing is ever propagated,
    /// not even from nested required records.
    Lenient,
}

/// Reads fields of a record out of a section, one call per field.
///
/// Each present field is converted with [`Node::get_to`], so a field whose
/// text does not convert keeps its previous value in both bindings.
#[derive(Debug, Clone, Copy)]
pub struct RecordReader<'a> {
    node: &'a Node,
    binding: Binding,
}

impl<'a> RecordReader<'a> {
    pub fn new(node: &'a Node, binding: Binding) -> Self {
        Self { node, binding }
    }

    /// Convert the child `name` into `target`.
    pub fn field<T: FromIni + ?Sized>(self, name: &str, target: &mut T) -> Result<Self> {
        match self.binding {
            Binding::Required => self.node.at(name)?.get_to(target)?,
            Binding::Lenient => {
                if let Ok(child) = self.node.at(name)
                    && let Err(err) = child.get_to(target)
                {
                    tracing::debug!(field = name, %err, "ignoring nested error in lenient record");
                }
            }
        }
        Ok(self)
    }

    pub fn finish(self) -> Result<()> {
        Ok(())
    }
}

/// Builds the section for a record, one call per field.
#[derive(Debug, Clone, Default)]
pub struct RecordWriter {
    node: Node,
}

impl RecordWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<T: ToIni + ?Sized>(mut self, name: &str, value: &T) -> Self {
        self.node.set(name, value);
        self
    }

    pub fn finish(self) -> Node {
        self.node
    }
}

/// Implement [`FromIni`](crate::FromIni) and [`ToIni`](crate::ToIni) for a
/// struct from its field list.
///
/// Fields are required by default; append `, lenient` to skip missing ones.
///
/// ```ignore
/// ini_record!(Server { host, port });
/// ini_record!(Limits { max_conn, timeout }, lenient);
/// ```
#[macro_export]
macro_rules! ini_record {
    (@impl $ty:ty, $binding:expr, { $($field:ident),+ }) => {
        impl $crate::FromIni for $ty {
            fn from_ini(&mut self, node: &$crate::Node) -> $crate::Result<()> {
                $crate::RecordReader::new(node, $binding)
                    $(.field(stringify!($field), &mut self.$field)?)+
                    .finish()
            }
        }

        impl $crate::ToIni for $ty {
            fn to_ini(&self) -> $crate::Node {
                $crate::RecordWriter::new()
                    $(.field(stringify!($field), &self.$field))+
                    .finish()
            }
        }
    };
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        $crate::ini_record!(@impl $ty, $crate::Binding::Required, { $($field),+ });
    };
    ($ty:ty { $($field:ident),+ $(,)? }, lenient) => {
        $crate::ini_record!(@impl $ty, $crate::Binding::Lenient, { $($field),+ });
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IniError;
    use crate::fixtures::test::{Object, ObjectLenient, Point, RootElement, RootElement2, Sub1};
    use crate::parse::parse;

    const OBJECT_INI: &str = "v=7\nw=3.5\nx=-27\ny=-12.74\nz=ich trage gern Tütü\n";

    fn prior() -> ObjectLenient {
        ObjectLenient {
            v: "7".into(),
            w: 3.5,
            x: -27,
            y: -12.74,
            z: "ich trage gern Tütü".into(),
        }
    }

    #[test]
    fn required_record_reads_all_fields() {
        let root = parse(OBJECT_INI).unwrap();
        let obj: Object = root.get().unwrap();
        assert_eq!(obj.v, "7");
        assert_eq!(obj.w, 3.5);
        assert_eq!(obj.x, -27);
        assert_eq!(obj.y, -12.74);
        assert_eq!(obj.z, "ich trage gern Tütü");
    }

    #[test]
    fn required_record_missing_field_fails() {
        let root = parse("").unwrap();
        assert!(matches!(root.get::<Object>(), Err(IniError::KeyNotFound(k)) if k == "v"));
        let mut obj = Object::default();
        assert!(matches!(root.get_to(&mut obj), Err(IniError::KeyNotFound(_))));
    }

    #[test]
    fn required_record_on_scalar_fails() {
        assert!(matches!(
            Node::scalar("x").get::<Object>(),
            Err(IniError::KeyNotFound(_))
        ));
    }

    #[test]
    fn lenient_record_updates_only_present_fields() {
        let root = parse("x=-102").unwrap();
        let mut obj = prior();
        root.get_to(&mut obj).unwrap();
        assert_eq!(obj, ObjectLenient { x: -102, ..prior() });
    }

    #[test]
    fn lenient_record_via_get_starts_from_default() {
        let root = parse("x=-102").unwrap();
        let obj: ObjectLenient = root.get().unwrap();
        assert_eq!(
            obj,
            ObjectLenient {
                x: -102,
                ..ObjectLenient::default()
            }
        );
    }

    #[test]
    fn lenient_record_wrong_types_keep_values() {
        let root = parse("w=abc\nx=def\ny=ghi\n").unwrap();
        let mut obj = prior();
        root.get_to(&mut obj).unwrap();
        assert_eq!(obj, prior());
    }

    #[test]
    fn lenient_record_ignores_nested_required_failure() {
        #[derive(Debug, Default, PartialEq)]
        struct Outer {
            inner: Object,
            n: i32,
        }
        crate::ini_record!(Outer { inner, n }, lenient);

        let root = parse("n=4\n[inner]\nv=only\n").unwrap();
        let outer: Outer = root.get().unwrap();
        assert_eq!(outer.n, 4);
        assert_eq!(outer.inner.v, "only");
    }

    #[test]
    fn nested_records_from_nested_sections() {
        let text = "b=8\n\n[c]\nx=0.5\ny=0.685\n\n[d][a]\na=28\n\n[d][a][b]\nx=1.75\ny=12.385\n";
        let obj: RootElement = parse(text).unwrap().get().unwrap();
        assert_eq!(obj.a, "huhu");
        assert_eq!(obj.b, 8);
        assert_eq!(obj.c, Sub1 { x: 0.5, y: 0.685 });
        assert_eq!(obj.d.a.a, 28);
        assert_eq!(obj.d.a.b, Sub1 { x: 1.75, y: 12.385 });
    }

    #[test]
    fn mismatched_nesting_keeps_defaults() {
        let text = "b=8\n\n[c]\nx=0.5\ny=0.685\n\n[d][a]\na=28\n\n[d][a][b]\nx=1.75\ny=12.385\n";
        let obj: RootElement2 = parse(text).unwrap().get().unwrap();
        assert_eq!(obj.b, 8);
        assert_eq!(obj.c, Sub1 { x: 0.5, y: 0.685 });
        assert_eq!(obj.d.a, 0);
        assert_eq!(obj.d.b, Sub1::default());
    }

    #[test]
    fn record_to_ini_builds_section() {
        let node = Node::new(&prior());
        let expected: Node = [
            ("v", Node::scalar("7")),
            ("w", Node::scalar("3.5")),
            ("x", Node::scalar("-27")),
            ("y", Node::scalar("-12.74")),
            ("z", Node::scalar("ich trage gern Tütü")),
        ]
        .into_iter()
        .collect();
        assert_eq!(node, expected);
    }

    #[test]
    fn nested_record_to_ini_matches_parsed_text() {
        let text = "a=huhu\nb=8\n\n[c]\nx=0.5\ny=0.685\n\n[d][a]\na=28\n\n[d][a][b]\nx=1.75\ny=12.385\n";
        let obj: RootElement = parse(text).unwrap().get().unwrap();
        let node = Node::new(&obj);
        assert_eq!(node, parse(text).unwrap());
        assert_eq!(node.to_string(), text);
    }

    #[test]
    fn record_round_trip_is_idempotent() {
        let node = Node::new(&prior());
        let back: ObjectLenient = node.get().unwrap();
        assert_eq!(back, prior());
        assert_eq!(Node::new(&back), node);
    }

    #[test]
    fn hand_written_binding() {
        let root = parse("x=3\n").unwrap();
        let mut point = Point { x: 1, y: 2 };
        root.get_to(&mut point).unwrap();
        assert_eq!(point, Point { x: 3, y: 2 });
        assert_eq!(Node::new(&point)["y"], Node::scalar("2"));
    }

    #[test]
    fn writer_keeps_field_order() {
        let node = RecordWriter::new()
            .field("z", &1)
            .field("a", &2)
            .finish();
        let keys: Vec<&str> = node.keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }
}
