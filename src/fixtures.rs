#[cfg(test)]
pub mod test {
    use crate::{Binding, FromIni, Node, RecordReader, RecordWriter, Result, ToIni};

    /// Canonical document: writing its parsed tree reproduces it exactly.
    pub const SAMPLE_INI: &str = "\
test1=baumhaus
test2=haus\\nbaum

[cat1]
test1=kuckuck
test5=ich bin ein text

[cat2]
test1=Falke

[cat2][subcat1]
x=15
y=7

[cat2][subcat2]
x=2
y=2
z=3

[cat2][subcat3][subsubcat1]
x=1
y=1
";

    /// Same document with incidental whitespace around keys, `=` and brackets.
    pub const SAMPLE_INI_SPACED: &str = "
  test1 = baumhaus
test2 =haus\\nbaum


 [ cat1 ]
test1=   kuckuck
  test5 = ich bin ein text

[cat2]
	test1 = Falke
[ cat2 ] [subcat1]
x = 15
y= 7

[cat2][ subcat2 ]
x =2
y = 2
z = 3

  [cat2] [subcat3]  [subsubcat1]
x = 1
y = 1

";

    fn section(children: &[(&str, Node)]) -> Node {
        children.iter().cloned().collect()
    }

    fn scalar(text: &str) -> Node {
        Node::scalar(text)
    }

    /// The tree both sample documents parse to.
    pub fn sample_tree() -> Node {
        section(&[
            ("test1", scalar("baumhaus")),
            ("test2", scalar("haus\nbaum")),
            (
                "cat1",
                section(&[
                    ("test1", scalar("kuckuck")),
                    ("test5", scalar("ich bin ein text")),
                ]),
            ),
            (
                "cat2",
                section(&[
                    ("test1", scalar("Falke")),
                    ("subcat1", section(&[("x", scalar("15")), ("y", scalar("7"))])),
                    (
                        "subcat2",
                        section(&[("x", scalar("2")), ("y", scalar("2")), ("z", scalar("3"))]),
                    ),
                    (
                        "subcat3",
                        section(&[(
                            "subsubcat1",
                            section(&[("x", scalar("1")), ("y", scalar("1"))]),
                        )]),
                    ),
                ]),
            ),
        ])
    }

    // -- Records ----------------------------------------------------------------

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Object {
        pub v: String,
        pub w: f32,
        pub x: i32,
        pub y: f64,
        pub z: String,
    }

    crate::ini_record!(Object { v, w, x, y, z });

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct ObjectLenient {
        pub v: String,
        pub w: f32,
        pub x: i32,
        pub y: f64,
        pub z: String,
    }

    crate::ini_record!(ObjectLenient { v, w, x, y, z }, lenient);

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    pub struct Sub1 {
        pub x: f32,
        pub y: f32,
    }

    crate::ini_record!(Sub1 { x, y }, lenient);

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Sub2 {
        pub a: i32,
        pub b: Sub1,
    }

    crate::ini_record!(Sub2 { a, b }, lenient);

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Sub3 {
        pub a: Sub2,
    }

    crate::ini_record!(Sub3 { a }, lenient);

    #[derive(Debug, Clone, PartialEq)]
    pub struct RootElement {
        pub a: String,
        pub b: u16,
        pub c: Sub1,
        pub d: Sub3,
    }

    impl Default for RootElement {
        fn default() -> Self {
            Self {
                a: "huhu".into(),
                b: 5,
                c: Sub1::default(),
                d: Sub3::default(),
            }
        }
    }

    crate::ini_record!(RootElement { a, b, c, d }, lenient);

    #[derive(Debug, Clone, PartialEq)]
    pub struct RootElement2 {
        pub a: String,
        pub b: u16,
        pub c: Sub1,
        pub d: Sub2,
    }

    impl Default for RootElement2 {
        fn default() -> Self {
            Self {
                a: "huhu".into(),
                b: 5,
                c: Sub1::default(),
                d: Sub2::default(),
            }
        }
    }

    crate::ini_record!(RootElement2 { a, b, c, d }, lenient);

    /// Bound by hand instead of through the macro.
    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    pub struct Point {
        pub x: i64,
        pub y: i64,
    }

    impl FromIni for Point {
        fn from_ini(&mut self, node: &Node) -> Result<()> {
            RecordReader::new(node, Binding::Lenient)
                .field("x", &mut self.x)?
                .field("y", &mut self.y)?
                .finish()
        }
    }

    impl ToIni for Point {
        fn to_ini(&self) -> Node {
            RecordWriter::new()
                .field("x", &self.x)
                .field("y", &self.y)
                .finish()
        }
    }

    // -- Enums ------------------------------------------------------------------

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum Mode {
        #[default]
        Fast,
        Slow,
    }

    crate::ini_enum!(Mode { Fast = "fast", Slow = "slow" });

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum Slot {
        #[default]
        S0,
        S1,
        S2,
        S3,
        S4,
        S5,
    }

    crate::ini_ordinal_enum!(Slot { S0, S1, S2, S3, S4, S5 });

    #[test]
    fn sample_documents_parse_to_sample_tree() {
        assert_eq!(crate::parse(SAMPLE_INI).unwrap(), sample_tree());
        assert_eq!(crate::parse(SAMPLE_INI_SPACED).unwrap(), sample_tree());
    }
}
