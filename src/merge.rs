use crate::node::Node;

/// Lay `overlay` over `base` and return the combined tree.
///
/// Two sections under the same name are combined child by child. Any other
/// pair, a scalar against anything included, takes the overlay node whole.
/// Children that only exist in `overlay` go after the existing ones.
pub fn deep_merge(mut base: Node, overlay: Node) -> Node {
    base.merge(overlay);
    base
}

impl Node {
    /// In-place form of [`deep_merge`]. Existing keys keep their position.
    pub fn merge(&mut self, overlay: Node) {
        match (self, overlay) {
            (Node::Section(base), Node::Section(overlay)) => {
                for (key, overlay_child) in overlay {
                    match base.get_mut(&key) {
                        Some(base_child) if base_child.is_section() && overlay_child.is_section() => {
                            base_child.merge(overlay_child);
                        }
                        _ => {
                            base.insert(key, overlay_child);
                        }
                    }
                }
            }
            (this, overlay) => *this = overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{SAMPLE_INI, sample_tree};
    use crate::parse::parse;

    fn tree(text: &str) -> Node {
        parse(text).unwrap()
    }

    #[test]
    fn user_file_over_defaults() {
        let defaults = tree("host=localhost\nport=8080\n\n[db]\nurl=pg://local\npool=5\n");
        let user = tree("port=3000\n\n[db]\npool=20\n");
        let merged = deep_merge(defaults, user);
        assert_eq!(
            merged.to_string(),
            "host=localhost\nport=3000\n\n[db]\nurl=pg://local\npool=20\n"
        );
    }

    #[test]
    fn scalar_overlay_replaces_whole_section() {
        let merged = deep_merge(tree("[db]\nurl=x\n"), tree("db=off"));
        assert_eq!(merged["db"], Node::scalar("off"));
    }

    #[test]
    fn nested_header_overlay_replaces_scalar() {
        let merged = deep_merge(tree("a=flat\nb=1\n"), tree("[a][b]\nx=2\n"));
        assert_eq!(merged["a"]["b"]["x"].get::<i32>().unwrap(), 2);
        assert_eq!(merged["b"], Node::scalar("1"));
        assert_eq!(merged.to_string(), "b=1\n\n[a][b]\nx=2\n");
    }

    #[test]
    fn header_only_paths_combine_below_the_top() {
        let base = tree("[cat2][subcat3][subsubcat1]\nx=1\n");
        let overlay = tree("[cat2][subcat3][subsubcat2]\ny=2\n");
        let merged = deep_merge(base, overlay);
        assert_eq!(
            merged.to_string(),
            "[cat2][subcat3][subsubcat1]\nx=1\n\n[cat2][subcat3][subsubcat2]\ny=2\n"
        );
    }

    #[test]
    fn empty_section_overlay_keeps_base_children() {
        let merged = deep_merge(tree("[a]\nx=1\n"), tree("[a]\n"));
        assert_eq!(merged["a"]["x"], Node::scalar("1"));
    }

    #[test]
    fn merging_a_tree_into_itself_is_a_no_op() {
        let mut root = sample_tree();
        root.merge(sample_tree());
        assert_eq!(root.to_string(), SAMPLE_INI);
    }

    #[test]
    fn new_keys_follow_existing_ones() {
        let mut root = tree("a=1\nb=2\n");
        root.merge(tree("c=3\na=9\n"));
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(root.to_string(), "a=9\nb=2\nc=3\n");
    }

    #[test]
    fn scalar_base_is_replaced() {
        let mut root = Node::scalar("x");
        root.merge(tree("k=v"));
        assert_eq!(root["k"], Node::scalar("v"));
    }
}
