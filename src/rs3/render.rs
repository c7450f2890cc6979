//! Plain-text rendering of constituency trees

use super::tree::TreeNode;

/// Render a tree as an indented outline, one node per line.
///
/// Leaves print their nuclearity label and quoted text; internal nodes print
/// their label with children indented below. The output is deterministic.
pub fn render(tree: &TreeNode) -> String {
    if tree.is_empty_tree() {
        return "(empty)\n".to_string();
    }
    let mut out = String::new();
    render_into(tree, 0, &mut out);
    out
}

fn render_into(node: &TreeNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    match node.text() {
        Some(text) => {
            out.push_str(node.label());
            out.push(' ');
            out.push_str(&format!("{:?}", text));
            out.push('\n');
        }
        None => {
            out.push_str(node.label());
            out.push('\n');
            for child in node.children() {
                render_into(child, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_relation() {
        let tree = TreeNode::node(
            "elaboration",
            vec![TreeNode::leaf("N", "a"), TreeNode::leaf("S", "b")],
        );
        assert_eq!(render(&tree), "elaboration\n  N \"a\"\n  S \"b\"\n");
    }

    #[test]
    fn test_render_nested() {
        let tree = TreeNode::node(
            "N",
            vec![TreeNode::node(
                "list",
                vec![TreeNode::leaf("N", "a"), TreeNode::leaf("N", "b")],
            )],
        );
        assert_eq!(render(&tree), "N\n  list\n    N \"a\"\n    N \"b\"\n");
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render(&TreeNode::empty()), "(empty)\n");
    }
}
