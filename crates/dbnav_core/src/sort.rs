use crate::node::{NavTree, NodeId};
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// How siblings are ordered at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Digit runs compare by numeric value, so `b2` sorts before `b10`.
    #[default]
    Natural,
    /// Plain byte-wise string comparison.
    Lexicographic,
}

impl SortMode {
    pub fn from_natural_order(natural_order: bool) -> Self {
        if natural_order {
            Self::Natural
        } else {
            Self::Lexicographic
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Natural => natural_cmp(a, b),
            Self::Lexicographic => a.cmp(b),
        }
    }
}

/// Case-sensitive natural-order comparison.
///
/// Runs of ASCII digits are compared by numeric value (leading zeros
/// ignored), everything else character by character. Strings that only
/// differ in leading zeros fall back to plain comparison so the order
/// stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ordering = compare_numeric(&l_run, &r_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl NavTree {
    /// Children of `id` ordered by display name. The tree itself is untouched.
    pub fn sorted_children(&self, id: NodeId, mode: SortMode) -> Vec<NodeId> {
        let mut children = self.children(id).to_vec();
        children.sort_by(|&a, &b| mode.compare(&self.node(a).name, &self.node(b).name));
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn sorted(mode: SortMode, names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        names.sort_by(|a, b| mode.compare(a, b));
        names
    }

    #[test]
    fn test_natural_order() {
        assert_eq!(
            sorted(SortMode::Natural, &["b10", "b2", "b1"]),
            vec!["b1", "b2", "b10"]
        );
    }

    #[test]
    fn test_lexicographic_order() {
        assert_eq!(
            sorted(SortMode::Lexicographic, &["b10", "b2", "b1"]),
            vec!["b1", "b10", "b2"]
        );
    }

    #[test]
    fn test_natural_is_case_sensitive() {
        assert_eq!(
            sorted(SortMode::Natural, &["b", "B", "a"]),
            vec!["B", "a", "b"]
        );
    }

    #[test]
    fn test_natural_multiple_runs() {
        assert_eq!(
            sorted(SortMode::Natural, &["v1.10", "v1.9", "v1.2", "v0.99"]),
            vec!["v0.99", "v1.2", "v1.9", "v1.10"]
        );
    }

    #[test]
    fn test_natural_leading_zeros() {
        assert_eq!(natural_cmp("t007", "t7"), "t007".cmp("t7"));
        assert_eq!(natural_cmp("t007", "t8"), Ordering::Less);
        assert_eq!(natural_cmp("t10", "t010"), "t10".cmp("t010"));
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("log", "log2"), Ordering::Less);
        assert_eq!(natural_cmp("log2", "log"), Ordering::Greater);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sorted_children_uses_display_name() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let z = tree.add_child(root, Node::object("a").with_real_name("z"));
        let a = tree.add_child(root, Node::object("b").with_real_name("a"));

        assert_eq!(tree.sorted_children(root, SortMode::Natural), vec![z, a]);
        assert_eq!(tree.children(root), &[z, a]);
    }
}
