use crate::node::{NavTree, Node, NodeId};
use crate::presentation::{Presentation, UiIcon};
use indexmap::IndexMap;

/// Collapses siblings sharing a name prefix into synthetic group containers.
pub struct Grouper<'a> {
    presentation: &'a dyn Presentation,
    icons_enabled: bool,
}

impl<'a> Grouper<'a> {
    pub fn new(presentation: &'a dyn Presentation, icons_enabled: bool) -> Self {
        Self {
            presentation,
            icons_enabled,
        }
    }

    /// Groups `id` and then every node below it.
    pub fn group_tree(&self, tree: &mut NavTree, id: NodeId) {
        self.group_node(tree, id);
        for child in tree.children(id).to_vec() {
            self.group_tree(tree, child);
        }
    }

    /// Groups the object children of a single container.
    ///
    /// Prefixes are tallied over the object children present before any group
    /// is created. Every prefix shared by at least two objects becomes a group
    /// container, in order of first appearance. New groups get one less level
    /// of depth and are grouped in turn.
    pub fn group_node(&self, tree: &mut NavTree, id: NodeId) {
        if !tree.node(id).can_group() {
            return;
        }

        let separator = tree.node(id).separator.clone();
        let depth = tree.node(id).separator_depth;

        let objects: Vec<NodeId> = tree
            .children(id)
            .iter()
            .copied()
            .filter(|&child| tree.node(child).is_object())
            .collect();

        let mut prefixes: IndexMap<String, usize> = IndexMap::new();
        for &child in &objects {
            if let Some(prefix) = group_prefix(&tree.node(child).name, &separator) {
                *prefixes.entry(prefix.to_string()).or_insert(0) += 1;
            }
        }
        prefixes.retain(|_, count| *count > 1);

        if prefixes.is_empty() {
            return;
        }

        let mut groups = Vec::with_capacity(prefixes.len());
        for prefix in prefixes.keys() {
            let mut group = Node::container(prefix.clone()).with_separator(&separator, depth - 1);
            group.is_group = true;
            if self.icons_enabled {
                group.icon = self.presentation.icon(UiIcon::Group);
            }
            let group_id = tree.add_child(id, group);

            let members: Vec<NodeId> = objects
                .iter()
                .copied()
                .filter(|&child| {
                    tree.parent(child) == Some(id) && tree.node(child).name.starts_with(prefix.as_str())
                })
                .collect();

            for child in members {
                self.move_into_group(tree, child, group_id, prefix.len());
            }

            log::debug!(
                "Grouped {} children of {:?} under {:?}",
                tree.num_children(group_id),
                tree.node(id).name,
                prefix
            );
            groups.push(group_id);
        }

        for group in groups {
            self.group_node(tree, group);
        }
    }

    /// Moves `child` with its subtree into `group`, dropping the prefix from
    /// its display name. The node keeps its id, real name, icon and links.
    fn move_into_group(&self, tree: &mut NavTree, child: NodeId, group: NodeId, prefix_len: usize) {
        let node = tree.node_mut(child);
        node.name = node.name[prefix_len..].to_string();
        tree.attach(group, child);
    }
}

/// Text up to and including the first separator, unless that separator ends
/// the name.
pub fn group_prefix<'n>(name: &'n str, separator: &str) -> Option<&'n str> {
    if separator.is_empty() {
        return None;
    }

    let end = name.find(separator)? + separator.len();
    if end >= name.len() {
        return None;
    }

    Some(&name[..end])
}
