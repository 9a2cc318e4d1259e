use crate::object_kind::Links;

/// Handle of a node inside a [`NavTree`].
///
/// Handles are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Whether a node is a category/grouping container or a concrete object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Container,
    Object,
}

/// A single element of the navigation tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Display label. Differs from `real_name` once grouping strips a prefix.
    pub name: String,

    /// Identity used for listings, links and the actual path.
    pub real_name: String,

    pub node_type: NodeType,

    /// Synthetic container created by prefix grouping.
    pub is_group: bool,

    pub icon: String,

    pub links: Links,

    /// Extra CSS classes for action nodes such as "New" under indexes.
    pub classes: String,

    /// Grouping separator for this container's children. Empty disables grouping.
    pub separator: String,

    /// How many more levels of grouping may be applied below this container.
    pub separator_depth: u32,

    /// Forced open because it lies on the active virtual path.
    pub visible: bool,

    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        let name = name.into();
        Self {
            real_name: name.clone(),
            name,
            node_type,
            is_group: false,
            icon: String::new(),
            links: Links::none(),
            classes: String::new(),
            separator: String::new(),
            separator_depth: 1,
            visible: false,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Object)
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Container)
    }

    pub fn with_real_name(mut self, real_name: impl Into<String>) -> Self {
        self.real_name = real_name.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>, depth: u32) -> Self {
        self.separator = separator.into();
        self.separator_depth = depth;
        self
    }

    pub fn is_container(&self) -> bool {
        self.node_type == NodeType::Container
    }

    pub fn is_object(&self) -> bool {
        self.node_type == NodeType::Object
    }

    /// Whether grouping may run on this node's children.
    pub fn can_group(&self) -> bool {
        self.is_container() && !self.separator.is_empty() && self.separator_depth > 0
    }
}

/// Arena holding every node built for one request.
///
/// Ownership runs root to children through the arena; parent links are plain
/// handles. Detached nodes stay in the arena but are no longer reachable from
/// the root.
#[derive(Debug, Clone)]
pub struct NavTree {
    nodes: Vec<Node>,
}

const ROOT: NodeId = NodeId(0);

/// Name (and real name) of the root node. Always the first actual-path segment.
pub const ROOT_NAME: &str = "root";

impl NavTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::container(ROOT_NAME)],
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Adds a new node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Moves an existing node (and its subtree) under `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Unlinks a node from its parent. The subtree stays intact.
    pub fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|&id| id != child);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn num_children(&self, id: NodeId) -> usize {
        self.nodes[id.0].children.len()
    }

    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.nodes[id.0].name == name)
    }

    pub fn child_by_real_name(&self, parent: NodeId, real_name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.nodes[id.0].real_name == real_name)
    }

    /// Whether `id` has children worth expanding.
    ///
    /// With `count_empty_containers == false`, empty containers are ignored
    /// since they get pruned from eager output anyway.
    pub fn has_children(&self, id: NodeId, count_empty_containers: bool) -> bool {
        if count_empty_containers {
            return self.num_children(id) > 0;
        }

        self.children(id).iter().any(|&child| {
            let node = &self.nodes[child.0];
            !node.is_container() || !node.children.is_empty()
        })
    }

    /// Ancestors of `id`, nearest first.
    ///
    /// `include_self` adds `id` itself subject to the same filters. Containers
    /// (root included) and synthetic groups are skipped unless requested.
    pub fn parents(
        &self,
        id: NodeId,
        include_self: bool,
        include_containers: bool,
        include_groups: bool,
    ) -> Vec<NodeId> {
        let keep = |node: &Node| {
            (include_containers || !node.is_container()) && (include_groups || !node.is_group)
        };

        let mut parents = Vec::new();
        if include_self && keep(&self.nodes[id.0]) {
            parents.push(id);
        }

        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            if keep(&self.nodes[parent.0]) {
                parents.push(parent);
            }
            current = self.nodes[parent.0].parent;
        }

        parents
    }

    /// Nodes reachable from `id`, depth first, `id` included.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut visited = Vec::new();
        let mut to_visit = vec![id];

        while let Some(current) = to_visit.pop() {
            visited.push(current);
            to_visit.extend(self.children(current).iter().rev().copied());
        }

        visited
    }
}

impl Default for NavTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_parent() {
        let tree = NavTree::new();
        let root = tree.root();
        assert!(tree.parent(root).is_none());
        assert_eq!(tree.node(root).name, ROOT_NAME);
        assert!(tree.node(root).is_container());
    }

    #[test]
    fn test_real_name_defaults_to_name() {
        let node = Node::object("users");
        assert_eq!(node.real_name, "users");

        let node = Node::object("profile").with_real_name("user_profile");
        assert_eq!(node.name, "profile");
        assert_eq!(node.real_name, "user_profile");
    }

    #[test]
    fn test_child_lookup() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let db = tree.add_child(root, Node::object("shop"));
        let tables = tree.add_child(db, Node::container("Tables").with_real_name("tables"));

        assert_eq!(tree.parent(db), Some(root));
        assert_eq!(tree.child_by_name(root, "shop"), Some(db));
        assert_eq!(tree.child_by_name(db, "tables"), None);
        assert_eq!(tree.child_by_real_name(db, "tables"), Some(tables));
        assert_eq!(tree.child_by_name(db, "Tables"), Some(tables));
    }

    #[test]
    fn test_attach_moves_subtree() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let a = tree.add_child(root, Node::container("a"));
        let b = tree.add_child(root, Node::container("b"));
        let leaf = tree.add_child(a, Node::object("leaf"));
        let grandchild = tree.add_child(leaf, Node::object("inner"));

        tree.attach(b, leaf);

        assert_eq!(tree.num_children(a), 0);
        assert_eq!(tree.children(b), &[leaf]);
        assert_eq!(tree.parent(leaf), Some(b));
        assert_eq!(tree.parent(grandchild), Some(leaf));
    }

    #[test]
    fn test_detach_keeps_siblings_in_order() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let a = tree.add_child(root, Node::object("a"));
        let b = tree.add_child(root, Node::object("b"));
        let c = tree.add_child(root, Node::object("c"));

        tree.detach(b);

        assert_eq!(tree.children(root), &[a, c]);
        assert!(tree.parent(b).is_none());
    }

    #[test]
    fn test_has_children_ignores_empty_containers() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let db = tree.add_child(root, Node::object("shop"));
        let tables = tree.add_child(db, Node::container("Tables"));

        assert!(tree.has_children(db, true));
        assert!(!tree.has_children(db, false));

        tree.add_child(tables, Node::object("users"));
        assert!(tree.has_children(db, false));
    }

    #[test]
    fn test_parents_filters() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let db = tree.add_child(root, Node::object("shop"));
        let tables = tree.add_child(db, Node::container("Tables").with_real_name("tables"));
        let mut group = Node::container("user_");
        group.is_group = true;
        let group = tree.add_child(tables, group);
        let table = tree.add_child(group, Node::object("profile").with_real_name("user_profile"));

        assert_eq!(tree.parents(table, true, false, false), vec![table, db]);
        assert_eq!(
            tree.parents(table, true, true, false),
            vec![table, tables, db, root]
        );
        assert_eq!(
            tree.parents(table, true, true, true),
            vec![table, group, tables, db, root]
        );
        assert_eq!(tree.parents(tables, true, false, false), vec![db]);
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = NavTree::new();
        let root = tree.root();
        let a = tree.add_child(root, Node::container("a"));
        let a1 = tree.add_child(a, Node::object("a1"));
        let b = tree.add_child(root, Node::object("b"));

        assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
    }
}
