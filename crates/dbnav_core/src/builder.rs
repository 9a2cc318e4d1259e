use crate::config::NavConfig;
use crate::lister::ObjectLister;
use crate::node::{NavTree, Node, NodeId, ROOT_NAME};
use crate::object_kind::{DB_CONTAINERS, ObjectKind, TABLE_CONTAINERS};
use crate::presentation::{Presentation, UiIcon, UiText};
use crate::NavError;
use indexmap::IndexMap;

/// Outcome of resolving an actual path against the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathResolution {
    /// The active node, fully matched.
    Resolved(NodeId),
    /// Some segment did not match or the path went deeper than allowed.
    Unresolved,
}

impl PathResolution {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Resolved(id) => Some(*id),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Category containers created under one parent, keyed by kind.
pub type Containers = IndexMap<ObjectKind, NodeId>;

/// Populates a [`NavTree`] from an [`ObjectLister`].
///
/// The hierarchy is fixed: database, category container, table, table
/// container. Nothing below that is ever listed.
pub struct TreeBuilder<'a> {
    config: &'a NavConfig,
    lister: &'a dyn ObjectLister,
    presentation: &'a dyn Presentation,
    pos: u64,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        config: &'a NavConfig,
        lister: &'a dyn ObjectLister,
        presentation: &'a dyn Presentation,
    ) -> Self {
        Self {
            config,
            lister,
            presentation,
            pos: 0,
        }
    }

    /// Offset into the database list.
    pub fn with_pos(mut self, pos: u64) -> Self {
        self.pos = pos;
        self
    }

    /// An empty tree whose root carries the database grouping settings.
    pub fn new_tree(&self) -> NavTree {
        let mut tree = NavTree::new();
        let root = tree.root();
        let (separator, depth) = self.config.root_grouping();
        let node = tree.node_mut(root);
        node.separator = separator.to_string();
        node.separator_depth = depth;
        tree
    }

    /// Builds every database with all of its category containers populated.
    pub fn build_full(&self, tree: &mut NavTree) -> Result<(), NavError> {
        let databases = self.add_databases(tree)?;

        for db in databases {
            let db_name = tree.node(db).real_name.clone();
            let containers = self.add_db_containers(tree, db)?;
            for (kind, container) in containers {
                self.populate(tree, container, kind, &db_name, None)?;
            }
        }

        Ok(())
    }

    /// Builds only what is needed to reach the node named by `actual_path`.
    ///
    /// The first segment must be the root. A path of at most one segment
    /// resolves to the root itself. Any segment that does not match, or a
    /// path reaching below a non-table category, yields
    /// [`PathResolution::Unresolved`].
    pub fn build_path(
        &self,
        tree: &mut NavTree,
        actual_path: &[String],
    ) -> Result<PathResolution, NavError> {
        self.add_databases(tree)?;

        let root = tree.root();
        let mut segments = actual_path.iter().map(String::as_str);

        match segments.next() {
            None => return Ok(PathResolution::Resolved(root)),
            Some(ROOT_NAME) => {}
            Some(other) => {
                log::debug!("Path does not start at the root: {:?}", other);
                return Ok(PathResolution::Unresolved);
            }
        }

        let Some(db_name) = segments.next() else {
            return Ok(PathResolution::Resolved(root));
        };
        let Some(db) = tree.child_by_real_name(root, db_name) else {
            log::debug!("Unknown database in path: {:?}", db_name);
            return Ok(PathResolution::Unresolved);
        };
        let db_name = tree.node(db).real_name.clone();
        let containers = self.add_db_containers(tree, db)?;

        let Some(container_name) = segments.next() else {
            return Ok(PathResolution::Resolved(db));
        };
        let Some((kind, container)) = find_container(&containers, container_name) else {
            log::debug!("No {:?} container under {:?}", container_name, db_name);
            return Ok(PathResolution::Unresolved);
        };
        self.populate(tree, container, kind, &db_name, None)?;

        let Some(table_name) = segments.next() else {
            return Ok(PathResolution::Resolved(container));
        };
        if kind != ObjectKind::Tables {
            log::debug!("Only tables expand below their category, got {:?}", kind);
            return Ok(PathResolution::Unresolved);
        }
        let Some(table) = tree.child_by_real_name(container, table_name) else {
            log::debug!("Unknown table in path: {:?}", table_name);
            return Ok(PathResolution::Unresolved);
        };
        let table_name = tree.node(table).real_name.clone();
        let containers = self.add_table_containers(tree, &db_name, table)?;

        let Some(container_name) = segments.next() else {
            return Ok(PathResolution::Resolved(table));
        };
        let Some((kind, container)) = find_container(&containers, container_name) else {
            log::debug!("No {:?} container under {:?}", container_name, table_name);
            return Ok(PathResolution::Unresolved);
        };
        self.populate(tree, container, kind, &db_name, Some(&table_name))?;

        if segments.next().is_some() {
            return Ok(PathResolution::Unresolved);
        }

        Ok(PathResolution::Resolved(container))
    }

    fn add_databases(&self, tree: &mut NavTree) -> Result<Vec<NodeId>, NavError> {
        let root = tree.root();
        let names = self
            .lister
            .list(ObjectKind::Databases, None, None, Some(self.pos))?;

        Ok(names
            .into_iter()
            .map(|name| self.add_object(tree, root, name, ObjectKind::Databases))
            .collect())
    }

    /// Attaches the category containers that have content under `db`.
    pub fn add_db_containers(
        &self,
        tree: &mut NavTree,
        db: NodeId,
    ) -> Result<Containers, NavError> {
        let db_name = tree.node(db).real_name.clone();
        let mut containers = Containers::new();

        for kind in DB_CONTAINERS {
            if self.lister.exists(kind, Some(&db_name), None)? {
                let container = self.add_container(tree, db, kind);
                containers.insert(kind, container);
            }
        }

        Ok(containers)
    }

    /// Attaches the column/index containers that have content under `table`.
    pub fn add_table_containers(
        &self,
        tree: &mut NavTree,
        db_name: &str,
        table: NodeId,
    ) -> Result<Containers, NavError> {
        let table_name = tree.node(table).real_name.clone();
        let mut containers = Containers::new();

        for kind in TABLE_CONTAINERS {
            if self.lister.exists(kind, Some(db_name), Some(&table_name))? {
                let container = self.add_container(tree, table, kind);
                if kind == ObjectKind::Indexes {
                    self.add_new_index_action(tree, container);
                }
                containers.insert(kind, container);
            }
        }

        Ok(containers)
    }

    fn populate(
        &self,
        tree: &mut NavTree,
        container: NodeId,
        kind: ObjectKind,
        db_name: &str,
        table_name: Option<&str>,
    ) -> Result<(), NavError> {
        for name in self.lister.list(kind, Some(db_name), table_name, None)? {
            self.add_object(tree, container, name, kind);
        }
        Ok(())
    }

    fn add_object(
        &self,
        tree: &mut NavTree,
        parent: NodeId,
        name: String,
        kind: ObjectKind,
    ) -> NodeId {
        let descriptor = self.presentation.descriptor(kind);
        tree.add_child(
            parent,
            Node::object(name)
                .with_icon(descriptor.item_icon)
                .with_links(descriptor.item_links),
        )
    }

    fn add_container(&self, tree: &mut NavTree, parent: NodeId, kind: ObjectKind) -> NodeId {
        let descriptor = self.presentation.descriptor(kind);
        let mut node = Node::container(descriptor.label)
            .with_real_name(kind.as_str())
            .with_icon(descriptor.container_icon)
            .with_links(descriptor.container_links);

        if kind == ObjectKind::Tables {
            node = node.with_separator(&self.config.table_separator, self.config.table_level);
        }

        tree.add_child(parent, node)
    }

    fn add_new_index_action(&self, tree: &mut NavTree, container: NodeId) -> NodeId {
        let mut node = Node::object(self.presentation.text(UiText::NewIndex))
            .with_icon(self.presentation.icon(UiIcon::NewIndex))
            .with_links(self.presentation.new_index_links());
        node.classes = "new_index italics".to_string();
        tree.add_child(container, node)
    }
}

fn find_container(containers: &Containers, name: &str) -> Option<(ObjectKind, NodeId)> {
    let kind: ObjectKind = name.parse().ok()?;
    containers.get(&kind).map(|&id| (kind, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::DefaultPresentation;
    use std::collections::HashMap;

    /// Minimal in-memory lister keyed by (kind, database, table).
    #[derive(Default)]
    struct MapLister {
        entries: HashMap<(ObjectKind, Option<String>, Option<String>), Vec<String>>,
    }

    impl MapLister {
        fn with(
            mut self,
            kind: ObjectKind,
            database: Option<&str>,
            table: Option<&str>,
            names: &[&str],
        ) -> Self {
            self.entries.insert(
                (kind, database.map(String::from), table.map(String::from)),
                names.iter().map(|s| s.to_string()).collect(),
            );
            self
        }
    }

    impl ObjectLister for MapLister {
        fn list(
            &self,
            kind: ObjectKind,
            database: Option<&str>,
            table: Option<&str>,
            _pos: Option<u64>,
        ) -> Result<Vec<String>, NavError> {
            Ok(self
                .entries
                .get(&(kind, database.map(String::from), table.map(String::from)))
                .cloned()
                .unwrap_or_default())
        }
    }

    fn shop() -> MapLister {
        MapLister::default()
            .with(ObjectKind::Databases, None, None, &["shop", "empty"])
            .with(
                ObjectKind::Tables,
                Some("shop"),
                None,
                &["user_profile", "user_login", "order"],
            )
            .with(ObjectKind::Views, Some("shop"), None, &["order_totals"])
            .with(
                ObjectKind::Columns,
                Some("shop"),
                Some("user_profile"),
                &["id", "bio"],
            )
    }

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn names(tree: &NavTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .iter()
            .map(|&child| tree.node(child).real_name.clone())
            .collect()
    }

    #[test]
    fn test_build_full() {
        let config = NavConfig::default();
        let lister = shop();
        let presentation = DefaultPresentation::default();
        let builder = TreeBuilder::new(&config, &lister, &presentation);
        let mut tree = builder.new_tree();

        builder.build_full(&mut tree).unwrap();

        let root = tree.root();
        assert_eq!(names(&tree, root), vec!["shop", "empty"]);

        let shop = tree.child_by_name(root, "shop").unwrap();
        assert_eq!(names(&tree, shop), vec!["tables", "views"]);

        let tables = tree.child_by_real_name(shop, "tables").unwrap();
        assert_eq!(tree.node(tables).name, "Tables");
        assert_eq!(tree.node(tables).separator, "_");
        assert_eq!(
            names(&tree, tables),
            vec!["user_profile", "user_login", "order"]
        );

        let empty = tree.child_by_name(root, "empty").unwrap();
        assert_eq!(tree.num_children(empty), 0);
    }

    #[test]
    fn test_root_carries_db_grouping() {
        let config = NavConfig::default();
        let lister = shop();
        let presentation = DefaultPresentation::default();
        let tree = TreeBuilder::new(&config, &lister, &presentation).new_tree();
        let root = tree.node(tree.root());

        assert_eq!(root.separator, "_");
        assert_eq!(root.separator_depth, crate::config::ROOT_SEPARATOR_DEPTH);
    }

    #[test]
    fn test_build_path_levels() {
        let config = NavConfig::default();
        let lister = shop();
        let presentation = DefaultPresentation::default();
        let builder = TreeBuilder::new(&config, &lister, &presentation);

        let cases: &[(&[&str], Option<&str>)] = &[
            (&[], Some("root")),
            (&["root"], Some("root")),
            (&["root", "shop"], Some("shop")),
            (&["root", "shop", "tables"], Some("tables")),
            (&["root", "shop", "tables", "user_profile"], Some("user_profile")),
            (
                &["root", "shop", "tables", "user_profile", "columns"],
                Some("columns"),
            ),
            (&["nope", "shop"], None),
            (&["root", "nope"], None),
            (&["root", "shop", "nope"], None),
            (&["root", "shop", "functions"], None),
            (&["root", "shop", "views", "order_totals"], None),
            (&["root", "shop", "tables", "nope"], None),
            (&["root", "shop", "tables", "user_profile", "bogus"], None),
            (&["root", "shop", "tables", "user_profile", "indexes"], None),
            (
                &["root", "shop", "tables", "user_profile", "columns", "id"],
                None,
            ),
        ];

        for (segments, expected) in cases {
            let mut tree = builder.new_tree();
            let resolution = builder.build_path(&mut tree, &path(segments)).unwrap();
            let resolved = resolution
                .node()
                .map(|id| tree.node(id).real_name.clone());
            assert_eq!(
                resolved.as_deref(),
                *expected,
                "unexpected resolution for {:?}",
                segments
            );
        }
    }

    #[test]
    fn test_build_path_populates_only_the_chain() {
        let config = NavConfig::default();
        let lister = shop();
        let presentation = DefaultPresentation::default();
        let builder = TreeBuilder::new(&config, &lister, &presentation);
        let mut tree = builder.new_tree();

        let resolution = builder
            .build_path(&mut tree, &path(&["root", "shop", "tables", "user_profile"]))
            .unwrap();
        let table = resolution.node().unwrap();

        let root = tree.root();
        let shop = tree.child_by_name(root, "shop").unwrap();
        let views = tree.child_by_real_name(shop, "views").unwrap();
        assert_eq!(tree.num_children(views), 0);

        let empty = tree.child_by_name(root, "empty").unwrap();
        assert_eq!(tree.num_children(empty), 0);

        assert_eq!(names(&tree, table), vec!["columns"]);
        let columns = tree.child_by_real_name(table, "columns").unwrap();
        assert_eq!(tree.num_children(columns), 0);
    }

    #[test]
    fn test_indexes_container_gets_new_action() {
        let config = NavConfig::default();
        let lister = shop().with(
            ObjectKind::Indexes,
            Some("shop"),
            Some("order"),
            &["PRIMARY"],
        );
        let presentation = DefaultPresentation::default();
        let builder = TreeBuilder::new(&config, &lister, &presentation);
        let mut tree = builder.new_tree();

        let resolution = builder
            .build_path(&mut tree, &path(&["root", "shop", "tables", "order", "indexes"]))
            .unwrap();
        let indexes = resolution.node().unwrap();

        assert_eq!(names(&tree, indexes), vec!["New", "PRIMARY"]);
        let action = tree.children(indexes)[0];
        assert_eq!(tree.node(action).classes, "new_index italics");
    }
}
