use crate::builder::{PathResolution, TreeBuilder};
use crate::config::NavConfig;
use crate::grouper::Grouper;
use crate::lister::ObjectLister;
use crate::node::{NavTree, NodeId};
use crate::path::ActivePath;
use crate::presentation::Presentation;
use crate::render::Renderer;
use crate::NavError;

/// Per-request inputs of the navigation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavRequest {
    /// Encoded actual path of the active node.
    pub a_path: Option<String>,

    /// Encoded virtual path of the active node.
    pub v_path: Option<String>,

    /// Offset into the database list.
    pub pos: u64,

    /// The response is an incremental fragment fetched by the client.
    pub is_ajax: bool,
}

impl NavRequest {
    pub fn new(pos: u64) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    pub fn with_paths(mut self, a_path: impl Into<String>, v_path: impl Into<String>) -> Self {
        self.a_path = Some(a_path.into());
        self.v_path = Some(v_path.into());
        self
    }

    pub fn ajax(mut self) -> Self {
        self.is_ajax = true;
        self
    }
}

/// One request's navigation tree.
///
/// Every render call rebuilds the tree from the lister; nothing is kept
/// between requests.
pub struct NavigationTree<'a> {
    config: &'a NavConfig,
    lister: &'a dyn ObjectLister,
    presentation: &'a dyn Presentation,
    path: ActivePath,
    pos: u64,
    is_ajax_request: bool,
    tree: NavTree,
}

impl<'a> NavigationTree<'a> {
    pub fn new(
        config: &'a NavConfig,
        request: &NavRequest,
        lister: &'a dyn ObjectLister,
        presentation: &'a dyn Presentation,
    ) -> Self {
        Self {
            config,
            lister,
            presentation,
            path: ActivePath::decode(request.a_path.as_deref(), request.v_path.as_deref()),
            pos: request.pos,
            is_ajax_request: request.is_ajax,
            tree: NavTree::new(),
        }
    }

    pub fn active_path(&self) -> &ActivePath {
        &self.path
    }

    /// The tree produced by the last render call.
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Whole tree, used when light mode is off.
    pub fn render_tree(&mut self) -> Result<String, NavError> {
        let builder = self.builder();
        self.tree = builder.new_tree();
        builder.build_full(&mut self.tree)?;

        self.group();
        self.tree.mark_visible(&self.path.virtual_path);

        Ok(self.renderer().render_list(&self.tree, self.tree.root()))
    }

    /// Whole tree built along the active path, for clients that cannot fetch
    /// branches incrementally. `None` when the path does not resolve.
    pub fn render_state(&mut self) -> Result<Option<String>, NavError> {
        if self.resolve()?.is_none() {
            return Ok(None);
        }

        self.group();
        self.tree.mark_visible(&self.path.virtual_path);

        Ok(Some(self.renderer().render_list(&self.tree, self.tree.root())))
    }

    /// Children of the active node only, as a hidden list for incremental
    /// loads. `None` when the path does not resolve.
    pub fn render_path(&mut self) -> Result<Option<String>, NavError> {
        let Some(node) = self.resolve()? else {
            return Ok(None);
        };

        self.group();

        Ok(Some(self.renderer().render_branch(&self.tree, node)))
    }

    /// Rebuilds the tree along the actual path and returns the active node.
    pub fn resolve(&mut self) -> Result<Option<NodeId>, NavError> {
        let builder = self.builder();
        self.tree = builder.new_tree();

        let resolution = builder.build_path(&mut self.tree, &self.path.actual)?;
        if resolution == PathResolution::Unresolved {
            log::debug!("Active path did not resolve: {:?}", self.path.actual);
        }

        Ok(resolution.node())
    }

    fn group(&mut self) {
        let root = self.tree.root();
        Grouper::new(self.presentation, self.config.icons_enabled).group_tree(&mut self.tree, root);
    }

    fn builder(&self) -> TreeBuilder<'a> {
        TreeBuilder::new(self.config, self.lister, self.presentation).with_pos(self.pos)
    }

    fn renderer(&self) -> Renderer<'a> {
        Renderer::new(self.config, self.presentation, self.is_ajax_request)
    }
}
