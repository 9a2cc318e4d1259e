use crate::config::NavConfig;
use crate::node::{NavTree, NodeId};
use crate::object_kind::ObjectKind;
use crate::path::encode_path;
use crate::presentation::{Presentation, UiIcon, UiText};
use crate::sort::SortMode;

/// How far below a node [`Renderer::render_node`] descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recursion {
    /// The node alone.
    Single,
    /// The node plus this many levels of descendants.
    Depth(u32),
    /// The whole subtree.
    Full,
}

impl Recursion {
    /// Recursion for the children, or `None` when they are not rendered.
    fn descend(self) -> Option<Recursion> {
        match self {
            Self::Single | Self::Depth(0) => None,
            Self::Depth(n) => Some(Self::Depth(n - 1)),
            Self::Full => Some(Self::Full),
        }
    }
}

const INDENT: &str = "  ";
const CHILD_INDENT: &str = "    ";

/// Turns (parts of) a [`NavTree`] into nested `<ul>`/`<li>` markup.
pub struct Renderer<'a> {
    config: &'a NavConfig,
    presentation: &'a dyn Presentation,
    is_ajax_request: bool,
    sort: SortMode,
}

impl<'a> Renderer<'a> {
    pub fn new(
        config: &'a NavConfig,
        presentation: &'a dyn Presentation,
        is_ajax_request: bool,
    ) -> Self {
        Self {
            config,
            presentation,
            is_ajax_request,
            sort: SortMode::from_natural_order(config.natural_order),
        }
    }

    /// `<ul>` holding every child of `id`, fully expanded.
    pub fn render_list(&self, tree: &NavTree, id: NodeId) -> String {
        let mut out = String::from("<ul>\n");
        for child in tree.sorted_children(id, self.sort) {
            out.push_str(&self.render_node(tree, child, Recursion::Full, INDENT));
        }
        out.push_str("</ul>\n");
        out
    }

    /// Initially hidden `<ul>` with the children of `id`, for incremental loads.
    pub fn render_branch(&self, tree: &NavTree, id: NodeId) -> String {
        let mut out = String::from("<ul style='display: none;'>\n");
        if self.wants_fast_filter(tree, id) {
            out.push_str(&self.fast_filter_html());
        }
        for child in tree.sorted_children(id, self.sort) {
            out.push_str(&self.render_node(tree, child, Recursion::Full, INDENT));
        }
        out.push_str("</ul>\n");
        out
    }

    /// Renders one `<li>`, and its descendants as far as `recursion` allows.
    ///
    /// Empty containers are pruned unless the output is for an incremental
    /// load or light mode, where emptiness only means "not fetched yet".
    pub fn render_node(
        &self,
        tree: &NavTree,
        id: NodeId,
        recursion: Recursion,
        indent: &str,
    ) -> String {
        let node = tree.node(id);
        if node.is_container()
            && tree.num_children(id) == 0
            && !self.is_ajax_request
            && !self.config.light_mode
        {
            return String::new();
        }

        let mut out = String::new();
        out.push_str(indent);
        if node.classes.is_empty() {
            out.push_str("<li class='nowrap'>");
        } else {
            out.push_str(&format!("<li class='nowrap {}'>", node.classes));
        }

        if self.is_expandable(tree, id) {
            out.push_str(&self.expander_html(tree, id));
        } else {
            out.push_str(&self.presentation.icon(UiIcon::Spacer));
        }
        out.push_str(&format!(
            "<span class='throbber' style='display:none;'>{}</span>",
            self.presentation.icon(UiIcon::Throbber)
        ));

        if node.is_container() {
            out.push_str("<i>");
        }
        if self.config.icons_enabled {
            match &node.links.icon {
                Some(template) => out.push_str(&format!(
                    "<a href='{}'>{}</a>",
                    fill_template(tree, id, template),
                    node.icon
                )),
                None => out.push_str(&node.icon),
            }
        }
        match &node.links.text {
            Some(template) => out.push_str(&format!(
                "<a href='{}'>{}</a>",
                fill_template(tree, id, template),
                escape_html(&node.real_name)
            )),
            // Display names come pre-sanitized from the listing layer.
            None => out.push_str(&node.name),
        }
        if node.is_container() {
            out.push_str("</i>");
        }

        if let Some(child_recursion) = recursion.descend() {
            let child_indent = format!("{}{}", indent, CHILD_INDENT);
            let buffer: String = tree
                .sorted_children(id, self.sort)
                .into_iter()
                .map(|child| self.render_node(tree, child, child_recursion, &child_indent))
                .collect();

            if !buffer.is_empty() {
                let hide = if node.visible {
                    ""
                } else {
                    " style='display: none;'"
                };
                out.push_str(&format!("\n{}  <ul{}>\n", indent, hide));
                if !self.config.light_mode && self.wants_fast_filter(tree, id) {
                    out.push_str(&self.fast_filter_html());
                }
                out.push_str(&buffer);
                out.push_str(&format!("{}  </ul>\n{}", indent, indent));
            }
        }

        out.push_str("</li>\n");
        out
    }

    /// Whether `id` gets a clickable expander instead of a spacer.
    pub fn is_expandable(&self, tree: &NavTree, id: NodeId) -> bool {
        let may_have_children =
            self.is_ajax_request || tree.has_children(id, false) || self.config.light_mode;

        may_have_children && !has_sterile_parent(tree, id)
    }

    fn expander_html(&self, tree: &NavTree, id: NodeId) -> String {
        let node = tree.node(id);
        let link = format!(
            "{}&amp;a_path={}&amp;v_path={}&amp;{}",
            self.presentation.navigation_url(),
            encode_path(&tree.actual_path(id)),
            encode_path(&tree.virtual_path(id)),
            self.presentation.profiling_token()
        );

        let mut classes = String::from("expander");
        if self.config.ajax_enabled {
            classes.push_str(" ajax");
        }
        if node.is_group || !self.config.light_mode {
            classes.push_str(" loaded");
        }
        if node.is_container() {
            classes.push_str(" container");
        }

        format!(
            "<a class='{}' target='_self' href='{}'>{}</a>",
            classes,
            link,
            self.presentation.icon(UiIcon::Expander)
        )
    }

    /// Tables/views containers with at least the configured number of children.
    fn wants_fast_filter(&self, tree: &NavTree, id: NodeId) -> bool {
        let node = tree.node(id);
        node.is_container()
            && !node.is_group
            && node
                .real_name
                .parse::<ObjectKind>()
                .is_ok_and(|kind| kind.is_filterable())
            && tree.num_children(id) >= self.config.table_filter_minimum
    }

    pub fn fast_filter_html(&self) -> String {
        format!(
            "<li class='fast_filter'><input value='{}' /><span title='{}'>X</span></li>",
            escape_html(&self.presentation.text(UiText::FilterPlaceholder)),
            escape_html(&self.presentation.text(UiText::ClearFilter))
        )
    }
}

/// Children of sterile category containers never expand on their own.
fn has_sterile_parent(tree: &NavTree, id: NodeId) -> bool {
    let Some(parent) = tree.parent(id) else {
        return false;
    };
    let parent = tree.node(parent);

    parent.is_container()
        && !parent.is_group
        && parent
            .real_name
            .parse::<ObjectKind>()
            .is_ok_and(|kind| kind.is_sterile())
}

/// Substitutes `{1}`, `{2}`, ... with the percent-encoded real names of the
/// object ancestors of `id` (itself included), outermost first. Placeholders
/// without a matching ancestor become empty.
pub fn fill_template(tree: &NavTree, id: NodeId, template: &str) -> String {
    let mut args: Vec<String> = tree
        .parents(id, true, false, false)
        .into_iter()
        .map(|node| urlencoding::encode(&tree.node(node).real_name).into_owned())
        .collect();
    args.reverse();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();

        match after[digits..].strip_prefix('}') {
            Some(tail) if digits > 0 => {
                let index: usize = after[..digits].parse().unwrap_or(0);
                if let Some(arg) = index.checked_sub(1).and_then(|i| args.get(i)) {
                    out.push_str(arg);
                }
                rest = tail;
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
