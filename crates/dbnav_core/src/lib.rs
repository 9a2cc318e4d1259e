mod builder;
mod catalog;
mod config;
mod error;
mod grouper;
mod lister;
mod navigation;
mod node;
mod object_kind;
mod path;
mod presentation;
mod render;
mod sort;
mod visibility;

pub use builder::{Containers, PathResolution, TreeBuilder};
pub use catalog::{Catalog, CatalogLister, DatabaseCatalog, TableCatalog};
pub use config::{NavConfig, NavConfigStore, ROOT_SEPARATOR_DEPTH};
pub use error::NavError;
pub use grouper::{Grouper, group_prefix};
pub use lister::ObjectLister;
pub use navigation::{NavRequest, NavigationTree};
pub use node::{NavTree, Node, NodeId, NodeType, ROOT_NAME};
pub use object_kind::{
    DB_CONTAINERS, KindDescriptor, Links, ObjectKind, ParseObjectKindError, TABLE_CONTAINERS,
};
pub use path::{
    ActivePath, SEGMENT_DELIMITER, decode_path, decode_segment, encode_path, encode_segment,
};
pub use presentation::{DefaultPresentation, Presentation, UiIcon, UiText};
pub use render::{Recursion, Renderer, escape_html, fill_template};
pub use sort::{SortMode, natural_cmp};
