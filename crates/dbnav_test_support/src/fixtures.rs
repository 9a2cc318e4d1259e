use crate::FakeLister;
use dbnav_core::{CatalogLister, NavRequest, ObjectKind, encode_path};

/// `shop` with grouped and ungrouped tables, a view and an empty `archive`.
pub fn shop_lister() -> FakeLister {
    FakeLister::new()
        .with_databases(&["shop", "archive"])
        .with_objects(
            ObjectKind::Tables,
            "shop",
            &["user_profile", "user_login", "order"],
        )
        .with_objects(ObjectKind::Views, "shop", &["order_totals"])
        .with_table_objects(ObjectKind::Columns, "shop", "user_profile", &["id", "bio"])
        .with_table_objects(ObjectKind::Indexes, "shop", "user_profile", &["PRIMARY"])
}

/// The same data as [`shop_lister`], as a catalog document.
pub const SHOP_CATALOG_JSON: &str = r#"{
    "databases": {
        "shop": {
            "tables": {
                "user_profile": { "columns": ["id", "bio"], "indexes": ["PRIMARY"] },
                "user_login": {},
                "order": {}
            },
            "views": ["order_totals"]
        },
        "archive": {}
    }
}"#;

pub fn shop_catalog() -> CatalogLister {
    match CatalogLister::from_json(SHOP_CATALOG_JSON) {
        Ok(lister) => lister,
        Err(err) => panic!("fixture catalog is invalid: {err}"),
    }
}

pub fn path(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|segment| segment.to_string()).collect()
}

/// Request whose active node is named by plain (unencoded) segments.
pub fn request_for(actual: &[&str], virtual_path: &[&str]) -> NavRequest {
    NavRequest::new(0).with_paths(encode_path(actual), encode_path(virtual_path))
}
