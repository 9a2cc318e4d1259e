use crate::lister::ObjectLister;
use crate::{NavError, ObjectKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Static description of a server's objects, in listing order.
///
/// ```json
/// { "databases": { "shop": { "tables": { "users": { "columns": ["id"] } },
///                            "views": ["active_users"] } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub databases: IndexMap<String, DatabaseCatalog>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseCatalog {
    pub tables: IndexMap<String, TableCatalog>,
    pub views: Vec<String>,
    pub functions: Vec<String>,
    pub procedures: Vec<String>,
    pub triggers: Vec<String>,
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableCatalog {
    pub columns: Vec<String>,
    pub indexes: Vec<String>,
}

/// [`ObjectLister`] over a [`Catalog`], with optional database paging.
#[derive(Debug, Clone, Default)]
pub struct CatalogLister {
    catalog: Catalog,
    page_size: Option<usize>,
}

impl CatalogLister {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            page_size: None,
        }
    }

    /// Limits how many databases one listing returns.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, NavError> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| NavError::InvalidCatalog(e.to_string()))?;
        Ok(Self::new(catalog))
    }

    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = fs::read_to_string(path).map_err(NavError::IoError)?;
        Self::from_json(&content)
    }

    fn databases(&self, pos: u64) -> Vec<String> {
        let skip = usize::try_from(pos).unwrap_or(usize::MAX);
        let take = self.page_size.unwrap_or(usize::MAX);

        self.catalog
            .databases
            .keys()
            .skip(skip)
            .take(take)
            .cloned()
            .collect()
    }
}

impl ObjectLister for CatalogLister {
    fn list(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
        pos: Option<u64>,
    ) -> Result<Vec<String>, NavError> {
        let db = database.and_then(|name| self.catalog.databases.get(name));
        let tbl = db.zip(table).and_then(|(db, name)| db.tables.get(name));

        let names = match (kind, db, tbl) {
            (ObjectKind::Databases, _, _) => self.databases(pos.unwrap_or(0)),
            (ObjectKind::Tables, Some(db), _) => db.tables.keys().cloned().collect(),
            (ObjectKind::Views, Some(db), _) => db.views.clone(),
            (ObjectKind::Functions, Some(db), _) => db.functions.clone(),
            (ObjectKind::Procedures, Some(db), _) => db.procedures.clone(),
            (ObjectKind::Triggers, Some(db), _) => db.triggers.clone(),
            (ObjectKind::Events, Some(db), _) => db.events.clone(),
            (ObjectKind::Columns, _, Some(tbl)) => tbl.columns.clone(),
            (ObjectKind::Indexes, _, Some(tbl)) => tbl.indexes.clone(),
            _ => Vec::new(),
        };

        Ok(names)
    }
}
