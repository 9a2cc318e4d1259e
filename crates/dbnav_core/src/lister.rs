use crate::{NavError, ObjectKind};

/// Source of object names for the navigation tree.
///
/// Scopes are expressed as a kind plus the names of the enclosing database
/// and table where relevant. Calls are issued sequentially; later queries
/// depend on names returned by earlier ones.
pub trait ObjectLister {
    /// Ordered names of objects of `kind` in the given scope.
    ///
    /// `pos` is the pagination offset and is only meaningful for
    /// `ObjectKind::Databases`.
    fn list(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
        pos: Option<u64>,
    ) -> Result<Vec<String>, NavError>;

    /// Whether at least one object of `kind` exists in the scope.
    ///
    /// The default implementation lists the scope and checks for emptiness.
    fn exists(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
    ) -> Result<bool, NavError> {
        Ok(!self.list(kind, database, table, None)?.is_empty())
    }
}

impl<T: ObjectLister + ?Sized> ObjectLister for &T {
    fn list(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
        pos: Option<u64>,
    ) -> Result<Vec<String>, NavError> {
        (**self).list(kind, database, table, pos)
    }

    fn exists(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
    ) -> Result<bool, NavError> {
        (**self).exists(kind, database, table)
    }
}
