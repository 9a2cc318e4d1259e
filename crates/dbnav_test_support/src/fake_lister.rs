use dbnav_core::{NavError, ObjectKind, ObjectLister};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Scope = (ObjectKind, Option<String>, Option<String>);

/// One `list` call as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCall {
    pub kind: ObjectKind,
    pub database: Option<String>,
    pub table: Option<String>,
    pub pos: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeListerStats {
    pub list_calls: Vec<ListCall>,
    pub exists_calls: usize,
}

impl FakeListerStats {
    pub fn calls_for(&self, kind: ObjectKind) -> Vec<&ListCall> {
        self.list_calls
            .iter()
            .filter(|call| call.kind == kind)
            .collect()
    }
}

#[derive(Default)]
struct FakeListerState {
    objects: RwLock<HashMap<Scope, Vec<String>>>,
    errors: RwLock<HashMap<ObjectKind, String>>,
    list_calls: Mutex<Vec<ListCall>>,
    exists_calls: AtomicUsize,
}

/// Scriptable [`ObjectLister`] recording every call it receives.
///
/// Scopes that were never configured list as empty.
#[derive(Clone, Default)]
pub struct FakeLister {
    state: Arc<FakeListerState>,
}

impl FakeLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_databases(self, names: &[&str]) -> Self {
        self.set(ObjectKind::Databases, None, None, names);
        self
    }

    /// Objects of a database-level kind (tables, views, ...).
    pub fn with_objects(self, kind: ObjectKind, database: &str, names: &[&str]) -> Self {
        self.set(kind, Some(database), None, names);
        self
    }

    /// Columns or indexes of one table.
    pub fn with_table_objects(
        self,
        kind: ObjectKind,
        database: &str,
        table: &str,
        names: &[&str],
    ) -> Self {
        self.set(kind, Some(database), Some(table), names);
        self
    }

    /// Every listing of `kind` fails with `message`.
    pub fn with_error(self, kind: ObjectKind, message: impl Into<String>) -> Self {
        rwlock_write(&self.state.errors).insert(kind, message.into());
        self
    }

    pub fn stats(&self) -> FakeListerStats {
        FakeListerStats {
            list_calls: mutex_lock(&self.state.list_calls).clone(),
            exists_calls: self.state.exists_calls.load(Ordering::Relaxed),
        }
    }

    fn set(&self, kind: ObjectKind, database: Option<&str>, table: Option<&str>, names: &[&str]) {
        rwlock_write(&self.state.objects).insert(
            scope(kind, database, table),
            names.iter().map(|name| name.to_string()).collect(),
        );
    }

    fn lookup(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
    ) -> Result<Vec<String>, NavError> {
        if let Some(message) = rwlock_read(&self.state.errors).get(&kind) {
            return Err(NavError::listing_failed(message.clone()));
        }

        Ok(rwlock_read(&self.state.objects)
            .get(&scope(kind, database, table))
            .cloned()
            .unwrap_or_default())
    }
}

impl ObjectLister for FakeLister {
    fn list(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
        pos: Option<u64>,
    ) -> Result<Vec<String>, NavError> {
        mutex_lock(&self.state.list_calls).push(ListCall {
            kind,
            database: database.map(str::to_string),
            table: table.map(str::to_string),
            pos,
        });

        self.lookup(kind, database, table)
    }

    fn exists(
        &self,
        kind: ObjectKind,
        database: Option<&str>,
        table: Option<&str>,
    ) -> Result<bool, NavError> {
        self.state.exists_calls.fetch_add(1, Ordering::Relaxed);
        Ok(!self.lookup(kind, database, table)?.is_empty())
    }
}

fn scope(kind: ObjectKind, database: Option<&str>, table: Option<&str>) -> Scope {
    (kind, database.map(str::to_string), table.map(str::to_string))
}

fn rwlock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

fn rwlock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

fn mutex_lock<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}
