use std::collections::BTreeMap;

use crate::database::Database;

/// Registry of databases keyed by name.
///
/// The host owns the store and hands it to the request layer; the store
/// itself does no locking.
#[derive(Debug, Default)]
pub struct Store {
    databases: BTreeMap<String, Database>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty database. Returns `None` if the name is taken.
    pub fn create_database(&mut self, name: &str) -> Option<&Database> {
        if self.databases.contains_key(name) {
            return None;
        }
        tracing::debug!("Created database '{}'", name);
        Some(
            self.databases
                .entry(name.to_string())
                .or_insert_with(|| Database::new(name)),
        )
    }

    pub fn remove_database(&mut self, name: &str) -> Option<Database> {
        let removed = self.databases.remove(name);
        if removed.is_some() {
            tracing::debug!("Removed database '{}'", name);
        }
        removed
    }

    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.get(name)
    }

    pub fn database_mut(&mut self, name: &str) -> Option<&mut Database> {
        self.databases.get_mut(name)
    }

    /// Database names in ascending order.
    pub fn database_names(&self) -> impl Iterator<Item = &str> {
        self.databases.keys().map(String::as_str)
    }
}
