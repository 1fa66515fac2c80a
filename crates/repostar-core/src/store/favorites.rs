use std::collections::HashSet;

use tracing::debug;

use crate::models::{RepoId, RepositoryRecord};

/// User-curated favorites, unique by id, in the order they were added
///
/// The id index lives next to the list so rendering can ask
/// `contains` for every row without scanning.
#[derive(Debug, Default, Clone)]
pub struct Favorites {
    entries: Vec<RepositoryRecord>,
    index: HashSet<RepoId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the record unless its id is already present.
    /// Returns true when something was added.
    pub fn add(&mut self, record: RepositoryRecord) -> bool {
        if !self.index.insert(record.id) {
            return false;
        }
        debug!("favorited {} ({})", record.name, record.id);
        self.entries.push(record);
        true
    }

    /// Drop the entry with this id. Returns true when something was removed.
    pub fn remove(&mut self, id: RepoId) -> bool {
        if !self.index.remove(&id) {
            return false;
        }
        self.entries.retain(|r| r.id != id);
        debug!("unfavorited {}", id);
        true
    }

    /// Add when absent, remove when present. Returns the new membership.
    pub fn toggle(&mut self, record: &RepositoryRecord) -> bool {
        if self.contains(record.id) {
            self.remove(record.id);
            false
        } else {
            self.add(record.clone());
            true
        }
    }

    pub fn contains(&self, id: RepoId) -> bool {
        self.index.contains(&id)
    }

    pub fn list(&self) -> &[RepositoryRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
