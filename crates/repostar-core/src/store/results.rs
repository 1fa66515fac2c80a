use crate::models::RepositoryRecord;

/// Records from the most recent successful search, in server order
#[derive(Debug, Default, Clone)]
pub struct SearchResults {
    records: Vec<RepositoryRecord>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throw away whatever was there and keep `records` as-is
    pub fn replace(&mut self, records: Vec<RepositoryRecord>) {
        self.records = records;
    }

    pub fn list(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&RepositoryRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
