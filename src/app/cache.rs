use crate::analysis::CompanySnapshot;
use std::collections::HashMap;
use std::sync::Arc;

/// Session memo of fetched snapshots keyed by ticker. Entries never expire.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: HashMap<String, Arc<CompanySnapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(ticker: &str) -> String {
        ticker.trim().to_uppercase()
    }

    pub fn get(&self, ticker: &str) -> Option<Arc<CompanySnapshot>> {
        self.entries.get(&Self::key(ticker)).cloned()
    }

    pub fn insert(&mut self, ticker: &str, snapshot: CompanySnapshot) -> Arc<CompanySnapshot> {
        let snapshot = Arc::new(snapshot);
        self.entries.insert(Self::key(ticker), Arc::clone(&snapshot));
        snapshot
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.contains_key(&Self::key(ticker))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
