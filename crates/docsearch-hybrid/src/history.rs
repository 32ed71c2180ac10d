use std::collections::VecDeque;

/// Bounded log of the most recent queries, oldest first.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    capacity: usize,
    entries: VecDeque<String>,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: VecDeque::with_capacity(capacity) }
    }

    /// Appends `query` unless it is already present. Duplicates keep their
    /// original position. Returns whether the query was added.
    pub fn record(&mut self, query: &str) -> bool {
        if self.capacity == 0 || self.entries.iter().any(|q| q == query) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(query.to_string());
        true
    }

    pub fn recent(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(5)
    }
}
