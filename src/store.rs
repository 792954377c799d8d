//! store.rs — bounded in-memory posting store with id-based deduplication.
//!
//! Ingest sweeps re-fetch overlapping pages, so inserting the same posting
//! id twice must be a no-op. Readers take an owned snapshot and run the
//! (pure) pipeline on it; the store itself never holds derived state.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::model::RawPosting;

#[derive(Debug)]
pub struct PostingStore {
    inner: RwLock<Inner>,
    cap: usize,
}

#[derive(Debug)]
struct Inner {
    seen: HashSet<String>,
    postings: Vec<RawPosting>,
}

impl PostingStore {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                seen: HashSet::new(),
                postings: Vec::new(),
            }),
            cap: cap.min(100_000),
        }
    }

    /// Default sizing for a single-country keyword sweep.
    pub fn new_default() -> Self {
        Self::with_capacity(50_000)
    }

    /// Insert a batch, skipping ids already present. Returns
    /// `(inserted, skipped)`. When the cap is exceeded the oldest postings
    /// are dropped (their ids stay in the seen-set so they are not
    /// re-ingested).
    pub fn insert_batch(&self, batch: Vec<RawPosting>) -> (usize, usize) {
        let mut inner = self.inner.write().expect("posting store lock poisoned");
        let mut inserted = 0usize;
        let mut skipped = 0usize;

        for posting in batch {
            if posting.id.is_empty() || !inner.seen.insert(posting.id.clone()) {
                skipped += 1;
                continue;
            }
            inner.postings.push(posting);
            inserted += 1;
        }

        if inner.postings.len() > self.cap {
            let excess = inner.postings.len() - self.cap;
            inner.postings.drain(0..excess);
        }

        (inserted, skipped)
    }

    /// Owned copy of the current postings, in insertion order.
    pub fn snapshot(&self) -> Vec<RawPosting> {
        self.inner
            .read()
            .expect("posting store lock poisoned")
            .postings
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("posting store lock poisoned")
            .postings
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str) -> RawPosting {
        RawPosting {
            id: id.to_string(),
            title: None,
            company: None,
            location: None,
            category: None,
            created: None,
            description: None,
            url: None,
            salary_min: None,
            salary_max: None,
            salary_is_predicted: false,
            salary_interval: None,
            currency: None,
        }
    }

    #[test]
    fn dedups_by_id_across_batches() {
        let store = PostingStore::new_default();
        let (ins, skip) = store.insert_batch(vec![raw("a"), raw("b"), raw("a")]);
        assert_eq!((ins, skip), (2, 1));

        let (ins, skip) = store.insert_batch(vec![raw("b"), raw("c")]);
        assert_eq!((ins, skip), (1, 1));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn empty_ids_are_skipped() {
        let store = PostingStore::new_default();
        let (ins, skip) = store.insert_batch(vec![raw(""), raw("x")]);
        assert_eq!((ins, skip), (1, 1));
    }

    #[test]
    fn cap_drops_oldest_but_remembers_ids() {
        let store = PostingStore::with_capacity(2);
        store.insert_batch(vec![raw("a"), raw("b"), raw("c")]);
        let snap = store.snapshot();
        let ids: Vec<&str> = snap.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);

        // A previously evicted id does not come back.
        let (ins, _) = store.insert_batch(vec![raw("a")]);
        assert_eq!(ins, 0);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let store = PostingStore::new_default();
        store.insert_batch(vec![raw("1"), raw("2")]);
        store.insert_batch(vec![raw("3")]);
        let ids: Vec<String> = store.snapshot().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
