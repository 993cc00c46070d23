// ── Class-id keyed object cache ──
//
// Each class is fetched at most once per run; later reads share the same
// collection. Staleness within a run is accepted; the cache is dropped
// wholesale after a commit.

use std::collections::HashMap;
use std::sync::Arc;

use ucsm_api::{ClassId, ManagedObject};

/// Cached query results, keyed by class id.
#[derive(Debug, Default)]
pub struct ObjectCache {
    entries: HashMap<ClassId, Arc<Vec<ManagedObject>>>,
}

impl ObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, class_id: ClassId) -> Option<Arc<Vec<ManagedObject>>> {
        self.entries.get(&class_id).map(Arc::clone)
    }

    /// Store a query result and return the shared handle to it.
    pub fn insert(&mut self, class_id: ClassId, objects: Vec<ManagedObject>) -> Arc<Vec<ManagedObject>> {
        let objects = Arc::new(objects);
        self.entries.insert(class_id, Arc::clone(&objects));
        objects
    }

    pub fn contains(&self, class_id: ClassId) -> bool {
        self.entries.contains_key(&class_id)
    }

    /// Number of cached classes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
