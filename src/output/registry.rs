//! WriterRegistry - unit name -> PrefixSink
//!
//! Lookups take the read lock, insertions and removals the write lock.
//! Critical sections cover map access only; sinks are handed out as `Arc`s
//! and written to after the lock is released.

use std::sync::Arc;

use parking_lot::RwLock; // 2-3x faster than std::sync::RwLock
use rustc_hash::FxHashMap;

use super::PrefixSink;

#[derive(Debug, Default)]
pub struct WriterRegistry {
    sinks: RwLock<FxHashMap<Arc<str>, Arc<PrefixSink>>>,
}

impl WriterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<PrefixSink>> {
        self.sinks.read().get(name).cloned()
    }

    /// Sink for `name`, creating it with `make` if absent.
    ///
    /// Returns `true` alongside the sink when it was created by this call.
    /// Racing callers for the same name all receive the same sink.
    pub fn get_or_create<F>(&self, name: &str, make: F) -> (Arc<PrefixSink>, bool)
    where
        F: FnOnce() -> PrefixSink,
    {
        if let Some(sink) = self.get(name) {
            return (sink, false);
        }

        let mut sinks = self.sinks.write();
        // another caller may have won between the two locks
        if let Some(sink) = sinks.get(name) {
            return (Arc::clone(sink), false);
        }
        let sink = Arc::new(make());
        sinks.insert(Arc::from(name), Arc::clone(&sink));
        tracing::trace!(unit = %name, "sink registered");
        (sink, true)
    }

    /// Install `sink` for `name`, dropping any previous one.
    pub fn replace(&self, name: &str, sink: PrefixSink) -> Arc<PrefixSink> {
        let sink = Arc::new(sink);
        let previous = self
            .sinks
            .write()
            .insert(Arc::from(name), Arc::clone(&sink));
        if previous.is_some() {
            tracing::trace!(unit = %name, "sink replaced");
        } else {
            tracing::trace!(unit = %name, "sink registered");
        }
        sink
    }

    pub fn remove(&self, name: &str) -> Option<Arc<PrefixSink>> {
        let removed = self.sinks.write().remove(name);
        if removed.is_some() {
            tracing::trace!(unit = %name, "sink removed");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sinks.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
