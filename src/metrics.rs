// Per-item measurement cache keyed by a stable item key, owned by the host.
// Placement reads it through `AspectSource`, so layout stays a pure function of its inputs.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Stable identity of a rail item, independent of its current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey(u64);

impl ItemKey {
    pub fn new(key: u64) -> Self {
        ItemKey(key)
    }
}

/// Supplies a height/width ratio per rail index.
pub trait AspectSource {
    fn aspect_ratio(&self, index: usize) -> Option<f32>;
}

/// No measurements: every item uses the configured default ratio.
impl AspectSource for () {
    fn aspect_ratio(&self, _index: usize) -> Option<f32> {
        None
    }
}

/// Bounded LRU map from item key to measured aspect ratio.
pub struct MetricsCache {
    ratios: LruCache<ItemKey, f32>,
}

impl MetricsCache {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A zero capacity is raised to one entry.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        MetricsCache {
            ratios: LruCache::new(capacity),
        }
    }

    /// Record a measured size. Sizes that do not give a positive finite ratio are ignored.
    pub fn record(&mut self, key: ItemKey, width_px: f32, height_px: f32) -> bool {
        let ratio = height_px / width_px;
        if !(ratio.is_finite() && ratio > 0.0) {
            return false;
        }
        if let Some((evicted, _)) = self.ratios.push(key, ratio) {
            if evicted != key {
                log::trace!("metrics cache evicted {:?}", evicted);
            }
        }
        true
    }

    /// Lookup that refreshes recency.
    pub fn get(&mut self, key: ItemKey) -> Option<f32> {
        self.ratios.get(&key).copied()
    }

    /// Lookup without touching recency.
    pub fn peek(&self, key: ItemKey) -> Option<f32> {
        self.ratios.peek(&key).copied()
    }

    pub fn invalidate(&mut self, key: ItemKey) -> Option<f32> {
        self.ratios.pop(&key)
    }

    pub fn clear(&mut self) {
        self.ratios.clear();
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.ratios.cap().get()
    }

    /// View this cache through the host's current index -> key ordering.
    pub fn for_keys<'a>(&'a self, keys: &'a [ItemKey]) -> KeyedAspects<'a> {
        KeyedAspects { cache: self, keys }
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new()
    }
}

/// [`AspectSource`] resolving indices through a key slice.
pub struct KeyedAspects<'a> {
    cache: &'a MetricsCache,
    keys: &'a [ItemKey],
}

impl AspectSource for KeyedAspects<'_> {
    fn aspect_ratio(&self, index: usize) -> Option<f32> {
        self.keys
            .get(index)
            .and_then(|key| self.cache.peek(*key))
    }
}
