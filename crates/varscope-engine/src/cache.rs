//! Session-scoped cache of fetched price frames.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use varscope_core::Date;
use varscope_traits::{PriceFrame, Symbol};

type FrameKey = (Symbol, Date, Date);

/// Frames a session keeps unless configured otherwise.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Frames fetched during a session, keyed by symbol and inclusive date range.
///
/// Only non-empty frames are stored, so an empty answer is re-asked on the
/// next run. Holds at most `capacity` frames; inserting beyond that evicts
/// the oldest insertion.
#[derive(Debug)]
pub struct FrameCache {
    frames: HashMap<FrameKey, Arc<PriceFrame>>,
    order: VecDeque<FrameKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl FrameCache {
    /// Create an empty cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create an empty cache holding at most `capacity` frames (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Maximum number of frames held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up a frame, counting the hit or miss.
    pub fn get(&mut self, symbol: &Symbol, start: Date, end: Date) -> Option<Arc<PriceFrame>> {
        let found = self.frames.get(&(symbol.clone(), start, end)).cloned();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Store a frame and return the shared handle.
    pub fn insert(&mut self, symbol: Symbol, start: Date, end: Date, frame: PriceFrame) -> Arc<PriceFrame> {
        let frame = Arc::new(frame);
        let key = (symbol, start, end);
        if self.frames.insert(key.clone(), Arc::clone(&frame)).is_none() {
            self.order.push_back(key);
        }
        while self.frames.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.frames.remove(&oldest);
            tracing::debug!(symbol = %oldest.0, "evicted cached frame");
        }
        frame
    }

    /// Number of cached frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that went to the data source.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop all cached frames.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.order.clear();
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_by_full_range() {
        let mut cache = FrameCache::new();
        let sym = Symbol::new("SPY");
        let a = Date::from_ymd(2025, 1, 2).unwrap();
        let b = Date::from_ymd(2025, 3, 31).unwrap();

        assert!(cache.get(&sym, a, b).is_none());
        cache.insert(sym.clone(), a, b, PriceFrame::empty(sym.clone()));
        assert!(cache.get(&sym, a, b).is_some());
        assert!(cache.get(&sym, a, b.add_days(1)).is_none());
        assert_eq!((cache.hits(), cache.misses()), (1, 2));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let mut cache = FrameCache::with_capacity(2);
        let sym = Symbol::new("SPY");
        let start = Date::from_ymd(2025, 1, 2).unwrap();
        let ends: Vec<Date> = (1..=3).map(|i| start.add_days(i * 30)).collect();

        for &end in &ends {
            cache.insert(sym.clone(), start, end, PriceFrame::empty(sym.clone()));
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&sym, start, ends[0]).is_none());
        assert!(cache.get(&sym, start, ends[1]).is_some());
        assert!(cache.get(&sym, start, ends[2]).is_some());

        // Replacing a cached key does not evict
        cache.insert(sym.clone(), start, ends[2], PriceFrame::empty(sym.clone()));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&sym, start, ends[1]).is_some());

        assert_eq!(FrameCache::with_capacity(0).capacity(), 1);
    }
}
