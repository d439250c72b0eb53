use super::TileKey;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// In-memory cache of downloaded tile bytes using LRU eviction
#[derive(Debug)]
pub struct TileCache {
    cache: Arc<Mutex<LruCache<TileKey, Arc<Vec<u8>>>>>,
}

impl TileCache {
    /// Create a new tile cache with the given capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Get a tile from the cache, marking it recently used
    pub fn get(&self, key: &TileKey) -> Option<Arc<Vec<u8>>> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    /// Insert a tile into the cache
    pub fn insert(&self, key: TileKey, data: Vec<u8>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, Arc::new(data));
        }
    }

    /// Check if a tile is in the cache
    pub fn contains(&self, key: &TileKey) -> bool {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.contains(key))
            .unwrap_or(false)
    }

    /// Get the current number of cached tiles
    pub fn len(&self) -> usize {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.len())
            .unwrap_or(0)
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for TileCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::TileCoord;
    use crate::map::style::MapStyle;

    fn key(style: MapStyle, x: u32) -> TileKey {
        TileKey::new(style, TileCoord::new(x, 0, 3))
    }

    #[test]
    fn test_tile_cache_basic_operations() {
        let cache = TileCache::new(2);
        assert!(cache.is_empty());

        cache.insert(key(MapStyle::Standard, 1), vec![1, 2, 3]);
        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get(&key(MapStyle::Standard, 1)).unwrap(), vec![1, 2, 3]);

        // same coordinate, other style, is a different tile
        assert!(!cache.contains(&key(MapStyle::Satellite, 1)));
    }

    #[test]
    fn test_tile_cache_lru_eviction() {
        let cache = TileCache::new(2);
        cache.insert(key(MapStyle::Standard, 1), vec![1]);
        cache.insert(key(MapStyle::Standard, 2), vec![2]);

        // touch 1 so 2 becomes least recently used
        cache.get(&key(MapStyle::Standard, 1));
        cache.insert(key(MapStyle::Standard, 3), vec![3]);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&key(MapStyle::Standard, 1)));
        assert!(!cache.contains(&key(MapStyle::Standard, 2)));
        assert!(cache.contains(&key(MapStyle::Standard, 3)));
    }

    #[test]
    fn test_zero_capacity_falls_back_to_default() {
        let cache = TileCache::new(0);
        cache.insert(key(MapStyle::Standard, 1), vec![1]);
        assert_eq!(cache.len(), 1);
    }
}
