#![forbid(unsafe_code)]

//! Byte-budget LRU cache of rendered overlays.
//!
//! Entries are keyed by [`CellVisualKey`], which captures everything about a
//! cell that changes the rendered pixels for a given style. Equal keys share
//! one bitmap, so moving focus across a row of same-sized cells renders once.
//!
//! The cache never invalidates by itself. When a style change affects pixels
//! outside the key (shape, radii, margins), the owner replaces the cache.

use std::fmt;
use std::rc::Rc;

use lru::LruCache;
use tvg_render::Argb;
use tvg_style::{SelectorStyle, VisualState};

use crate::overlay::OverlayBitmap;

/// Environment variable holding the budget in KiB.
pub const ENV_CACHE_KB: &str = "TVG_CACHE_KB";

/// Default budget: 16 MiB.
pub const DEFAULT_CACHE_BYTES: usize = 16 * 1024 * 1024;

/// Identity of one rendered overlay.
///
/// Colors are the state-resolved stroke and fill colors; the fill color
/// carries the state's fill alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVisualKey {
    pub filled: bool,
    pub stroke_width: f32,
    pub stroke_color: Argb,
    pub fill_color: Argb,
    pub width: u32,
    pub height: u32,
}

impl CellVisualKey {
    /// Key for a `width × height` cell drawn in `state` under `style`.
    pub fn new(style: &SelectorStyle, state: VisualState, width: u32, height: u32) -> Self {
        Self {
            filled: style.filled,
            stroke_width: style.stroke_width,
            stroke_color: style.stroke_color(state),
            fill_color: style.fill_color(state),
            width,
            height,
        }
    }

    /// Colon-delimited canonical form, e.g. `true:4.0:-16776961:-1:120:80`.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellVisualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:?}:{}:{}:{}:{}",
            self.filled,
            self.stroke_width,
            self.stroke_color.to_i32(),
            self.fill_color.to_i32(),
            self.width,
            self.height
        )
    }
}

/// Maximum bytes of pixel data the cache keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheBudget(usize);

impl Default for CacheBudget {
    fn default() -> Self {
        Self(DEFAULT_CACHE_BYTES)
    }
}

impl CacheBudget {
    /// Budget of exactly `bytes`.
    pub const fn from_bytes(bytes: usize) -> Self {
        Self(bytes)
    }

    /// Budget sized from the host's per-app heap class, given in KiB.
    pub const fn from_heap_kb(kb: usize) -> Self {
        Self(kb.saturating_mul(1024))
    }

    /// Budget in bytes.
    pub const fn bytes(self) -> usize {
        self.0
    }

    /// Budget from `TVG_CACHE_KB`, falling back to the default.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Budget from a custom lookup (for tests).
    ///
    /// A malformed value is logged and ignored.
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(value) = get_env(ENV_CACHE_KB) else {
            return Self::default();
        };
        match value.trim().parse::<usize>() {
            Ok(kb) => Self::from_heap_kb(kb),
            Err(_) => {
                tvg_core::warn!(value = %value, "ignoring malformed {}", ENV_CACHE_KB);
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub bytes_cached: u64,
    pub entries: u64,
    /// Inserts larger than the whole budget.
    pub oversized_inserts: u64,
}

/// LRU map from [`CellVisualKey`] to shared overlays under a byte budget.
///
/// Recency is tracked by an unbounded [`LruCache`]; the byte budget is
/// enforced here by popping least recently used entries.
#[derive(Debug)]
pub struct BitmapCache {
    budget: CacheBudget,
    cached_bytes: usize,
    // Canonical key -> bitmap, most recent first.
    entries: LruCache<String, Rc<OverlayBitmap>>,
    stats: CacheStats,
}

impl Default for BitmapCache {
    fn default() -> Self {
        Self::new(CacheBudget::default())
    }
}

impl BitmapCache {
    pub fn new(budget: CacheBudget) -> Self {
        Self {
            budget,
            cached_bytes: 0,
            entries: LruCache::unbounded(),
            stats: CacheStats::default(),
        }
    }

    #[must_use]
    pub fn budget(&self) -> CacheBudget {
        self.budget
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Bytes currently held.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.cached_bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Presence check that neither touches recency nor counts a lookup.
    #[must_use]
    pub fn contains(&self, key: &CellVisualKey) -> bool {
        self.entries.contains(&key.canonical())
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Look up a bitmap, marking it most recently used.
    pub fn get(&mut self, key: &CellVisualKey) -> Option<Rc<OverlayBitmap>> {
        let canonical = key.canonical();
        match self.entries.get(&canonical) {
            Some(bitmap) => {
                self.stats.hits += 1;
                tvg_core::trace!(key = %canonical, "overlay cache hit");
                Some(Rc::clone(bitmap))
            }
            None => {
                self.stats.misses += 1;
                tvg_core::trace!(key = %canonical, "overlay cache miss");
                None
            }
        }
    }

    /// Insert a bitmap, replacing any entry with an equal key, then evict
    /// least recently used entries until the budget holds.
    ///
    /// A bitmap larger than the whole budget is still admitted (after
    /// everything else is evicted) and counted in
    /// [`CacheStats::oversized_inserts`]; the next insert evicts it.
    pub fn put(&mut self, key: &CellVisualKey, bitmap: Rc<OverlayBitmap>) {
        let canonical = key.canonical();
        if let Some(previous) = self.entries.pop(&canonical) {
            self.cached_bytes = self.cached_bytes.saturating_sub(previous.byte_size());
        }

        let incoming = bitmap.byte_size();
        self.evict_until_within_budget(incoming);
        if incoming > self.budget.bytes() {
            self.stats.oversized_inserts += 1;
            tvg_core::warn!(
                key = %canonical,
                bytes = incoming,
                budget = self.budget.bytes(),
                "overlay larger than cache budget"
            );
        }

        self.entries.put(canonical, bitmap);
        self.cached_bytes = self.cached_bytes.saturating_add(incoming);
        self.sync_stats();
    }

    /// Look up a bitmap, rendering and inserting it on a miss.
    ///
    /// `render` runs only on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: &CellVisualKey, render: F) -> Rc<OverlayBitmap>
    where
        F: FnOnce() -> OverlayBitmap,
    {
        if let Some(bitmap) = self.get(key) {
            return bitmap;
        }
        let bitmap = Rc::new(render());
        self.put(key, Rc::clone(&bitmap));
        bitmap
    }

    fn sync_stats(&mut self) {
        self.stats.bytes_cached = self.cached_bytes as u64;
        self.stats.entries = self.entries.len() as u64;
    }

    fn evict_until_within_budget(&mut self, incoming_bytes: usize) {
        while self.cached_bytes.saturating_add(incoming_bytes) > self.budget.bytes() {
            let Some((key, bitmap)) = self.entries.pop_lru() else {
                break;
            };
            self.cached_bytes = self.cached_bytes.saturating_sub(bitmap.byte_size());
            self.stats.evictions += 1;
            tvg_core::trace!(key = %key, "overlay cache eviction");
        }
        self.sync_stats();
    }
}
