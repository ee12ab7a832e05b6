use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use ahash::RandomState;
use parking_lot::RwLock;

use super::fixed::Fixed;
use super::types::GlyphImage;

/// Identity token of a cache owner.
///
/// Every call to [`OwnerId::next`] yields a token distinct from all tokens
/// handed out before in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(NonZeroU64);

impl OwnerId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        let id = NEXT.fetch_add(1, Ordering::Relaxed);
        Self(NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN))
    }
}

/// Cache key of a [`StdFace`](super::StdFace) glyph image.
///
/// The vertical sub-pixel offset is not part of the key: origins are snapped
/// to whole pixels vertically, so it only depends on the rune.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StdFaceGlyphKey {
    pub rune: char,
    pub x_offset: Fixed,
}

impl StdFaceGlyphKey {
    pub fn new(rune: char, x_offset: Fixed) -> Self {
        Self { rune, x_offset }
    }
}

type Slot = Arc<OnceLock<Option<GlyphImage>>>;

/// Glyph images of one owner, created lazily and kept for the owner's
/// lifetime.
///
/// Stores `Some(image)` for inked glyphs and `None` for glyphs without ink
/// (or whose rasterization failed), so neither is ever rasterized twice.
/// Creation is single-flight per key: concurrent misses on the same key
/// run the factory once and all callers get its result, while misses on
/// different keys do not wait on each other.
pub struct GlyphImageCache<K> {
    owner: OwnerId,
    slots: RwLock<HashMap<K, Slot, RandomState>>,
}

impl<K: Eq + Hash + Copy> GlyphImageCache<K> {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            slots: RwLock::new(HashMap::default()),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the image cached for `key`, running `create` on the first
    /// request.
    ///
    /// # Panics
    ///
    /// Panics if `owner` is not the owner this cache was created for.
    pub fn get_or_create<F>(&self, owner: OwnerId, key: K, create: F) -> Option<GlyphImage>
    where
        F: FnOnce() -> Option<GlyphImage>,
    {
        if owner != self.owner {
            panic!(
                "glyph image cache of {:?} used through foreign owner {:?}",
                self.owner, owner
            );
        }

        let slot = self.slot(key);
        slot.get_or_init(create).clone()
    }

    fn slot(&self, key: K) -> Slot {
        if let Some(slot) = self.slots.read().get(&key) {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write();
        Arc::clone(slots.entry(key).or_default())
    }

    /// Checks if a finished entry exists for the given key.
    pub fn contains(&self, key: &K) -> bool {
        self.slots
            .read()
            .get(key)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}
