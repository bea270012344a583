use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

/// A hashed k-mer as stored in a signature.
pub type ItemHash = u64;

/// If we're using a `HashMap` where the keys themselves are hashes, it's
/// a little silly to re-hash them. That's where the `NoHashHasher` comes in.
#[derive(Default)]
pub struct NoHashHasher(u64);

impl Hasher for NoHashHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        // only reached for non-u64 keys; fold the bytes in
        for b in bytes {
            self.0 = (self.0 << 8) | u64::from(*b);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

pub type HashMapByHash<V> = HashMap<ItemHash, V, BuildHasherDefault<NoHashHasher>>;
