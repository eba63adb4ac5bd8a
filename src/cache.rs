use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Memoizes the settled results of a single loader instance.
///
/// Values are stored as `Option<V>` so that a key known to be absent is answered without another
/// dispatch, just like a key known to be present.
pub trait Cache {
    type K;
    type V;

    /// Returns the settled result for `key`, or `None` if the key has never been loaded.
    fn lookup(&self, key: &Self::K) -> Option<&Option<Self::V>>;

    fn settle(&mut self, key: Self::K, value: Option<Self::V>);
}

impl<K, V, S: BuildHasher> Cache for HashMap<K, Option<V>, S>
where
    K: Eq + Hash,
{
    type K = K;
    type V = V;

    fn lookup(&self, key: &Self::K) -> Option<&Option<Self::V>> {
        self.get(key)
    }

    fn settle(&mut self, key: Self::K, value: Option<Self::V>) {
        self.insert(key, value);
    }
}
