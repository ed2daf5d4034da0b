use ahash::RandomState;

use crate::EdgeId;

pub type HashMap<K, V> = hashbrown::HashMap<K, V, RandomState>;
pub type HashSet<V> = hashbrown::HashSet<V, RandomState>;
pub type EdgeIdMap<V> = HashMap<EdgeId, V>;
pub type EdgeIdSet = HashSet<EdgeId>;
