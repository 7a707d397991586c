use hashbrown::HashMap;

use crate::types::RecordId;

/// Secondary index from a field value to the ids carrying it.
pub type VecIndex<K> = HashMap<K, Vec<RecordId>>;

/// Appends `id` under `key`.
pub fn index_insert<K: Eq + std::hash::Hash>(index: &mut VecIndex<K>, key: K, id: &str) {
    index.entry(key).or_default().push(id.to_string());
}

/// Removes `id` from the bucket under `key`, dropping the bucket when empty.
pub fn index_remove<K: Eq + std::hash::Hash>(index: &mut VecIndex<K>, key: &K, id: &str) {
    let Some(ids) = index.get_mut(key) else {
        return;
    };
    if let Some(pos) = ids.iter().position(|x| x == id) {
        ids.remove(pos);
    }
    if ids.is_empty() {
        index.remove(key);
    }
}
