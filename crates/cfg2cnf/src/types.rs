//! Collection types shared by the conversion stages.

type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

/// An insertion-ordered map, so that every stage walks the grammar in a
/// deterministic order.
pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasher>;
pub type Set<T> = indexmap::IndexSet<T, BuildHasher>;
