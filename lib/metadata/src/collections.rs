pub mod collections {
    use hashlink::LinkedHashMap;
    use rustc_hash::FxBuildHasher;

    /// Insertion ordered hash map with the fx hasher.
    pub type FxLinkedHashMap<K, V> = LinkedHashMap<K, V, FxBuildHasher>;
}
