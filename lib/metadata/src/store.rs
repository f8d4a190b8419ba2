pub mod store {
    use crate::collections::collections::FxLinkedHashMap;
    use crate::key::key::MetadataKey;
    use crate::notifier::notifier::{ChangeNotifier, MetadataChange};
    use crate::sync::sync::{MetadataBroadcast, MetadataSync, NullBroadcast};
    use crate::value::value::{MetadataDecode, MetadataValue};

    /// Which side of the replication this peer is on.
    ///
    /// Exactly one peer is the authority (the server); everyone else
    /// holds an eventually consistent read replica.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ReplicationRole {
        Authority,
        Replica,
    }

    /// Process-wide replicated key/value table.
    ///
    /// Writes are only accepted on the authority and broadcast to all
    /// peers; replicas apply updates in receive order via
    /// [`MetadataStore::apply_replicated`]. Every applied effective
    /// change is dispatched through the [`ChangeNotifier`] before the
    /// applying call returns. Setting a value equal to the current one
    /// is suppressed entirely (no broadcast, no notification).
    #[derive(Debug)]
    pub struct MetadataStore {
        entries: FxLinkedHashMap<MetadataKey, String>,
        role: ReplicationRole,
        notifier: ChangeNotifier,
        broadcast: Box<dyn MetadataBroadcast>,
    }

    impl MetadataStore {
        pub fn new(role: ReplicationRole) -> Self {
            Self::with_broadcast(role, NullBroadcast)
        }

        pub fn with_broadcast(role: ReplicationRole, broadcast: impl MetadataBroadcast + 'static) -> Self {
            Self {
                entries: Default::default(),
                role,
                notifier: Default::default(),
                broadcast: Box::new(broadcast),
            }
        }

        pub fn is_authoritative(&self) -> bool {
            self.role == ReplicationRole::Authority
        }

        /// A cloneable handle to this store's change notifier.
        pub fn notifier(&self) -> &ChangeNotifier {
            &self.notifier
        }

        /// Writes a value. Only permitted on the authority; on a
        /// replica this is a no-op that returns `false`.
        ///
        /// The returned `bool` reports write permission, not whether
        /// the value actually changed.
        pub fn try_set(&mut self, key: MetadataKey, value: MetadataValue) -> bool {
            if !self.is_authoritative() {
                log::debug!(target: "metadata", "rejected non-authoritative write to {key}");
                return false;
            }
            self.apply(key, value.encode(), true);
            true
        }

        /// Applies an update received from the authority.
        ///
        /// The transport glue calls this on the tick thread, in the
        /// order the messages were received.
        pub fn apply_replicated(&mut self, sync: MetadataSync) {
            self.apply(sync.key, sync.value, false);
        }

        fn apply(&mut self, key: MetadataKey, value: String, broadcast: bool) {
            let old = self.entries.get(&key).cloned();
            if old.as_deref() == Some(value.as_str()) {
                return;
            }
            self.entries.insert(key.clone(), value.clone());
            if broadcast {
                self.broadcast.broadcast(MetadataSync {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
            self.notifier.dispatch(&MetadataChange {
                key,
                old,
                new: value,
            });
        }

        /// Pure read from the local replica; never blocks.
        pub fn try_get(&self, key: &MetadataKey) -> Option<&str> {
            self.entries.get(key).map(|v| v.as_str())
        }

        /// Typed read with the lenient-default contract: an absent or
        /// malformed value decodes to `T::default()`.
        pub fn decoded<T: MetadataDecode + Default>(&self, key: &MetadataKey) -> T {
            self.try_get(key)
                .and_then(T::decode)
                .unwrap_or_default()
        }

        pub fn entries(&self) -> impl Iterator<Item = (&MetadataKey, &str)> {
            self.entries.iter().map(|(k, v)| (k, v.as_str()))
        }

        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    }

    impl std::fmt::Debug for dyn MetadataBroadcast {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("MetadataBroadcast")
        }
    }

    #[cfg(test)]
    mod test {
        use std::cell::RefCell;
        use std::rc::Rc;

        use super::{MetadataStore, ReplicationRole};
        use crate::key::key::MetadataKey;
        use crate::notifier::notifier::MetadataChange;
        use crate::sync::sync::LoopbackBroadcast;
        use crate::value::value::MetadataValue;

        fn recording(store: &MetadataStore) -> Rc<RefCell<Vec<MetadataChange>>> {
            let seen: Rc<RefCell<Vec<MetadataChange>>> = Default::default();
            let seen2 = seen.clone();
            store
                .notifier()
                .subscribe(move |change| seen2.borrow_mut().push(change.clone()));
            seen
        }

        #[test]
        fn every_effective_transition_is_seen_once_in_order() {
            let mut store = MetadataStore::new(ReplicationRole::Authority);
            let seen = recording(&store);

            let key = MetadataKey::new("round.phase");
            assert!(store.try_set(key.clone(), MetadataValue::tag("warmup")));
            // same value again: accepted, but not an effective change
            assert!(store.try_set(key.clone(), MetadataValue::tag("warmup")));
            assert!(store.try_set(key.clone(), MetadataValue::tag("live")));
            assert!(store.try_set(MetadataKey::new("round.score"), 1.into()));

            assert_eq!(store.len(), 2);
            let seen = seen.borrow();
            assert_eq!(seen.len(), 3);
            assert_eq!((seen[0].old.as_deref(), seen[0].new.as_str()), (None, "warmup"));
            assert_eq!(
                (seen[1].old.as_deref(), seen[1].new.as_str()),
                (Some("warmup"), "live")
            );
            assert_eq!(seen[2].new, "1");
        }

        #[test]
        fn replica_writes_are_rejected_without_mutation() {
            let mut store = MetadataStore::new(ReplicationRole::Replica);
            let seen = recording(&store);

            let key = MetadataKey::new("round.phase");
            assert!(!store.try_set(key.clone(), MetadataValue::tag("live")));
            assert_eq!(store.try_get(&key), None);
            assert!(store.is_empty());
            assert_eq!(store.entries().count(), 0);
            assert!(seen.borrow().is_empty());
        }

        #[test]
        fn replication_applies_in_order_and_notifies() {
            let loopback = LoopbackBroadcast::default();
            let mut authority =
                MetadataStore::with_broadcast(ReplicationRole::Authority, loopback.clone());
            let mut replica = MetadataStore::new(ReplicationRole::Replica);
            let replica_seen = recording(&replica);

            let key = MetadataKey::new("tdm.score.A");
            assert!(authority.try_set(key.clone(), 1.into()));
            assert!(authority.try_set(key.clone(), 2.into()));
            assert_eq!(authority.try_get(&key), Some("2"));

            // not visible on the replica until replication is applied
            assert_eq!(replica.try_get(&key), None);
            for msg in loopback.drain() {
                // the wire shape is exactly (key, value)
                let bytes = msg.encode().unwrap();
                replica.apply_replicated(super::MetadataSync::decode(&bytes).unwrap());
            }

            assert_eq!(replica.try_get(&key), Some("2"));
            let seen = replica_seen.borrow();
            assert_eq!(seen.len(), 2);
            assert_eq!(seen[0].new, "1");
            assert_eq!(seen[1].new, "2");
        }

        #[test]
        fn lenient_typed_reads_default_on_absent_or_malformed() {
            let mut store = MetadataStore::new(ReplicationRole::Authority);
            let absent = MetadataKey::new("tdm.score.A");
            assert_eq!(store.decoded::<i64>(&absent), 0);

            let bad = MetadataKey::new("tdm.score.B");
            assert!(store.try_set(bad.clone(), MetadataValue::tag("not-a-number")));
            assert_eq!(store.decoded::<i64>(&bad), 0);

            let good = MetadataKey::new("tdm.score.C");
            assert!(store.try_set(good.clone(), 7.into()));
            assert_eq!(store.decoded::<i64>(&good), 7);
        }
    }
}
