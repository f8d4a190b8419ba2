pub mod sync {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use serde::{Deserialize, Serialize};

    use crate::key::key::MetadataKey;

    /// The one wire message of the replication boundary:
    /// a single (key, value) update from the authority to all peers.
    ///
    /// Delivery semantics (ordering across the network, reliability)
    /// are the transport's responsibility, per-key order must be
    /// preserved end-to-end.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct MetadataSync {
        pub key: MetadataKey,
        pub value: String,
    }

    impl MetadataSync {
        pub fn encode(&self) -> anyhow::Result<Vec<u8>> {
            Ok(bincode::serde::encode_to_vec(
                self,
                bincode::config::standard(),
            )?)
        }

        pub fn decode(data: &[u8]) -> anyhow::Result<Self> {
            Ok(bincode::serde::decode_from_slice(data, bincode::config::standard())?.0)
        }
    }

    /// Outgoing side of the replication boundary.
    ///
    /// The broadcast is fire-and-forget from the authority's view;
    /// there is no acknowledgment or retry here.
    pub trait MetadataBroadcast {
        fn broadcast(&mut self, sync: MetadataSync);
    }

    /// Broadcast sink for replicas and plain offline setups.
    #[derive(Debug, Default)]
    pub struct NullBroadcast;

    impl MetadataBroadcast for NullBroadcast {
        fn broadcast(&mut self, _sync: MetadataSync) {}
    }

    /// Process-local broadcast queue, for tests and listen servers.
    ///
    /// The host drains the queue on its tick thread and applies the
    /// messages to the replica stores, which preserves send order.
    #[derive(Debug, Default, Clone)]
    pub struct LoopbackBroadcast(Rc<RefCell<VecDeque<MetadataSync>>>);

    impl LoopbackBroadcast {
        pub fn drain(&self) -> Vec<MetadataSync> {
            self.0.borrow_mut().drain(..).collect()
        }

        pub fn is_empty(&self) -> bool {
            self.0.borrow().is_empty()
        }
    }

    impl MetadataBroadcast for LoopbackBroadcast {
        fn broadcast(&mut self, sync: MetadataSync) {
            self.0.borrow_mut().push_back(sync);
        }
    }

    #[cfg(test)]
    mod test {
        use super::MetadataSync;
        use crate::key::key::MetadataKey;

        #[test]
        fn wire_message_survives_the_codec() {
            let msg = MetadataSync {
                key: MetadataKey::new("tdm.score.A"),
                value: "3".into(),
            };
            let bytes = msg.encode().unwrap();
            assert_eq!(MetadataSync::decode(&bytes).unwrap(), msg);
        }
    }
}
